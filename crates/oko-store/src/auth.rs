use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

pub const PBKDF2_ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Salted PBKDF2-HMAC-SHA256 credential digest, hex-encoded for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordRecord {
    pub hash: String,
    pub salt: String,
    pub iterations: u32,
}

pub fn hash_password(password: &str) -> PasswordRecord {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let salt_hex = hex::encode(salt);
    let hash = derive(password, &salt_hex, PBKDF2_ITERATIONS);
    PasswordRecord {
        hash: hex::encode(hash),
        salt: salt_hex,
        iterations: PBKDF2_ITERATIONS,
    }
}

/// Constant-time comparison against a stored record. A record whose hash is
/// not valid hex never verifies.
pub fn verify_password(password: &str, record: &PasswordRecord) -> bool {
    let Ok(stored) = hex::decode(&record.hash) else {
        return false;
    };
    let candidate = derive(password, &record.salt, record.iterations);
    stored.as_slice().ct_eq(candidate.as_slice()).into()
}

/// The salt is fed as its hex text, so records survive being re-encoded.
fn derive(password: &str, salt_hex: &str, iterations: u32) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        salt_hex.as_bytes(),
        iterations,
        &mut out,
    );
    out
}
