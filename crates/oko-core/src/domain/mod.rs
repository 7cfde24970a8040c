pub mod email;
pub mod phone;
pub mod sanitize;
pub mod search;

pub use email::{extract_emails, normalize_email, validate_email};
pub use phone::{extract_phones, normalize_phone, PhoneMatch};
pub use sanitize::{sanitize, MAX_VALUE_LEN};
pub use search::SearchKind;
