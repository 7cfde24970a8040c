use crate::auth::{hash_password, verify_password, PasswordRecord};
use crate::error::{Result, StoreError};
use oko_core::domain::normalize_email;
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Debug, Clone)]
pub struct User {
    pub email: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    WrongPassword,
    UnknownUser,
}

pub struct UsersRepo<'a> {
    conn: &'a Connection,
}

impl<'a> UsersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Registers a user. The email is normalized to lowercase; a second
    /// registration under the same email is an error, matching the uniqueness
    /// invariant of the credential key.
    pub fn register(&self, now_utc: i64, email: &str, password: &str) -> Result<User> {
        let Some(email) = normalize_email(email) else {
            return Err(StoreError::Core(oko_core::CoreError::InvalidEmail));
        };
        if self.get(&email)?.is_some() {
            return Err(StoreError::DuplicateUser(email));
        }

        let record = hash_password(password);
        self.conn.execute(
            "INSERT INTO users (email, password_hash, salt, iterations, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                email,
                record.hash,
                record.salt,
                record.iterations,
                now_utc
            ],
        )?;
        Ok(User {
            email,
            created_at: now_utc,
        })
    }

    pub fn get(&self, email: &str) -> Result<Option<User>> {
        let Some(email) = normalize_email(email) else {
            return Ok(None);
        };
        let user = self
            .conn
            .query_row(
                "SELECT email, created_at FROM users WHERE email = ?1;",
                [email],
                |row| {
                    Ok(User {
                        email: row.get(0)?,
                        created_at: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    pub fn list(&self) -> Result<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT email, created_at FROM users ORDER BY email ASC;")?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(User {
                email: row.get(0)?,
                created_at: row.get(1)?,
            });
        }
        Ok(users)
    }

    pub fn verify(&self, email: &str, password: &str) -> Result<VerifyOutcome> {
        let Some(email) = normalize_email(email) else {
            return Ok(VerifyOutcome::UnknownUser);
        };
        let record: Option<(String, String, u32)> = self
            .conn
            .query_row(
                "SELECT password_hash, salt, iterations FROM users WHERE email = ?1;",
                [&email],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        let Some((hash, salt, iterations)) = record else {
            return Ok(VerifyOutcome::UnknownUser);
        };
        if iterations == 0 {
            return Err(StoreError::InvalidCredential(email));
        }
        let record = PasswordRecord {
            hash,
            salt,
            iterations,
        };
        if verify_password(password, &record) {
            Ok(VerifyOutcome::Verified)
        } else {
            Ok(VerifyOutcome::WrongPassword)
        }
    }

    pub fn delete(&self, email: &str) -> Result<bool> {
        let Some(email) = normalize_email(email) else {
            return Ok(false);
        };
        let removed = self
            .conn
            .execute("DELETE FROM users WHERE email = ?1;", [email])?;
        Ok(removed > 0)
    }
}
