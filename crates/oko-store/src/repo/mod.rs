pub mod searches;
pub mod users;

pub use searches::{SearchRecord, SearchesRepo};
pub use users::{User, UsersRepo, VerifyOutcome};
