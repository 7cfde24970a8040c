pub mod depsearch;
pub mod error;
pub mod nickname;
pub mod provider;
pub mod registry;

pub use depsearch::DepSearchProvider;
pub use error::{ClientError, Result};
pub use nickname::NicknameProvider;
pub use provider::{HttpOptions, SearchProvider};
pub use registry::RegistryProvider;
