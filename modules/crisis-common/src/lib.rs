pub mod advisory;
pub mod config;
pub mod error;
pub mod types;

pub use advisory::*;
pub use config::Config;
pub use error::{CrisisError, Result};
pub use types::*;
