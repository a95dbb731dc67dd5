pub mod config;
pub mod error;
pub mod types;

pub use config::UpkeepConfig;
pub use error::{Result, UpkeepError};
pub use types::*;
