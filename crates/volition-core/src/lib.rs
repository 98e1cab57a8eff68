pub mod config;
pub mod error;
pub mod types;

pub use config::VolitionConfig;
pub use error::{Result, VolitionError};
pub use types::*;
