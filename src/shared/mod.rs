pub mod config;
pub mod error;

pub use config::{AppConfig, BackendConfig, BackendMode, RealtimeConfig};
pub use error::{AppError, Result};
