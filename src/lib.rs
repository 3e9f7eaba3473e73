pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod runtime;

pub use config::Config;
pub use error::HostError;
pub use host::{run, Bridge, Running};
