pub mod config;
pub mod engine;
pub mod error;
pub mod vision;
pub mod server;

pub use error::{Error, Result};
