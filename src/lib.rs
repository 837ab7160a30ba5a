pub mod app;
pub mod chain;
pub mod config;
pub mod error;
pub mod llm;

pub use error::{Error, Result};
