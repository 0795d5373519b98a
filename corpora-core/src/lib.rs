//! Shared configuration for the corpora retrieval connector.

pub mod config;

pub use config::{Config, ConfigError};
