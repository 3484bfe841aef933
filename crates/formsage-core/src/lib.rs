//! FormSage Core — error types and configuration shared by every crate.

pub mod config;
pub mod error;

pub use config::{ClusterConfig, FormSageConfig};
pub use error::{Error, Result};
