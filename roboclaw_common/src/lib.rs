//! Roboclaw Common Library
//!
//! This crate provides the configuration loading, value types and motor
//! driver facade shared by the HAL and supervisor crates.
//!
//! # Module Structure
//!
//! - [`config`] - Configuration loading traits and logging configuration
//! - [`hal`] - Driver facade, value types and controller configuration
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use roboclaw_common::prelude::*;
//!
//! let config = ControllerConfig::default();
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod hal;
pub mod prelude;
