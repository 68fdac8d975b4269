//! Hardware abstraction layer types.
//!
//! This module contains the driver facade, the value types exchanged with
//! it, the controller configuration and its defaults.

pub mod config;
pub mod consts;
pub mod driver;
pub mod types;
