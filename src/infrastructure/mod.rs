//! Infrastructure: configuration loading and tracing setup.

pub mod config;
