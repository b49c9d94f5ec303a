//! Shared configuration for Medley.
//!
//! This crate provides the deployment-facing configuration surface used
//! by the server binary and mapped explicitly onto the core pipeline's
//! constructor parameters.

pub mod config;

pub use config::AppConfig;
