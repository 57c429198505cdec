//! Core types, errors, and configuration shared across the pipeline

pub mod config;
pub mod error;
pub mod types;
