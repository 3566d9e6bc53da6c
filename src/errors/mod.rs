//! Error types and error reporting for the scanner.
//!
//! This module defines the diagnostics a scan can produce. It includes:
//!
//! - Error structures with source position information
//! - The recoverable/fatal split that decides whether a scan continues
//! - Error formatting with the offending source line
//! - Helpful error messages and suggestions

pub mod errors;
