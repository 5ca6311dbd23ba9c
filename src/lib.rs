//! sixelv - show PNG images on sixel-capable terminals
//!
//! The command-line front end of `sixel-reductor`: PNG decoding, YAML
//! defaults, flag handling and output-file plumbing.
//! This library exposes modules for integration testing.

pub mod cli;
pub mod config;
pub mod convert;
pub mod decode;
pub mod error;
