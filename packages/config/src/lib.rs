// ABOUTME: Shared configuration constants for the EMS settings workspace
// ABOUTME: Re-exports environment variable names used by the CLI and storage

pub mod constants;

pub use constants::*;
