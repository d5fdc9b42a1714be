// ABOUTME: Library half of the emspay CLI
// ABOUTME: Environment config, logging setup, command logic, submission parsing and output helpers

pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
pub mod submission;

#[cfg(test)]
mod tests;
