//! Combat components

pub mod attack;
pub mod kind;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod attack_tests;

// Re-export all components
pub use attack::*;
pub use kind::*;
