//! Combat systems (hit detection + resolution)

pub mod hit;


// Re-export all systems
pub use hit::*;
