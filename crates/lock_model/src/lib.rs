//! Pure Rust model of the locked-account state machine
//! No I/O, no unwrap/panic, all functions total

pub mod state;
pub mod math;
pub mod penalty;
pub mod helpers;
pub mod transitions;

// Re-export commonly used types
pub use state::*;
pub use helpers::*;
pub use transitions::*;
