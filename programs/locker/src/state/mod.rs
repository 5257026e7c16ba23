pub mod globals;
pub mod registry;

pub use globals::*;
pub use registry::*;
