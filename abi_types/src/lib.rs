//! ABI Entry Definitions
//!
//! This crate contains the data model for contract ABI descriptors as
//! emitted by contract inspection tools. It holds pure data structures
//! without any process spawning or file I/O.

pub mod entry;
pub mod merged;

// Re-export commonly used types at the crate root
pub use entry::*;
pub use merged::*;
