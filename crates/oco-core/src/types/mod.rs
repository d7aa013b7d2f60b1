//! Core data types: enums, the tick trigger descriptor and job structures.

pub mod enums;
pub mod jobs;
pub mod ticker;

pub use enums::*;
pub use jobs::*;
pub use ticker::*;
