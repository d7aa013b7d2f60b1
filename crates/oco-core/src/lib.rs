//! # oco-core
//!
//! Core crate for composing one-cancels-the-other stop-loss / take-profit jobs:
//!
//! - **Types** (`types`): direction, job-type tags, tick trigger, legs, OCO job
//! - **Draft** (`draft`): the free-text edit form, typed field updates, focus delegate
//! - **Builder** (`builder`): pure draft → job transform
//! - **Validation** (`validate`): opt-in policy check on a built job
//! - **Ids** (`ids`): job and leg identifier suppliers
//! - **Configuration** (`config`): JSON config deserialization
//! - **Error types** (`error`): `OcoError` and `ValidationError` via thiserror
//! - **Logging** (`logging`): tracing-based structured logging

pub mod builder;
pub mod config;
pub mod draft;
pub mod error;
pub mod ids;
pub mod logging;
pub mod types;
pub mod validate;

// Re-export types at crate root for convenience.
pub use types::*;
