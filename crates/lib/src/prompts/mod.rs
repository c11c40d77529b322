//! # Prompt Template Modules
//!
//! All prompt text sent to the completion service lives here. `tasks` holds the
//! fixed templates; `core` assembles them from request values.

pub mod core;
pub mod tasks;
