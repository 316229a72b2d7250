//! Vote session domain module.
//!
//! Handles the vote session lifecycle: creation with or without a defined
//! end, rehydration from the store, and end-date management.

mod aggregate;

pub use aggregate::Session;
