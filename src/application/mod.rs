//! Application layer - cross-aggregate orchestration.
//!
//! Thin services over the ports; all real invariants live in the entities
//! and the store constraints.

mod questions;

pub use questions::QuestionService;
