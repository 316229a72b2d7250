//! User domain module.
//!
//! Users are independent aggregates; they join vote sessions only through
//! the participant association owned by the session.

mod aggregate;

pub use aggregate::User;
