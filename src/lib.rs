//! Agora - Group voting backend.
//!
//! This crate implements the domain and repository layer of a group-voting
//! application: users, vote sessions, questions, choices and participants,
//! persisted through SQLite adapters behind one port per aggregate root.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
