//! AvukatAjanda Core - Shared domain types.
//!
//! This crate provides the types shared by the AvukatAjanda components:
//! - `server` - HTTP API for clients, cases and dashboard statistics
//! - `cli` - Command-line tools for migrations, seeding and reporting
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! Storage backends convert their rows into these types at the edge.
//!
//! # Modules
//!
//! - [`types`] - Typed ids, the normalised [`Email`] and [`CaseStatus`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
