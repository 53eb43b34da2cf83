//! Domain models for the API.
//!
//! These are validated domain objects, separate from the row types each
//! storage backend reads. `New*` types are produced by the
//! [`validation`](crate::validation) step and are the only way to create a
//! record.

pub mod case;
pub mod client;

pub use case::{Case, CaseFilter, NewCase};
pub use client::{Client, NewClient};
