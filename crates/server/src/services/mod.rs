//! Read-side services built on the registries.

pub mod stats;

pub use stats::{ClientCaseStats, DashboardStats, PENDING_INVOICES_PLACEHOLDER};
