//! Lead-capture backend for a home-renovation contractor.
//!
//! - [`estimate`] — the cost calculator: project type, area and quality in,
//!   price breakdown out.
//! - [`store`] — contacts, consultation requests, saved estimates and users.
//! - [`validation`] — request-body schemas between HTTP and the store.
//! - [`notify`] — best-effort forwarding of new contacts.
//! - [`server`] — the Axum API and static site server.

pub mod estimate;
pub mod notify;
pub mod prom_metrics;
pub mod server;
pub mod store;
pub mod validation;
