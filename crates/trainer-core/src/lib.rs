//! Domain layer of the coach plan-assignment tool.
//!
//! The weekly workout model lives here, together with the pure mappings
//! between its wire representation and the in-memory form, the editor
//! operations that mutate it, and the bounded-retry poller that observes
//! asynchronous AI-generation jobs. All I/O goes through `trainer-api`;
//! the modules in this crate either take the client behind a trait seam
//! or take no I/O at all.

pub mod catalog;
pub mod generation;
pub mod plan;
pub mod session;

pub use catalog::CatalogStore;
pub use session::PlanSession;
