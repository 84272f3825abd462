//! Paste-sharing service: domain model, HTTP adapter, and storage adapters.
//!
//! The crate is laid out as a hexagon. [`domain`] owns pastes, the access
//! gate, and the ports; [`inbound::http`] drives the domain from Actix Web;
//! [`outbound`] implements the ports over PostgreSQL or process memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
