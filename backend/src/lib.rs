//! User directory service library.
//!
//! The crate is laid out hexagonally: [`domain`] holds the user model, handle
//! derivation and the directory service behind its ports; [`inbound`] adapts
//! HTTP requests onto those ports; [`outbound`] provides the PostgreSQL and
//! in-memory user stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
