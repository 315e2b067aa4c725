//! Transport-only catalog GraphQL client primitives.
//!
//! This crate owns token exchange, WebSocket session establishment, and
//! request/response building/parsing for the image catalog's GraphQL
//! endpoints only. It intentionally contains no reconciliation policy and no
//! console output.
//!
//! The catalog speaks the Apollo `graphql-ws` subprotocol over a single
//! bearer-authenticated channel; [`CatalogSession`] models that channel as an
//! owned resource with one operation in flight at a time.

pub mod client;
pub mod config;
pub mod error;
pub mod frames;
pub mod headers;
pub mod queries;
pub mod session;
pub mod url;

pub use client::CatalogApiClient;
pub use config::CatalogApiConfig;
pub use error::CatalogApiError;
pub use frames::{ClientFrame, ServerFrame};
pub use queries::{FailedChange, ImageNode, ImageRef, MutatedEdge, MutationOutcome, OperationRequest};
pub use session::CatalogSession;
pub use url::{graphql_url, normalize_hostname, token_url};
