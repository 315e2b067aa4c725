//! Batch reconciliation of manifest path renames against the image catalog.
//!
//! ## Run shape
//!
//! One run is: load and validate the manifest, exchange service credentials
//! for a bearer token, open one authenticated catalog session, then walk the
//! records in manifest order — resolve each to a catalog image id, apply the
//! new path, report the outcome — and release the session.
//!
//! Contract notes:
//! - The resolution strategy is decided once per manifest (a `pk` column
//!   resolves by identifier, otherwise by current path) and threaded through
//!   every call; there is no per-record mode.
//! - Per-record misses and remote rejections are logged and skipped; the
//!   batch proceeds. Transport faults and identifier lookups with no match
//!   abort the run.
//! - One request is in flight at a time; the session is a single negotiated
//!   channel and is closed exactly once, on both exit paths.

pub mod catalog;
pub mod cli;
pub mod credentials;
pub mod driver;
pub mod manifest;
pub mod resolver;
pub mod updater;
