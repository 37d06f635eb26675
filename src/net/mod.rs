//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns transport, auth headers and status handling, `api` maps named
//! operations onto it, `types` defines the wire schema, and `error` the
//! failures callers can see.

pub mod api;
pub mod error;
pub mod http;
#[cfg(test)]
pub(crate) mod testing;
pub mod types;
