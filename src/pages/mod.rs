//! Routed pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page except `login` sits behind the route guard installed in `app`
//! and reads the current dictionary from the shared store.

pub mod input;
pub mod login;
pub mod stats;
pub mod study;
