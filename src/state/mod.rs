//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `dictionary`, `study`) so pages can
//! depend on small focused models. Shared stores are provided through Leptos
//! context from `app`, never as module-level globals.

pub mod auth;
pub mod dictionary;
pub mod study;
