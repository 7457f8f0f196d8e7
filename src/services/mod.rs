//! Domain services used by the HTTP routes and the form flows.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation, hashing and persistence calls so route
//! handlers can stay focused on protocol translation and cookie plumbing.

pub mod accounts;
pub mod session;
