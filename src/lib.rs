//! Arbre Généalogique: landing page, sign-up/sign-in flows and a
//! session-gated dashboard served over Axum.
//!
//! ARCHITECTURE
//! ============
//! - `flow`: session observation, dashboard gating and form submission
//!   logic, independent of HTTP.
//! - `services`: account creation and the session provider.
//! - `store`: persistence seam (Postgres or in-memory).
//! - `views`: HTML rendering from templates.
//! - `routes`: Axum handlers translating HTTP to flows and back.

pub mod config;
pub mod db;
pub mod flow;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod views;
