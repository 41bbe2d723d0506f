//! DataMind client core.
//!
//! ARCHITECTURE
//! ============
//! Everything the document-analysis front end needs below the rendering layer:
//! an injected key-value store standing in for browser storage, the mocked
//! session/auth manager built on top of it, the shared application state store,
//! and the simulated AI responder driven by fixed-delay scheduled tasks.
//!
//! There is no backend. "Persistence" is whatever [`storage::KeyValueStore`]
//! the composition root injects, and AI replies are fabricated locally.

pub mod auth;
pub mod config;
pub mod routes;
pub mod scheduler;
pub mod services;
pub mod state;
pub mod storage;
pub mod types;
pub mod util;
