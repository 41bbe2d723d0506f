//! Simulated backend services.
//!
//! ARCHITECTURE
//! ============
//! - [`responder`]: fabricates assistant replies after a fixed delay.
//! - [`upload`]: turns a picked file into a [`crate::types::Document`].
//! - [`catalog`]: the static model and subscription catalogs.

pub mod catalog;
pub mod responder;
pub mod upload;

pub use responder::ChatResponder;
pub use upload::{PickedFile, UploadError};
