//! Custom extractors for Axum handlers.
//!
//! These extractors reject bad input with the shared JSON error envelope.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
