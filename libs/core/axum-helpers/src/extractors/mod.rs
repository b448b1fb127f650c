//! Custom extractors for Axum handlers.
//!
//! Extractor rejections render as the standard error envelope instead of
//! axum's plain-text defaults.

pub mod json_object;

pub use json_object::JsonObject;
