//! HTTP client for the scramble service.
//!
//! [`HttpBackend`] implements every collaborator contract from
//! `word-scramble-core` against the service's HTTP endpoints. Transport
//! failures, non-success statuses and bodies that do not match the
//! [`protocol`] schemas each map onto their own `CollaboratorError` variant.

pub mod config;
pub mod http;
pub mod protocol;

pub use word_scramble_core as core;
pub use word_scramble_types as types;

pub use config::ClientConfig;
pub use http::HttpBackend;

