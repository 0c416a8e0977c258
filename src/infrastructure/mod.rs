//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (e.g., ChatProvider, HttpTransport).

pub mod http;
pub mod matrix;
pub mod xkcd;
