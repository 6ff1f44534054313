//! HTTP client for the music server.

pub mod client;
pub mod models;
pub mod source;

pub use client::{ApiClient, ApiError, user_message};
pub use models::{Comment, CurrentUser, Track, TrackDetail};
pub use source::StreamSource;
