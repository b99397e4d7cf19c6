//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - raw HTTP transport (GET, POST, multipart POST, DELETE)
//! - [`CredentialsProvider`] - durable storage of the session credentials

pub mod credentials;
pub mod http;

pub use credentials::{CredentialsError, CredentialsProvider};
pub use http::{FilePart, Headers, HttpClient, HttpError, Method, MultipartForm, Response};
