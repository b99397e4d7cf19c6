//! Authentication module for the Closet client.
//!
//! This module provides:
//! - Credentials storage and management
//! - The session holder shared by the API client and the query hooks
//! - The login/signup/logout lifecycle, with an offline dev fallback

pub mod credentials;
pub mod session;

pub use credentials::{Credentials, CredentialsManager};
pub use session::{Session, SessionEvent, SessionManager, SessionStore};
