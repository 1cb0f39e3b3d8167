//! HTTP client for the pantry locator backend.

pub mod client;
pub mod error;

pub use client::{PantryClient, HOME_PATH};
pub use error::ClientError;
