//! Transport client for the Food Bridge backend REST surface.

mod client;
mod envelope;

pub use client::{ApiClient, AuthPayload, RegistrationForm, UserTypeEntry};
