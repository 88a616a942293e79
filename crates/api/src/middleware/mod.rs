//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user and their [`Role`](cadence_core::roles::Role)
//!   from a JWT Bearer token.

pub mod auth;
