//! Identity primitives.
//!
//! - [`jwt`] -- HS256 access-token validation (and issuance for tooling and tests).
//!
//! Logging in and refreshing sessions happens outside this service; it only
//! trusts tokens signed with the shared secret.

pub mod jwt;
