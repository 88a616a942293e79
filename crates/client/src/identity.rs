//! The acting user's role, taken from their access token.

use cadence_core::gateway::IdentityProvider;
use cadence_core::roles::Role;
use cadence_core::types::DbId;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

#[derive(Deserialize)]
struct TokenClaims {
    sub: DbId,
    role: String,
}

/// Identity read from the claims of a bearer token.
///
/// The signature is not checked here; the client does not hold the signing
/// secret and the server verifies every request. The role only decides which
/// controls the client offers.
#[derive(Debug, Clone, Copy)]
pub struct TokenIdentity {
    user_id: DbId,
    role: Role,
}

impl TokenIdentity {
    pub fn from_token(token: &str) -> Result<Self, crate::ClientError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();

        let claims = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)?.claims;
        let role = claims.role.parse::<Role>()?;

        Ok(Self {
            user_id: claims.sub,
            role,
        })
    }

    pub fn user_id(&self) -> DbId {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl IdentityProvider for TokenIdentity {
    fn current_role(&self) -> Role {
        self.role
    }
}
