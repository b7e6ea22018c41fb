//! Bearer token verification and claim decoding.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::json;

use crate::domain::entities::{Claims, User};
use crate::error::AppError;

/// Verifies identity-provider access tokens and turns them into [`User`]s.
///
/// Tokens are RS256-signed by the identity provider; only the public key is
/// known to this service. Signature and expiry are checked, the audience is
/// not (the provider issues tokens for its own client ids).
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    /// Creates a verifier for a given key and algorithm.
    pub fn new(decoding_key: DecodingKey, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key,
            validation,
        }
    }

    /// Creates an RS256 verifier from the identity provider's public key.
    ///
    /// Accepts either a full PEM document or the bare base64 body of a
    /// `PUBLIC KEY` block, as shown in the provider's realm settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid RSA public key.
    pub fn from_rsa_public_key(key: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = key.trim();
        let pem = if key.starts_with("-----BEGIN") {
            key.to_string()
        } else {
            format!("-----BEGIN PUBLIC KEY-----\n{key}\n-----END PUBLIC KEY-----")
        };

        let decoding_key = DecodingKey::from_rsa_pem(pem.as_bytes())?;
        Ok(Self::new(decoding_key, Algorithm::RS256))
    }

    /// Verifies `token` and decodes its claims into a [`User`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the signature, algorithm or expiry
    /// check fails, or if the claims cannot be decoded.
    pub fn verify(&self, token: &str) -> Result<User, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or expired token" }),
            )
        })?;

        Ok(User::from(data.claims))
    }
}
