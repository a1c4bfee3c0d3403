use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use super::Claims;

/// Why a credential was rejected.
///
/// The guard treats every variant the same way; the kind only feeds logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("credential has expired")]
    Expired,

    #[error("credential is not valid yet")]
    NotYetValid,

    #[error("credential signature does not match")]
    BadSignature,

    #[error("credential is signed with an unexpected algorithm")]
    WrongAlgorithm,

    #[error("credential is malformed: {0}")]
    Malformed(String),

    #[error("credential claims are invalid: {0}")]
    InvalidClaims(String),
}

impl VerificationError {
    /// Stable short name used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationError::Expired => "expired",
            VerificationError::NotYetValid => "not_yet_valid",
            VerificationError::BadSignature => "bad_signature",
            VerificationError::WrongAlgorithm => "wrong_algorithm",
            VerificationError::Malformed(_) => "malformed",
            VerificationError::InvalidClaims(_) => "invalid_claims",
        }
    }

    /// Failures that a well-behaved client holding an old session would not produce.
    pub fn is_suspicious(&self) -> bool {
        !matches!(
            self,
            VerificationError::Expired | VerificationError::NotYetValid
        )
    }
}

impl From<jsonwebtoken::errors::Error> for VerificationError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => VerificationError::Expired,
            ErrorKind::ImmatureSignature => VerificationError::NotYetValid,
            ErrorKind::InvalidSignature => VerificationError::BadSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                VerificationError::WrongAlgorithm
            }
            ErrorKind::Json(e) => VerificationError::InvalidClaims(e.to_string()),
            ErrorKind::MissingRequiredClaim(claim) => {
                VerificationError::InvalidClaims(format!("missing claim '{}'", claim))
            }
            _ => VerificationError::Malformed(err.to_string()),
        }
    }
}

/// Validates a credential and yields its claims.
///
/// Implementations must be cheap and non-blocking: the guard calls `verify`
/// exactly once per authenticated request, inline.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Claims, VerificationError>;
}

/// HMAC-SHA256 JWT verifier keyed by the process-wide secret.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &SecretString, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        // Issuer tokens are not required to carry `exp`; when present it is enforced.
        validation.required_spec_claims.clear();
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

impl CredentialVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<Claims, VerificationError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}
