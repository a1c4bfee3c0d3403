use clap::Args;
use serde_json::{json, Value};

use crate::auth::VerificationError;
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::guard::AccessGuard;

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[arg(help = "Credential to verify (the token cookie value)")]
    pub token: String,
}

pub fn handle(guard: &AccessGuard, args: InspectArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    match inspect(guard, &args.token) {
        Ok(claims) => output_success(&output_format, "Credential verified", Some(claims)),
        Err(err) => {
            output_error(&output_format, &err.to_string(), Some(err.kind()))?;
            Err(anyhow::anyhow!("credential rejected ({})", err.kind()))
        }
    }
}

pub fn inspect(guard: &AccessGuard, token: &str) -> Result<Value, VerificationError> {
    let claims = guard.verifier().verify(token)?;
    Ok(json!({
        "role": claims.role,
        "subject": claims.sub,
        "expires_at": claims.exp,
        "issued_at": claims.iat,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtVerifier;
    use crate::guard::RouteTable;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use secrecy::SecretString;
    use std::sync::Arc;

    const SECRET: &str = "cli-test-secret";

    fn guard() -> AccessGuard {
        let verifier = JwtVerifier::new(&SecretString::from(SECRET.to_string()), 0);
        AccessGuard::new(RouteTable::default(), Arc::new(verifier))
    }

    fn sign(payload: Value) -> String {
        encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_inspect_valid_token() {
        let token = sign(json!({"role": "BUSINESS_OWNER", "sub": "biz-9"}));
        let claims = inspect(&guard(), &token).unwrap();
        assert_eq!(claims["role"], json!("BUSINESS_OWNER"));
        assert_eq!(claims["subject"], json!("biz-9"));
        assert_eq!(claims["expires_at"], Value::Null);
    }

    #[test]
    fn test_inspect_expired_token() {
        let exp = (Utc::now() - Duration::minutes(10)).timestamp();
        let token = sign(json!({"role": "ADMIN", "exp": exp}));
        assert_eq!(inspect(&guard(), &token).unwrap_err(), VerificationError::Expired);
    }
}
