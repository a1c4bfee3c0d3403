// guard/mod.rs - route access guard
//
// Decides, for one request, whether it passes through, is redirected, or is
// redirected with its credential cookie removed. Evaluation order:
//
// 1. pending signup -> verification page
// 2. no credential on a protected prefix -> login
// 3. credential present: verify it, then apply the role rules
// 4. otherwise allow
//
// The guard holds no per-request state and never returns an error: every
// verifier failure becomes `Decision::RedirectAndClear`. Paths reach it in
// canonical form (see `path::canonical_path`).

pub mod path;
pub mod routes;

use std::sync::Arc;

use crate::auth::{Claims, CredentialVerifier, VerificationError};

pub use path::{canonical_path, PathError};
pub use routes::{RouteTable, RoutePattern};

/// Cookie carrying the signed credential.
pub const TOKEN_COOKIE: &str = "token";
/// Cookie flagging an account that still has to be verified.
pub const SIGNUP_PENDING_COOKIE: &str = "signup_pending";

/// The request signals the guard looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuardRequest<'a> {
    pub path: &'a str,
    pub token: Option<&'a str>,
    pub signup_pending: Option<&'a str>,
}

impl<'a> GuardRequest<'a> {
    #[cfg(test)]
    fn new(path: &'a str) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    #[cfg(test)]
    fn with_token(mut self, token: &'a str) -> Self {
        self.token = Some(token);
        self
    }

    #[cfg(test)]
    fn with_signup_pending(mut self, value: &'a str) -> Self {
        self.signup_pending = Some(value);
        self
    }

    fn is_signup_pending(&self) -> bool {
        self.signup_pending == Some("true")
    }

    // An empty cookie value counts as no credential.
    fn credential(&self) -> Option<&'a str> {
        self.token.filter(|token| !token.is_empty())
    }
}

/// Which rule produced a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    PendingSignup,
    Unauthenticated,
    AdminOnly,
    CreatorOnly,
    AdminLanding,
    AnonymousOnly,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::PendingSignup => "pending_signup",
            Rule::Unauthenticated => "unauthenticated",
            Rule::AdminOnly => "admin_only",
            Rule::CreatorOnly => "creator_only",
            Rule::AdminLanding => "admin_landing",
            Rule::AnonymousOnly => "anonymous_only",
        }
    }
}

/// Outcome of one guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect { location: String, rule: Rule },
    /// Redirect and delete the `token` cookie; the credential failed verification.
    RedirectAndClear {
        location: String,
        cause: VerificationError,
    },
}

impl Decision {
    pub fn kind(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Redirect { .. } => "redirect",
            Decision::RedirectAndClear { .. } => "redirect_and_clear",
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Redirect { location, .. } | Decision::RedirectAndClear { location, .. } => {
                Some(location.as_str())
            }
        }
    }

    pub fn clears_credential(&self) -> bool {
        matches!(self, Decision::RedirectAndClear { .. })
    }
}

/// Route access guard: a route table plus the verifier for credentials.
#[derive(Clone)]
pub struct AccessGuard {
    routes: RouteTable,
    verifier: Arc<dyn CredentialVerifier>,
}

impl AccessGuard {
    pub fn new(routes: RouteTable, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { routes, verifier }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn verifier(&self) -> &dyn CredentialVerifier {
        self.verifier.as_ref()
    }

    pub fn evaluate(&self, request: &GuardRequest<'_>) -> Decision {
        let routes = &self.routes;
        let path = request.path;

        if request.is_signup_pending() && path != routes.verify_path {
            return redirect(&routes.verify_path, Rule::PendingSignup);
        }

        let Some(token) = request.credential() else {
            if routes.is_protected(path) {
                return redirect(&routes.login_path, Rule::Unauthenticated);
            }
            return Decision::Allow;
        };

        match self.verifier.verify(token) {
            Ok(claims) => self.apply_role_rules(path, &claims),
            Err(cause) => {
                if cause.is_suspicious() {
                    tracing::warn!(
                        "Rejected credential on {} ({}): {}",
                        path,
                        cause.kind(),
                        cause
                    );
                } else {
                    tracing::info!("Rejected credential on {} ({})", path, cause.kind());
                }
                Decision::RedirectAndClear {
                    location: routes.login_path.clone(),
                    cause,
                }
            }
        }
    }

    fn apply_role_rules(&self, path: &str, claims: &Claims) -> Decision {
        let routes = &self.routes;
        let role = claims.role;

        if routes.is_admin_area(path) && !role.may_enter_admin() {
            return redirect(&routes.home_path, Rule::AdminOnly);
        }
        if routes.is_creator_area(path) && !role.may_enter_creator() {
            return redirect(&routes.home_path, Rule::CreatorOnly);
        }
        if routes.is_dashboard(path) && role.has_dedicated_landing() {
            return redirect(&routes.admin_landing, Rule::AdminLanding);
        }
        if routes.is_anonymous_only(path) {
            return redirect(&routes.home_path, Rule::AnonymousOnly);
        }

        Decision::Allow
    }
}

impl std::fmt::Debug for AccessGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGuard")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

fn redirect(location: &str, rule: Rule) -> Decision {
    Decision::Redirect {
        location: location.to_string(),
        rule,
    }
}
