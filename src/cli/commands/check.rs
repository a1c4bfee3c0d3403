use clap::Args;
use serde_json::{json, Value};

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::guard::{canonical_path, AccessGuard, Decision, GuardRequest};

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[arg(help = "Request path, e.g. /admin/users")]
    pub path: String,

    #[arg(long, help = "Value of the token cookie")]
    pub token: Option<String>,

    #[arg(long, help = "Send signup_pending=true")]
    pub signup_pending: bool,
}

pub fn handle(guard: &AccessGuard, args: CheckArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let report = report(guard, &args);
    let message = match (report["location"].as_str(), report["error"].as_str()) {
        (Some(location), _) => format!("{} -> {}", args.path, location),
        (None, Some(error)) => format!("{} rejected: {}", args.path, error),
        (None, None) => format!("{} passes through", args.path),
    };
    output_success(&output_format, &message, Some(report))
}

/// Evaluate the guard the way the middleware would for this path and cookie set.
pub fn report(guard: &AccessGuard, args: &CheckArgs) -> Value {
    let path = match canonical_path(&args.path) {
        Ok(path) => path,
        Err(e) => {
            return json!({
                "path": args.path,
                "guarded": false,
                "decision": "reject",
                "location": null,
                "error": e.to_string(),
            });
        }
    };
    if path != args.path {
        return json!({
            "path": args.path,
            "guarded": false,
            "decision": "canonicalize",
            "location": path,
        });
    }

    let guarded = guard.routes().is_guarded(&args.path);
    if !guarded {
        return json!({
            "path": args.path,
            "guarded": false,
            "decision": "bypass",
            "location": null,
        });
    }

    let request = GuardRequest {
        path: &args.path,
        token: args.token.as_deref(),
        signup_pending: args.signup_pending.then_some("true"),
    };
    let decision = guard.evaluate(&request);

    let mut report = json!({
        "path": args.path,
        "guarded": true,
        "decision": decision.kind(),
        "location": decision.location(),
    });
    match &decision {
        Decision::Allow => {}
        Decision::Redirect { rule, .. } => {
            report["rule"] = json!(rule.as_str());
        }
        Decision::RedirectAndClear { cause, .. } => {
            report["cause"] = json!(cause.kind());
            report["clears_cookie"] = json!("token");
        }
    }
    report
}
