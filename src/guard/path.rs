// guard/path.rs - canonical request paths for the access guard and forwarding

use url::Url;

// Only the path of this URL is ever used.
const PATH_BASE: &str = "http://gate.invalid/";

// Decoding can expose new dot segments; a path settles well within this many passes.
const MAX_PASSES: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("encoded path separator in {0}")]
    EncodedSeparator(String),

    #[error("path {0} does not settle on a canonical form")]
    Unstable(String),
}

/// The single form of `raw` the guard judges and the front end receives.
///
/// Dot segments are resolved, empty segments collapsed, and percent-encoded
/// unreserved characters (`A-Z a-z 0-9 - . _ ~`) decoded, so `/events/../admin`,
/// `//admin` and `/%61dmin` all come out as `/admin`. Encoded `/` and `\` are
/// refused outright since front ends disagree on whether they separate segments.
pub fn canonical_path(raw: &str) -> Result<String, PathError> {
    let lowered = raw.to_ascii_lowercase();
    if lowered.contains("%2f") || lowered.contains("%5c") {
        return Err(PathError::EncodedSeparator(raw.to_string()));
    }

    let mut url = Url::parse(PATH_BASE).map_err(|_| PathError::Unstable(raw.to_string()))?;
    let mut current = collapse_slashes(raw);

    for _ in 0..MAX_PASSES {
        url.set_path(&current);
        let next = collapse_slashes(&decode_unreserved(url.path()));
        if next == current {
            return Ok(current);
        }
        current = next;
    }

    Err(PathError::Unstable(raw.to_string()))
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

fn decode_unreserved(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let decoded = path
                .get(i + 1..i + 3)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .filter(|byte| is_unreserved(*byte));
            if let Some(byte) = decoded {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    // Only ASCII was substituted, so the input's UTF-8 survives.
    String::from_utf8(out).unwrap_or_else(|_| path.to_string())
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(raw: &str) -> String {
        canonical_path(raw).unwrap()
    }

    #[test]
    fn test_canonical_paths_are_unchanged() {
        for path in [
            "/",
            "/admin",
            "/admin/users/7",
            "/creator/events",
            "/signup/business",
            "/events/42",
            "/admin/",
        ] {
            assert_eq!(canonical(path), path);
        }
    }

    #[test]
    fn test_dot_segments_are_resolved() {
        assert_eq!(canonical("/events/../admin/users"), "/admin/users");
        assert_eq!(canonical("/account/../creator/events"), "/creator/events");
        assert_eq!(canonical("/./dashboard/./overview"), "/dashboard/overview");
        assert_eq!(canonical("/../../admin"), "/admin");
        assert_eq!(canonical("/events/%2e%2e/admin"), "/admin");
        assert_eq!(canonical("/events/%2E./admin"), "/admin");
    }

    #[test]
    fn test_unreserved_escapes_are_decoded() {
        assert_eq!(canonical("/%61dmin/users"), "/admin/users");
        assert_eq!(canonical("/%41dmin"), "/Admin");
        assert_eq!(canonical("/cr%65ator/%7Ealice"), "/creator/~alice");
        // Reserved and non-ASCII escapes stay encoded.
        assert_eq!(canonical("/events/a%20b"), "/events/a%20b");
        assert_eq!(canonical("/events/caf%C3%A9"), "/events/caf%C3%A9");
        assert_eq!(canonical("/events/100%"), "/events/100%");
    }

    #[test]
    fn test_empty_segments_are_collapsed() {
        assert_eq!(canonical("//admin"), "/admin");
        assert_eq!(canonical("/dashboard//overview"), "/dashboard/overview");
    }

    #[test]
    fn test_canonical_form_is_stable() {
        for raw in ["/events/../%61dmin", "//x/./../creator//a", "/%2e%2e/signup"] {
            let once = canonical(raw);
            assert_eq!(canonical(&once), once, "{} is not stable", raw);
        }
    }

    #[test]
    fn test_encoded_separators_are_refused() {
        for raw in ["/admin%2Fusers", "/events%2f..%2fadmin", "/admin%5Cusers"] {
            assert_eq!(
                canonical_path(raw),
                Err(PathError::EncodedSeparator(raw.to_string()))
            );
        }
    }
}
