use axum::http::{header::COOKIE, HeaderMap, HeaderValue};

/// `Set-Cookie` value that deletes the credential cookie.
pub const CLEAR_TOKEN_COOKIE: &str =
    "token=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT";

/// Find a cookie value across every `Cookie` header of the request.
///
/// The first occurrence wins; surrounding quotes are dropped.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            if key.trim() == name {
                Some(value.trim().trim_matches('"'))
            } else {
                None
            }
        })
}

pub fn clear_token_cookie() -> HeaderValue {
    HeaderValue::from_static(CLEAR_TOKEN_COOKIE)
}
