use std::time::Duration;

use axum::http::HeaderMap;

use super::CookieSigner;

/// Name of the signed session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Read a cookie value from request headers.
#[must_use]
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all("cookie")
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then_some(value)
        })
}

/// The verified session token carried by the request, if any.
#[must_use]
pub fn session_token<'a>(headers: &'a HeaderMap, signer: &CookieSigner) -> Option<&'a str> {
    read_cookie(headers, SESSION_COOKIE).and_then(|signed| signer.verify(signed))
}

/// `Set-Cookie` value carrying a signed session token.
#[must_use]
pub fn session_cookie(signer: &CookieSigner, token: &str, ttl: Duration, secure: bool) -> String {
    let value = signer.sign(token);
    let max_age = ttl.as_secs();
    let secure = if secure { "; Secure" } else { "" };
    format!("{SESSION_COOKIE}={value}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}{secure}")
}

/// `Set-Cookie` value removing the session cookie.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0{secure}")
}
