use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

#[derive(Deserialize)]
struct Claims {
    /// Optional per RFC 7519; a token without it never expires
    #[serde(default)]
    exp: Option<i64>,
}

fn claims(token: &str) -> Option<Claims> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Seconds since epoch at which the JWT expires, if it is a JWT carrying `exp`
pub fn expires_at(token: &str) -> Option<i64> {
    claims(token)?.exp
}

/// True for a well-formed JWT whose `exp` is strictly after `now`, or that has no `exp`
pub fn is_unexpired(token: &str, now: i64) -> bool {
    match claims(token) {
        Some(Claims { exp: Some(exp) }) => exp > now,
        Some(Claims { exp: None }) => true,
        None => false,
    }
}

#[cfg(test)]
pub(crate) fn fake_jwt(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"id":"u1","type":"authRecord","exp":{}}}"#, exp));
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_is_read_from_payload() {
        assert_eq!(expires_at(&fake_jwt(1_900_000_000)), Some(1_900_000_000));
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let token = fake_jwt(1_900_000_000);
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1].push_str("==");
        assert_eq!(expires_at(&parts.join(".")), Some(1_900_000_000));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        assert_eq!(expires_at(""), None);
        assert_eq!(expires_at("abc"), None);
        assert_eq!(expires_at("a.b"), None);
        assert_eq!(expires_at("a.!!!.c"), None);
        assert_eq!(expires_at(&format!("{}.extra", fake_jwt(10))), None);
    }

    #[test]
    fn test_unexpired_compares_against_now() {
        let token = fake_jwt(1_000);
        assert!(is_unexpired(&token, 999));
        assert!(!is_unexpired(&token, 1_000));
        assert!(!is_unexpired("not-a-jwt", 0));
    }

    #[test]
    fn test_token_without_exp_never_expires() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(br#"{"id":"u1","type":"authRecord"}"#);
        let token = format!("{}.{}.signature", header, payload);

        assert_eq!(expires_at(&token), None);
        assert!(is_unexpired(&token, 0));
        assert!(is_unexpired(&token, i64::MAX));
    }

    #[test]
    fn test_payload_that_is_not_an_object_is_rejected() {
        let payload = URL_SAFE_NO_PAD.encode(br#""hello""#);
        assert!(!is_unexpired(&format!("h.{}.s", payload), 0));
    }
}
