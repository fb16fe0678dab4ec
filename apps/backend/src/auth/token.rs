//! Access-token codec.
//!
//! A token is the standard padded base64 encoding of the three claims joined
//! as `userId:<id>:deviceType:<type>:expiresAt:<millis>`, keys always in that
//! order. The encoding is reversible by anyone: it carries no secret and no
//! signature, so it must not be mistaken for an authentication primitive.
//! Wire format is unversioned: changing key order or separator breaks every
//! issued token.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::warn;

pub const DEVICE_TYPE_MINIAPP: &str = "miniapp";

const USER_ID_KEY: &str = "userId";
const DEVICE_TYPE_KEY: &str = "deviceType";
const EXPIRES_AT_KEY: &str = "expiresAt";
const CLAIM_SEPARATOR: &str = ":";

/// Token lifetime: 7 days in milliseconds.
const TOKEN_TTL_MILLIS: i64 = 7 * 24 * 60 * 60 * 1000;

/// The fixed three-claim payload carried by a token. `expires_at` stays
/// string-encoded on the wire (Unix milliseconds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: String,
    pub device_type: String,
    pub expires_at: String,
}

/// Mint a token for `user_id` on `device_type`, expiring 7 days after `now`.
///
/// Never fails for well-formed inputs.
pub fn generate_token(user_id: &str, device_type: &str, now_millis: i64) -> String {
    let expires_at = (now_millis + TOKEN_TTL_MILLIS).to_string();
    let joined = join_claims(&[
        (USER_ID_KEY, user_id),
        (DEVICE_TYPE_KEY, device_type),
        (EXPIRES_AT_KEY, &expires_at),
    ]);
    BASE64.encode(joined.as_bytes())
}

/// Decode a token back into its claim set.
///
/// Returns `None` for empty input, invalid base64, non-UTF-8 payloads, an odd
/// key/value count, or a claim set missing any of the three keys. Never
/// panics: malformed input fails closed.
pub fn decode_token(token: &str) -> Option<TokenClaims> {
    if token.is_empty() {
        return None;
    }

    let bytes = match BASE64.decode(token) {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!("token is not valid base64");
            return None;
        }
    };
    let joined = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(_) => {
            warn!("token payload is not valid utf-8");
            return None;
        }
    };

    let claims = split_claims(&joined);
    let user_id = claims.get(USER_ID_KEY)?;
    let device_type = claims.get(DEVICE_TYPE_KEY)?;
    let expires_at = claims.get(EXPIRES_AT_KEY)?;

    Some(TokenClaims {
        user_id: user_id.clone(),
        device_type: device_type.clone(),
        expires_at: expires_at.clone(),
    })
}

/// Check a token against an expected user id and device type.
///
/// False when the token is undecodable or `expiresAt` is at or before `now`.
/// Otherwise true when the decoded user id **or** the decoded device type
/// matches (inclusive OR, kept exactly as the scheme defines it).
pub fn is_token_valid(
    token: &str,
    user_id: &str,
    device_type: &str,
    now_millis: i64,
) -> bool {
    let claims = match decode_token(token) {
        Some(claims) => claims,
        None => return false,
    };
    let expires_at = match claims.expires_at.parse::<i64>() {
        Ok(millis) => millis,
        Err(_) => return false,
    };
    if expires_at <= now_millis {
        return false;
    }
    claims.user_id == user_id || claims.device_type == device_type
}

/// Join `key, value` pairs into `key:value:key:value`.
fn join_claims(pairs: &[(&str, &str)]) -> String {
    let mut parts = Vec::with_capacity(pairs.len() * 2);
    for (key, value) in pairs {
        parts.push(*key);
        parts.push(*value);
    }
    parts.join(CLAIM_SEPARATOR)
}

/// Split a joined sequence back into a claim map. An odd token count signals
/// broken key/value pairing and yields an empty map.
fn split_claims(joined: &str) -> HashMap<String, String> {
    if joined.is_empty() {
        return HashMap::new();
    }

    let parts: Vec<&str> = joined.split(CLAIM_SEPARATOR).collect();
    if parts.len() % 2 != 0 {
        warn!("claim sequence has odd token count, treating as empty");
        return HashMap::new();
    }

    let mut map = HashMap::with_capacity(parts.len() / 2);
    for pair in parts.chunks(2) {
        // value may be an empty string, but is always present
        map.insert(pair[0].to_string(), pair[1].to_string());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_generate_and_decode_roundtrip() {
        let token = generate_token("FP17351234", DEVICE_TYPE_MINIAPP, NOW);
        let claims = decode_token(&token).unwrap();

        assert_eq!(claims.user_id, "FP17351234");
        assert_eq!(claims.device_type, "miniapp");
        assert_eq!(claims.expires_at, (NOW + TOKEN_TTL_MILLIS).to_string());
    }

    #[test]
    fn test_decode_known_claim_sequence() {
        // userId:FP17351234:deviceType:miniapp:expiresAt:1700000000000
        let token = BASE64.encode("userId:FP17351234:deviceType:miniapp:expiresAt:1700000000000");
        let claims = decode_token(&token).unwrap();

        assert_eq!(
            claims,
            TokenClaims {
                user_id: "FP17351234".to_string(),
                device_type: "miniapp".to_string(),
                expires_at: "1700000000000".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_empty_token() {
        assert_eq!(decode_token(""), None);
    }

    #[test]
    fn test_decode_not_base64() {
        assert_eq!(decode_token("not base64 at all!!"), None);
    }

    #[test]
    fn test_decode_odd_token_count() {
        // Five tokens after splitting: pairing is broken, must fail closed.
        let token = BASE64.encode("userId:FP17351234:deviceType:miniapp:expiresAt");
        assert_eq!(decode_token(&token), None);
    }

    #[test]
    fn test_decode_missing_claim() {
        let token = BASE64.encode("userId:FP17351234:deviceType:miniapp");
        assert_eq!(decode_token(&token), None);
    }

    #[test]
    fn test_empty_value_is_representable() {
        let token = BASE64.encode("userId::deviceType:miniapp:expiresAt:1700000000000");
        let claims = decode_token(&token).unwrap();
        assert_eq!(claims.user_id, "");
        assert_eq!(claims.device_type, "miniapp");
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let token = generate_token("FP17351234", DEVICE_TYPE_MINIAPP, NOW);
        let after_expiry = NOW + TOKEN_TTL_MILLIS + 1;
        assert!(!is_token_valid(&token, "FP17351234", "miniapp", after_expiry));
    }

    #[test]
    fn test_expiry_boundary_is_invalid() {
        let token = generate_token("FP17351234", DEVICE_TYPE_MINIAPP, NOW);
        let at_expiry = NOW + TOKEN_TTL_MILLIS;
        assert!(!is_token_valid(&token, "FP17351234", "miniapp", at_expiry));
    }

    #[test]
    fn test_validity_matches_user_id_only() {
        let token = generate_token("FP17351234", DEVICE_TYPE_MINIAPP, NOW);
        assert!(is_token_valid(&token, "FP17351234", "other-device", NOW));
    }

    #[test]
    fn test_validity_matches_device_type_only() {
        let token = generate_token("FP17351234", DEVICE_TYPE_MINIAPP, NOW);
        assert!(is_token_valid(&token, "FP99999999", "miniapp", NOW));
    }

    #[test]
    fn test_validity_rejects_when_neither_matches() {
        let token = generate_token("FP17351234", DEVICE_TYPE_MINIAPP, NOW);
        assert!(!is_token_valid(&token, "FP99999999", "other-device", NOW));
    }

    #[test]
    fn test_validity_rejects_garbage() {
        assert!(!is_token_valid("%%%", "FP17351234", "miniapp", NOW));
    }
}
