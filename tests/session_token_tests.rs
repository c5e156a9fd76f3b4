use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use serde_json::Value;

use orgmanage::ApiError;
use orgmanage::auth::token::TokenIssuer;
use orgmanage::db::models::{Role, User};

fn sample_user() -> User {
    User {
        id: 7,
        name: "A".to_string(),
        email: "a@x.com".to_string(),
        password_digest: "$2b$10$unused".to_string(),
        role: Role::User,
    }
}

#[test]
fn issue_then_verify_returns_original_claims() {
    let issuer = TokenIssuer::new("s3cret");
    let token = issuer.issue(&sample_user()).expect("issue failed");

    let claims = issuer.verify(&token).expect("verify failed");
    assert_eq!(claims.id, 7);
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.role, Role::User);
}

#[test]
fn claims_are_readable_by_the_bearer() {
    // tamper-evident, not confidential: the payload segment is plain
    // base64url JSON
    let issuer = TokenIssuer::new("s3cret");
    let token = issuer.issue(&sample_user()).expect("issue failed");

    let payload_b64 = token.split('.').nth(1).expect("token had no payload");
    let payload = URL_SAFE_NO_PAD.decode(payload_b64).expect("payload not base64url");
    let value: Value = serde_json::from_slice(&payload).expect("payload not json");

    assert_eq!(value["email"], "a@x.com");
    assert_eq!(value["role"], "user");
    assert!(value["exp"].is_i64());
}

#[test]
fn expired_token_is_invalid() {
    let issuer = TokenIssuer::with_ttl("s3cret", Duration::seconds(-120));
    let token = issuer.issue(&sample_user()).expect("issue failed");

    assert!(matches!(issuer.verify(&token), Err(ApiError::InvalidToken)));
}

#[test]
fn tampered_signature_is_invalid() {
    let issuer = TokenIssuer::new("s3cret");
    let token = issuer.issue(&sample_user()).expect("issue failed");

    let (head, sig) = token.rsplit_once('.').expect("token had no signature");
    let mut sig_bytes = sig.as_bytes().to_vec();
    sig_bytes[0] = if sig_bytes[0] == b'A' { b'B' } else { b'A' };
    let tampered = format!("{head}.{}", String::from_utf8(sig_bytes).expect("utf8"));
    assert_ne!(tampered, token);

    assert!(matches!(issuer.verify(&tampered), Err(ApiError::InvalidToken)));
}

#[test]
fn token_signed_with_other_secret_is_invalid() {
    let issuer = TokenIssuer::new("s3cret");
    let other = TokenIssuer::new("different-secret");
    let token = other.issue(&sample_user()).expect("issue failed");

    assert!(matches!(issuer.verify(&token), Err(ApiError::InvalidToken)));
}

#[test]
fn malformed_token_is_invalid() {
    let issuer = TokenIssuer::new("s3cret");
    assert!(matches!(issuer.verify("not.a.jwt"), Err(ApiError::InvalidToken)));
    assert!(matches!(issuer.verify(""), Err(ApiError::InvalidToken)));
}
