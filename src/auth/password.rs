use crate::error::ApiError;
use tokio::task;

/// bcrypt work factor. Interactive latency stays in the tens of
/// milliseconds while offline brute force remains expensive.
pub const HASH_COST: u32 = 10;

/// Hash a plaintext password into a salted bcrypt digest.
///
/// Each call embeds a fresh random salt, so two digests of the same
/// plaintext never compare equal; only [`verify_password`] can match them.
/// The hash runs on the blocking pool so the cost factor does not stall the
/// async reactor.
pub async fn hash_password(plain: &str) -> Result<String, ApiError> {
    let plain = plain.to_owned();
    let digest = task::spawn_blocking(move || bcrypt::hash(plain, HASH_COST)).await??;
    Ok(digest)
}

/// Check a plaintext against a stored digest.
///
/// Recomputes the hash with the salt embedded in `digest` and compares in
/// constant time. Errors only on a malformed digest, never on the content of
/// the plaintext.
pub async fn verify_password(plain: &str, digest: &str) -> Result<bool, ApiError> {
    let plain = plain.to_owned();
    let digest = digest.to_owned();
    let matched = task::spawn_blocking(move || bcrypt::verify(plain, &digest)).await??;
    Ok(matched)
}
