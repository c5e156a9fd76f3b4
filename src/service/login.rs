use crate::auth::password;
use crate::auth::token::TokenIssuer;
use crate::db::UserStore;
use crate::db::models::UserProfile;
use crate::error::ApiError;

/// Successful login: the bearer token plus the account, digest stripped.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserProfile,
}

/// Authenticate an email/password pair and mint a session token.
///
/// Lookup miss and password mismatch are distinct errors on purpose; the
/// wire contract distinguishes them (see `ApiError::UserNotFound`). No
/// session state is persisted anywhere: the token is the session.
pub async fn login(
    users: &UserStore,
    tokens: &TokenIssuer,
    email: &str,
    plain_password: &str,
) -> Result<LoginOutcome, ApiError> {
    let user = users
        .find_by_email(email)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    if !password::verify_password(plain_password, &user.password_digest).await? {
        return Err(ApiError::InvalidCredentials);
    }

    let token = tokens.issue(&user)?;
    Ok(LoginOutcome {
        token,
        user: user.into(),
    })
}
