use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::auth::token::TokenIssuer;
use crate::db::{OrgStore, SqlitePool, UserStore};
use crate::server::handlers::{orgs, users};

/// Shared handler state: the two stores and the token issuer. Everything is
/// constructed explicitly in `main` (or a test) and injected here; there is
/// no ambient global.
#[derive(Clone)]
pub struct AppState {
    pub users: UserStore,
    pub orgs: OrgStore,
    pub tokens: TokenIssuer,
}

impl AppState {
    pub fn new(pool: SqlitePool, tokens: TokenIssuer) -> Self {
        Self {
            users: UserStore::new(pool.clone()),
            orgs: OrgStore::new(pool),
            tokens,
        }
    }
}

/// Build the API router. User management and login are open; organization
/// and department routes sit behind the bearer session extractor.
pub fn api_router(state: AppState) -> Router {
    // browser client may be served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(users::login))
        .route("/api/users/login", post(users::login))
        .route("/api/users", post(users::create).get(users::list))
        .route(
            "/api/users/{id}",
            get(users::get_by_id).put(users::update).delete(users::remove),
        )
        .route("/api/orgs", post(orgs::create_org).get(orgs::list_orgs))
        .route(
            "/api/orgs/{id}",
            get(orgs::get_org).put(orgs::update_org).delete(orgs::delete_org),
        )
        .route("/api/dept", post(orgs::create_dept).get(orgs::list_depts))
        .route(
            "/api/dept/{id}",
            get(orgs::get_dept)
                .put(orgs::update_dept)
                .delete(orgs::delete_dept),
        )
        .layer(cors)
        .with_state(state)
}
