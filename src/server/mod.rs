pub mod extract;
pub mod handlers;
pub mod router;

pub use extract::AuthClaims;
pub use router::{AppState, api_router};
