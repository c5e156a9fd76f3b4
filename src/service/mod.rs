pub mod bootstrap;
pub mod login;

pub use bootstrap::ensure_default_admin;
pub use login::{LoginOutcome, login};
