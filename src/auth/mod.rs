pub mod cookies;
pub mod middleware;
pub mod password;
pub mod session;
pub mod signing;

pub use cookies::{clear_session_cookie, read_cookie, session_cookie, session_token, SESSION_COOKIE};
pub use middleware::{MaybeUser, RequireAdmin};
pub use password::{hash_password, verify_password};
pub use session::{generate_session_token, is_expired, session_expiry};
pub use signing::CookieSigner;
