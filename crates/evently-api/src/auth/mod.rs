// Authentication module
// Decision: stateless bearer tokens only; the server keeps no session state

pub mod jwt;
pub mod middleware;
pub mod routes;
pub mod service;

pub use jwt::TokenIssuer;
pub use middleware::AuthUser;
pub use routes::{routes, AppState};
pub use service::AuthService;
