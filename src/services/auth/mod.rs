pub mod access_jwt;
pub mod claims;
pub mod factory;
pub mod resolver;
pub mod revocation;
pub mod service;

pub use claims::CanonicalUser;
pub use factory::build_auth_service;
pub use resolver::{InactiveUser, Unauthorized, ensure_active};
pub use service::AuthService;
