pub mod claims;
pub mod gate;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod utils;

pub use claims::Claims;
pub use gate::AuthGate;
pub use jwt::JwtService;
pub use middleware::{AuthMiddleware, AuthenticatedUser};
pub use utils::{require_admin, require_owner_or_admin, require_roles};
