pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod utils;

pub use claims::Claims;
pub use jwt::{IdentityProvider, JwtService};
pub use middleware::{bearer_token, AuthMiddleware, AuthenticatedUser};
pub use utils::{
    extract_user_from_context, require_identified, require_instructor,
    require_self_or_instructor,
};
