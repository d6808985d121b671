// Session tokens and request guards
pub mod gate;
pub mod token;

pub use gate::{authenticate, authorize, bearer_token, Authorized, RoleSet, Staff};
pub use token::{Claims, KeyProvider, Principal, StaticKeyProvider, TokenError, TokenService};
