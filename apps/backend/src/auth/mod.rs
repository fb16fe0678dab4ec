//! Request authentication: token codec, per-route policy resolution, and the
//! request-scoped user context populated by the guard middleware.

pub mod authenticator;
pub mod policy;
pub mod token;
pub mod user_context;

pub use policy::{AuthPolicy, PolicyRegistry};
pub use token::TokenClaims;
