//! Access-token signing, refresh-token generation, and TTL parsing.

pub mod claims;
pub mod issuer;
pub mod ttl;

pub use claims::Claims;
pub use issuer::{SignedAccessToken, TokenIssuer};
pub use ttl::TtlSpec;
