//! Signed bearer tokens: claims payload and the HS256 codec.

pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use errors::JwtError;
pub use handler::JwtHandler;
