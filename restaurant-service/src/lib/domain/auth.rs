//! Request authentication and authorization.
//!
//! The [`resolver`] turns an `Authorization` header into an [`models::AuthContext`];
//! the [`guards`] decide what a resolved context may do.

pub mod errors;
pub mod guards;
pub mod models;
pub mod ports;
pub mod resolver;
