//! HTTP request handlers.
//!
//! Handlers never validate: they extract, delegate to a service, and return
//! the result as JSON. Any failure, including a body that cannot be
//! extracted, becomes a 500 via [`AppError`](crate::error::AppError).

pub mod health;
pub mod subject;
pub mod user;
