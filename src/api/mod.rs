//! HTTP surface of the service.
//!
//! Handlers stay thin: they extract and validate input, call one application
//! service, and shape the JSON reply. Authentication and rate limiting live in
//! [`middleware`], request and response bodies in [`dto`], and the URL table in
//! [`routes`].

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
