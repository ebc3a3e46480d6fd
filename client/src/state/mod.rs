//! Application state shared through Leptos context.

pub mod auth;
pub mod auth_context;
