//! Networking modules for the hosted auth API and remote functions.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session_store` defines the identity-provider contract, `supabase_auth`
//! implements it over HTTP, `functions` invokes hosted functions, and `types`
//! defines the shared wire schema.

pub mod functions;
pub mod session_store;
pub mod supabase_auth;
pub mod types;
