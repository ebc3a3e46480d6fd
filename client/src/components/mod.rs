//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared views and read auth state from Leptos context
//! providers when they need it.

pub mod access_denied;
pub mod auth_gate;
