//! Domain services called by the function handlers.

pub mod identity;
pub mod names;
