//! ortho-core
//!
//! Pure domain types and the in-memory patient session store.
//! No network or filesystem dependency: this is the shared vocabulary of the
//! treatment planner.

pub mod error;
pub mod models;
pub mod store;
