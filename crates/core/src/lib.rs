//! Pure domain logic for CivilCRM: entity models, the view derivation
//! engine, aggregate summaries, and attendance ledger math.
//!
//! This crate has zero internal dependencies so the session layer, the
//! store, and any future CLI tooling can all use it. Everything here is
//! synchronous and pure: identical inputs produce identical outputs, with
//! no hidden mutable state between calls.

pub mod attendance;
pub mod client;
pub mod datekey;
pub mod error;
pub mod material;
pub mod numeric;
pub mod project;
pub mod types;
pub mod view;
pub mod worker;
