//! The rule pack.
//!
//! One module per concern; each rule is a value implementing [`Rule`]
//! (`crate::validation::Rule`). Packs are assembled in
//! `crate::validation::engine`.

pub mod balance;
pub mod dates;
pub mod duplicate;
pub mod funds;
pub mod gst;
pub mod idempotency;
pub mod instrument;
pub mod inventory;
pub mod ledger;
pub mod shape;
pub mod tds;
pub mod totals;
