//! Single-sided journal lines and the ledger pairing engine.
//!
//! Upstream collaborators propose transactions as single-sided lines (one
//! account, one side, one amount). Only balanced double-entry pairs are ever
//! persisted; the pairing engine converts between the two shapes.

pub mod line;
pub mod pair;

#[cfg(test)]
mod pair_props;

pub use line::{JournalLine, Side};
pub use pair::{pair_lines, LedgerPair};
