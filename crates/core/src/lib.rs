//! Core business logic for Bahi.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `journal` - Single-sided journal lines and the ledger pairing engine
//! - `validation` - Ordered, non-short-circuiting rule packs per document type
//! - `accounts` - Chart-of-accounts classification and name inference
//! - `document` - Document types and the derived document model
//! - `numbering` - Document number formats and reservation state machine
//! - `snapshot` - Canonical preview payload hashing and snapshot states
//! - `funds` - Funds-and-facility headroom calculations
//! - `fiscal` - Fiscal calendar and period locks

pub mod accounts;
pub mod document;
pub mod fiscal;
pub mod funds;
pub mod journal;
pub mod numbering;
pub mod snapshot;
pub mod validation;
