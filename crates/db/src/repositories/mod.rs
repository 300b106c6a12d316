//! Repository functions and the posting services.
//!
//! Repository modules expose free async functions generic over
//! [`sea_orm::ConnectionTrait`] so the same code runs against a pooled
//! connection or inside an open transaction. The services (`PreviewService`,
//! `PostingService`, `SweepService`) own the transaction boundaries.

pub mod account;
pub mod funds;
pub mod posting;
pub mod preview;
pub mod series;
pub mod snapshot;
pub mod sweep;

pub use posting::{ConfirmRequest, DocumentRenderer, PostedReceipt, PostingService};
pub use preview::{PreviewOutcome, PreviewRequest, PreviewService, PreviewStatus};
pub use sweep::{SweepService, SweepStats};
