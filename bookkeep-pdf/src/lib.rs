//! bookkeep-pdf: password recovery and text access for statement documents.
//!
//! The unlock state machine (`unlocker`) works against the `DocumentOpener`
//! seam; `lopdf_backend` is the production implementation.

pub mod document;
pub mod error;
pub mod lopdf_backend;
pub mod unlocker;

pub use document::{DocumentOpener, StatementDocument};
pub use error::{DocumentError, Result};
pub use lopdf_backend::{LopdfDocument, LopdfOpener};
pub use unlocker::{DocumentUnlocker, UnlockOutcome, UnlockedDocument};
