#![deny(missing_docs)]

//! # vaxscan-core — Foundational Types for VaxScan
//!
//! This crate defines the types that the rest of the workspace builds on.
//! It has no internal crate dependencies; only `serde`, `thiserror`, and
//! `chrono` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Failures are values.** Every way a scanned payload can be unusable
//!    is a variant in the [`VaxscanError`] hierarchy. Nothing in the
//!    pipeline panics on malformed input; the text a user sees is produced
//!    at the result boundary, never inside a decoder.
//!
//! 2. **UTC inside, zone at the edge.** [`Timestamp`] is always UTC at
//!    second precision. The fixed interpretation zone lives in
//!    [`DisplayZone`] and is applied only when an instant is rendered.
//!
//! 3. **Configuration is explicit.** The display zone is an immutable value
//!    injected where it is needed, not process-global state. Tests can
//!    substitute zones deterministically.

pub mod error;
pub mod temporal;
pub mod zone;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{CredentialError, EnvelopeError, PeriodError, ScanError, VaxscanError};
pub use temporal::Timestamp;
pub use zone::DisplayZone;
