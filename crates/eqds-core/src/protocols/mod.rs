//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets and constants (source of truth)
//! - `reader`: bounds-checked byte access
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `printer`: one-line text rendering into a `TextSink`
//! - `error`: explicit, actionable errors
//!
//! Decoders are pure and contain no I/O; sources and analysis layers handle
//! file access and aggregation.

pub mod common;
pub mod eqds;
pub mod ip;
