//! # Analytics
//!
//! The [`Trade`] P&L record (§3) — per spec.md's explicit carve-out, this crate documents the
//! record shape a future bookkeeping engine would populate; it computes no profit, ROC, or
//! drawdown itself.
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub mod trade;

pub use trade::Trade;
