#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cognitive_complexity,
    unused_crate_dependencies,
    unused_extern_crates,
    clippy::unused_self,
    clippy::useless_let_if_seq,
    missing_debug_implementations,
    rust_2018_idioms
)]
#![allow(clippy::type_complexity, clippy::too_many_arguments, type_alias_bounds)]

//! # Integration
//!
//! Low-level plumbing shared by the rest of the workspace for composing web integrations: a
//! signed [`protocol::http::RestClient`] for bitFlyer's REST API, and the variable-cardinality
//! [`collection`] types (`OneOrMany`, `NoneOneOrMany`, `ClearableLifoQueue`) used at the seams
//! between components.

use crate::error::SocketError;
use serde::{Deserialize, Serialize};

/// All [`Error`](std::error::Error)s generated in Integration.
pub mod error;

/// Signed/unsigned HTTP REST request plumbing shared by `tucano-broker`'s order-management and
/// position-fetching calls.
pub mod protocol;

/// Variable-cardinality collection helpers ([`collection::OneOrMany`],
/// [`collection::NoneOneOrMany`], [`collection::ClearableLifoQueue`]) plus FNV-hashed maps/sets.
pub mod collection;

/// Generic stream adapters not specific to the execution pipeline's domain types.
pub mod stream;

/// [`Validator`]s are capable of determining if their internal state is satisfactory to fulfill
/// some use case defined by the implementor.
pub trait Validator {
    /// Check if `Self` is valid for some use case.
    fn validate(self) -> Result<Self, SocketError>
    where
        Self: Sized;
}

/// [`Transformer`]s are capable of transforming any `Input` into an iterator of
/// `Result<Self::Output, Self::Error>`s.
pub trait Transformer {
    type Error;
    type Input: for<'de> Deserialize<'de>;
    type Output;
    type OutputIter: IntoIterator<Item = Result<Self::Output, Self::Error>>;
    fn transform(&mut self, input: Self::Input) -> Self::OutputIter;
}

/// Determines if something is considered "unrecoverable", such as an unrecoverable error.
///
/// Note that the meaning of [`Unrecoverable`] may vary depending on the context.
pub trait Unrecoverable {
    fn is_unrecoverable(&self) -> bool;
}

/// Trait that communicates if something is terminal (eg/ requires shutdown or restart).
pub trait Terminal {
    fn is_terminal(&self) -> bool;
}

/// Indicates an `Iterator` or `Stream` has ended.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize,
)]
pub struct FeedEnded;
