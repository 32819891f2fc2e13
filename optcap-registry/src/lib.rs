//! The capability registry shared by the optcap macros and runtime.
//!
//! A [`Capability`] names an optional behavior of an optimization problem and
//! lists the [`Operation`]s a type must provide, with exact signatures, to
//! have it. [`Capability::check`] compares those requirements against the
//! [`Candidate`] methods of a type.
//!
//! Extending the registry means adding a row to [`Capability`]; the matching
//! rules never change.

mod capability;
mod matcher;
mod signature;

pub use capability::{Capability, UnknownCapability};
pub use matcher::Mismatch;
pub use signature::{Candidate, Operation, Param, Passing, Receiver, TypeShape};
