//! Exact signature matching between registry operations and candidates.
//!
//! Matching is strict. Names, receivers, parameter passing, parameter types
//! and output types must all be identical; there is no notion of a compatible
//! or convertible signature.

use thiserror::Error;

use crate::{
    capability::Capability,
    signature::{Candidate, Operation, Param, Receiver, TypeShape},
};

/// Why a candidate type does not satisfy an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Mismatch {
    #[error("`{operation}` is not provided")]
    Missing { operation: &'static str },

    #[error("`{operation}` takes `{found}` but `{expected}` is required")]
    Receiver {
        operation: &'static str,
        expected: Receiver,
        found: Receiver,
    },

    #[error("`{operation}` takes {found} parameter(s) but {expected} are required")]
    Arity {
        operation: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("parameter {index} of `{operation}` is `{found}` but `{expected}` is required")]
    Parameter {
        operation: &'static str,
        index: usize,
        expected: Param,
        found: Param,
    },

    #[error("`{operation}` returns {found} but `{expected}` is required")]
    Output {
        operation: &'static str,
        expected: TypeShape,
        found: TypeShape,
    },
}

impl Operation {
    /// Checks a candidate method against this operation.
    ///
    /// The candidate's name is not compared here; see [`Capability::check`].
    ///
    /// # Errors
    ///
    /// Returns the first [`Mismatch`] found, checking the receiver, the arity,
    /// each parameter in order, and finally the output.
    pub fn check(&self, candidate: &Candidate) -> Result<(), Mismatch> {
        let operation = self.name;

        if candidate.receiver != self.receiver {
            return Err(Mismatch::Receiver {
                operation,
                expected: self.receiver,
                found: candidate.receiver,
            });
        }

        if candidate.params.len() != self.params.len() {
            return Err(Mismatch::Arity {
                operation,
                expected: self.params.len(),
                found: candidate.params.len(),
            });
        }

        for (index, (expected, found)) in self.params.iter().zip(&candidate.params).enumerate() {
            if expected != found {
                return Err(Mismatch::Parameter {
                    operation,
                    index,
                    expected: *expected,
                    found: *found,
                });
            }
        }

        if candidate.output != self.output {
            return Err(Mismatch::Output {
                operation,
                expected: self.output,
                found: candidate.output,
            });
        }

        Ok(())
    }
}

impl Capability {
    /// Checks whether a set of candidate methods satisfies this capability.
    ///
    /// Every required operation must be present by name and match exactly.
    /// Candidates that do not correspond to any required operation are ignored.
    ///
    /// # Errors
    ///
    /// Returns the [`Mismatch`] of the first operation that fails.
    pub fn check<'a, I>(self, candidates: I) -> Result<(), Mismatch>
    where
        I: IntoIterator<Item = &'a Candidate>,
        I::IntoIter: Clone,
    {
        let candidates = candidates.into_iter();

        for op in self.operations() {
            let found = candidates
                .clone()
                .find(|candidate| candidate.name == op.name)
                .ok_or(Mismatch::Missing {
                    operation: op.name,
                })?;
            op.check(found)?;
        }

        Ok(())
    }

    /// Returns `true` if the candidates satisfy this capability exactly.
    pub fn conforms<'a, I>(self, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a Candidate>,
        I::IntoIter: Clone,
    {
        self.check(candidates).is_ok()
    }
}
