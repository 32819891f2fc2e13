//! One trait per registered capability.
//!
//! Implementing a trait by hand is the nominal way to declare a capability;
//! the compiler then checks the signature. The `#[problem]` attribute derives
//! these impls structurally from an inherent impl block instead.
//!
//! Signatures mirror [`Capability::operations`] exactly.
//!
//! [`Capability::operations`]: crate::Capability::operations

use crate::{SparsityPattern, VectorDouble};

/// Objective evaluation.
pub trait Fitness {
    /// Evaluates the objective (and constraint) vector at `x`.
    fn fitness(&self, x: &VectorDouble) -> VectorDouble;
}

/// Problem dimension together with its box bounds.
///
/// Both are needed to define a feasible search space, so they form one
/// capability.
pub trait DimensionsBounds {
    /// Number of decision variables.
    fn dimension(&self) -> usize;

    /// Lower and upper bounds, each of length [`DimensionsBounds::dimension`].
    fn bounds(&self) -> (VectorDouble, VectorDouble);
}

/// Constraint counts.
pub trait Constraints {
    fn equality_constraint_count(&self) -> usize;

    fn inequality_constraint_count(&self) -> usize;
}

pub trait Name {
    fn name(&self) -> String;
}

/// Free-form diagnostic text about a problem instance.
pub trait ExtraInfo {
    fn extra_info(&self) -> String;
}

pub trait Gradient {
    /// Evaluates the non-zero gradient entries at `x`.
    fn gradient(&self, x: &VectorDouble) -> VectorDouble;
}

pub trait GradientSparsity {
    /// Indices of the structurally non-zero gradient entries.
    fn gradient_sparsity(&self) -> SparsityPattern;
}

pub trait Hessians {
    /// Evaluates one hessian per fitness component at `x`.
    fn hessians(&self, x: &VectorDouble) -> Vec<VectorDouble>;
}

pub trait HessiansSparsity {
    fn hessians_sparsity(&self) -> Vec<SparsityPattern>;
}

pub trait ObjectiveCount {
    /// Number of objectives.
    fn objective_count(&self) -> usize;
}
