use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::signature::{Operation, Param, Passing, Receiver, TypeShape};

/// An optional behavior a problem type may provide.
///
/// Each capability is satisfied by one or more [`Operation`]s, all of which
/// must match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Capability {
    /// Objective evaluation: `fitness(&self, &VectorDouble) -> VectorDouble`.
    Fitness,
    /// Problem dimension together with its box bounds.
    DimensionsBounds,
    /// Number of equality and inequality constraints.
    Constraints,
    /// Human-readable problem name.
    Name,
    /// Free-form diagnostic text.
    ExtraInfo,
    /// Non-zero gradient entries at a decision vector.
    Gradient,
    /// Indices of the structurally non-zero gradient entries.
    GradientSparsity,
    /// One hessian per fitness component at a decision vector.
    Hessians,
    /// Sparsity pattern of each hessian.
    HessiansSparsity,
    /// Number of objectives.
    ObjectiveCount,
}

const X: &[Param] = &[Param::new(Passing::Shared, TypeShape::VectorDouble)];

const fn accessor(name: &'static str, output: TypeShape) -> Operation {
    Operation {
        name,
        receiver: Receiver::Shared,
        params: &[],
        output,
    }
}

const fn of_x(name: &'static str, output: TypeShape) -> Operation {
    Operation {
        name,
        receiver: Receiver::Shared,
        params: X,
        output,
    }
}

const FITNESS: &[Operation] = &[of_x("fitness", TypeShape::VectorDouble)];
const DIMENSIONS_BOUNDS: &[Operation] = &[
    accessor("dimension", TypeShape::Size),
    accessor("bounds", TypeShape::Bounds),
];
const CONSTRAINTS: &[Operation] = &[
    accessor("equality_constraint_count", TypeShape::Size),
    accessor("inequality_constraint_count", TypeShape::Size),
];
const NAME: &[Operation] = &[accessor("name", TypeShape::Text)];
const EXTRA_INFO: &[Operation] = &[accessor("extra_info", TypeShape::Text)];
const GRADIENT: &[Operation] = &[of_x("gradient", TypeShape::VectorDouble)];
const GRADIENT_SPARSITY: &[Operation] =
    &[accessor("gradient_sparsity", TypeShape::SparsityPattern)];
const HESSIANS: &[Operation] = &[of_x("hessians", TypeShape::VectorDoubles)];
const HESSIANS_SPARSITY: &[Operation] =
    &[accessor("hessians_sparsity", TypeShape::SparsityPatterns)];
const OBJECTIVE_COUNT: &[Operation] = &[accessor("objective_count", TypeShape::Size)];

impl Capability {
    /// Every registered capability, in registry order.
    pub const ALL: [Capability; 10] = [
        Self::Fitness,
        Self::DimensionsBounds,
        Self::Constraints,
        Self::Name,
        Self::ExtraInfo,
        Self::Gradient,
        Self::GradientSparsity,
        Self::Hessians,
        Self::HessiansSparsity,
        Self::ObjectiveCount,
    ];

    /// The operations a type must provide, all with exact signatures.
    #[must_use]
    pub const fn operations(self) -> &'static [Operation] {
        match self {
            Self::Fitness => FITNESS,
            Self::DimensionsBounds => DIMENSIONS_BOUNDS,
            Self::Constraints => CONSTRAINTS,
            Self::Name => NAME,
            Self::ExtraInfo => EXTRA_INFO,
            Self::Gradient => GRADIENT,
            Self::GradientSparsity => GRADIENT_SPARSITY,
            Self::Hessians => HESSIANS,
            Self::HessiansSparsity => HESSIANS_SPARSITY,
            Self::ObjectiveCount => OBJECTIVE_COUNT,
        }
    }

    /// The snake-case key used in configuration and macro arguments.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Fitness => "fitness",
            Self::DimensionsBounds => "dimensions_bounds",
            Self::Constraints => "constraints",
            Self::Name => "name",
            Self::ExtraInfo => "extra_info",
            Self::Gradient => "gradient",
            Self::GradientSparsity => "gradient_sparsity",
            Self::Hessians => "hessians",
            Self::HessiansSparsity => "hessians_sparsity",
            Self::ObjectiveCount => "objective_count",
        }
    }

    /// The name of the trait that carries this capability.
    #[must_use]
    pub const fn trait_name(self) -> &'static str {
        match self {
            Self::Fitness => "Fitness",
            Self::DimensionsBounds => "DimensionsBounds",
            Self::Constraints => "Constraints",
            Self::Name => "Name",
            Self::ExtraInfo => "ExtraInfo",
            Self::Gradient => "Gradient",
            Self::GradientSparsity => "GradientSparsity",
            Self::Hessians => "Hessians",
            Self::HessiansSparsity => "HessiansSparsity",
            Self::ObjectiveCount => "ObjectiveCount",
        }
    }

    /// A short human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Fitness => "objective evaluation",
            Self::DimensionsBounds => "dimensions & bounds",
            Self::Constraints => "constraints",
            Self::Name => "name",
            Self::ExtraInfo => "extra diagnostic info",
            Self::Gradient => "gradient",
            Self::GradientSparsity => "gradient sparsity pattern",
            Self::Hessians => "hessians",
            Self::HessiansSparsity => "hessians sparsity pattern",
            Self::ObjectiveCount => "objective count",
        }
    }

    /// Position of this capability in [`Capability::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Returned when a key does not name a registered capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown capability `{key}`")]
pub struct UnknownCapability {
    pub key: String,
}

impl FromStr for Capability {
    type Err = UnknownCapability;

    /// Parses a snake-case key such as `gradient_sparsity`.
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|capability| capability.key() == key)
            .ok_or_else(|| UnknownCapability {
                key: key.to_owned(),
            })
    }
}
