use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an operation borrows the value it is called on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Receiver {
    /// `&self`
    Shared,
    /// `&mut self`
    Exclusive,
    /// `self`
    Owned,
    /// No receiver (an associated function).
    Static,
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Shared => "&self",
            Self::Exclusive => "&mut self",
            Self::Owned => "self",
            Self::Static => "no receiver",
        };
        f.write_str(text)
    }
}

/// How a parameter is handed to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Passing {
    /// `T`
    Value,
    /// `&T`
    Shared,
    /// `&mut T`
    Exclusive,
}

/// The recognized types that appear in capability signatures.
///
/// Anything the matcher cannot place in one of these shapes becomes
/// [`TypeShape::Unrecognized`], which no requirement ever uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TypeShape {
    /// `VectorDouble`, i.e. `Vec<f64>`.
    VectorDouble,
    /// `usize`.
    Size,
    /// `(VectorDouble, VectorDouble)`, lower then upper bounds.
    Bounds,
    /// `String`.
    Text,
    /// `SparsityPattern`, i.e. `Vec<(usize, usize)>`.
    SparsityPattern,
    /// `Vec<VectorDouble>`.
    VectorDoubles,
    /// `Vec<SparsityPattern>`.
    SparsityPatterns,
    /// `()`.
    Unit,
    /// Any other type.
    Unrecognized,
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::VectorDouble => "VectorDouble",
            Self::Size => "usize",
            Self::Bounds => "(VectorDouble, VectorDouble)",
            Self::Text => "String",
            Self::SparsityPattern => "SparsityPattern",
            Self::VectorDoubles => "Vec<VectorDouble>",
            Self::SparsityPatterns => "Vec<SparsityPattern>",
            Self::Unit => "()",
            Self::Unrecognized => "an unrecognized type",
        };
        f.write_str(text)
    }
}

/// A single parameter: its passing mode and its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Param {
    pub passing: Passing,
    pub shape: TypeShape,
}

impl Param {
    /// Creates a parameter description.
    #[must_use]
    pub const fn new(passing: Passing, shape: TypeShape) -> Self {
        Self { passing, shape }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.passing {
            Passing::Value => write!(f, "{}", self.shape),
            Passing::Shared => write!(f, "&{}", self.shape),
            Passing::Exclusive => write!(f, "&mut {}", self.shape),
        }
    }
}

/// A required operation of a capability.
///
/// Operations are `'static` rows of the registry table and are shared by
/// every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    pub name: &'static str,
    pub receiver: Receiver,
    pub params: &'static [Param],
    pub output: TypeShape,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_signature(f, self.name, self.receiver, self.params, self.output)
    }
}

/// A method offered by a candidate type, as seen by the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub name: String,
    pub receiver: Receiver,
    pub params: Vec<Param>,
    pub output: TypeShape,
}

impl Candidate {
    /// Creates a candidate from its parts.
    pub fn new(
        name: impl Into<String>,
        receiver: Receiver,
        params: impl Into<Vec<Param>>,
        output: TypeShape,
    ) -> Self {
        Self {
            name: name.into(),
            receiver,
            params: params.into(),
            output,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_signature(f, &self.name, self.receiver, &self.params, self.output)
    }
}

fn write_signature(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    receiver: Receiver,
    params: &[Param],
    output: TypeShape,
) -> fmt::Result {
    write!(f, "fn {name}(")?;
    let mut first = true;
    if receiver != Receiver::Static {
        write!(f, "{receiver}")?;
        first = false;
    }
    for param in params {
        if !first {
            f.write_str(", ")?;
        }
        write!(f, "{param}")?;
        first = false;
    }
    f.write_str(")")?;
    if output != TypeShape::Unit {
        write!(f, " -> {output}")?;
    }
    Ok(())
}
