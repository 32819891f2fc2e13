//! Build-time capability detection and contextual errors for optimization
//! problems.
//!
//! A framework that accepts user-defined problem types without a common base
//! type needs two things from this crate:
//!
//! - [`conforms!`] and [`capabilities!`] tell, at build time, which optional
//!   operations a concrete type provides. Each operation set is a trait in
//!   [`capability`]; a type gains it by implementing the trait or through the
//!   `#[problem]` attribute, which checks inherent method signatures against
//!   the [`Capability`] registry exactly.
//! - [`throw!`] returns an error built from its arguments, prefixing a text
//!   message with the enclosing function, file and line.
//!
//! ## Example
//!
//! ```
//! use optcap_core::{Capability, VectorDouble, capabilities, conforms, problem};
//!
//! struct Sphere;
//!
//! #[problem]
//! impl Sphere {
//!     fn fitness(&self, x: &VectorDouble) -> VectorDouble {
//!         vec![x.iter().map(|v| v * v).sum()]
//!     }
//!
//!     fn dimension(&self) -> usize {
//!         2
//!     }
//!
//!     fn bounds(&self) -> (VectorDouble, VectorDouble) {
//!         (vec![-5.0; 2], vec![5.0; 2])
//!     }
//!
//!     // Takes `&mut self`, so it is not a gradient capability.
//!     fn gradient(&mut self, x: &VectorDouble) -> VectorDouble {
//!         x.iter().map(|v| 2.0 * v).collect()
//!     }
//! }
//!
//! assert!(conforms!(Sphere, Fitness));
//! assert!(conforms!(Sphere, DimensionsBounds));
//! assert!(!conforms!(Sphere, Gradient));
//! assert!(capabilities!(Sphere).require::<Sphere>(Capability::Gradient).is_err());
//! ```
//!
//! ## Required capabilities
//!
//! `#[problem(require(..))]` turns a missing capability into a compile error
//! that names the first mismatching operation:
//!
//! ```compile_fail
//! use optcap_core::{VectorDouble, problem};
//!
//! struct Sloppy;
//!
//! // error: missing the gradient capability: `gradient` takes `&mut self`
//! // but `&self` is required
//! #[problem(require(Gradient))]
//! impl Sloppy {
//!     fn gradient(&mut self, x: &VectorDouble) -> VectorDouble {
//!         x.clone()
//!     }
//! }
//! ```

pub mod capability;
mod conform;
mod error;
pub mod raise;
mod types;

#[doc(hidden)]
pub use conform::probe;
pub use conform::CapabilitySet;
pub use error::Error;
pub use optcap_registry::{
    Candidate, Capability, Mismatch, Operation, Param, Passing, Receiver, TypeShape,
    UnknownCapability,
};
pub use raise::ErrorContext;
pub use types::{SparsityPattern, VectorDouble};

#[cfg(feature = "macros")]
pub use optcap_macros::problem;
