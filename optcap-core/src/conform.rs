use std::{any::type_name, fmt};

use crate::{Capability, Error};

/// Evaluates, at build time, whether a type has a capability.
///
/// The first argument is a concrete type, the second the name of a trait in
/// [`capability`](crate::capability). The result is a `const` boolean: `true`
/// when the type implements the trait, either by hand or through
/// `#[problem]`, and `false` otherwise. A missing capability is never an
/// error.
///
/// The query relies on an inherent constant shadowing a blanket trait
/// fallback, so it must be given a concrete type rather than a generic
/// parameter. The helper items live in this crate, so any type name is
/// accepted.
///
/// # Example
///
/// ```
/// use optcap_core::{capability::Name, conforms};
///
/// struct Named;
///
/// impl Name for Named {
///     fn name(&self) -> String {
///         "named".into()
///     }
/// }
///
/// const HAS_NAME: bool = conforms!(Named, Name);
///
/// assert!(HAS_NAME);
/// assert!(!conforms!(Named, Gradient));
/// ```
#[macro_export]
macro_rules! conforms {
    ($ty:ty, $capability:ident $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::probe::Absent as _;
        <$crate::probe::$capability<$ty>>::PRESENT
    }};
}

/// Per-capability probe types behind [`conforms!`].
///
/// `PRESENT` resolves to the inherent constant when the trait bound holds and
/// to the blanket [`Absent`] default otherwise.
#[doc(hidden)]
pub mod probe {
    use std::marker::PhantomData;

    pub trait Absent {
        const PRESENT: bool = false;
    }

    impl<T: ?Sized> Absent for T {}

    macro_rules! probes {
        ($($capability:ident),* $(,)?) => {$(
            pub struct $capability<T: ?Sized>(PhantomData<T>);

            impl<T: ?Sized + crate::capability::$capability> $capability<T> {
                pub const PRESENT: bool = true;
            }
        )*};
    }

    probes!(
        Fitness,
        DimensionsBounds,
        Constraints,
        Name,
        ExtraInfo,
        Gradient,
        GradientSparsity,
        Hessians,
        HessiansSparsity,
        ObjectiveCount,
    );
}

/// Collects every registered capability of a concrete type into a
/// [`CapabilitySet`], at build time.
///
/// ```
/// use optcap_core::{Capability, capabilities, capability::ExtraInfo};
///
/// struct Verbose;
///
/// impl ExtraInfo for Verbose {
///     fn extra_info(&self) -> String {
///         String::new()
///     }
/// }
///
/// const CAPS: optcap_core::CapabilitySet = capabilities!(Verbose);
///
/// assert!(CAPS.contains(Capability::ExtraInfo));
/// assert_eq!(CAPS.len(), 1);
/// ```
#[macro_export]
macro_rules! capabilities {
    ($ty:ty $(,)?) => {
        $crate::CapabilitySet::EMPTY
            .with_if($crate::Capability::Fitness, $crate::conforms!($ty, Fitness))
            .with_if(
                $crate::Capability::DimensionsBounds,
                $crate::conforms!($ty, DimensionsBounds),
            )
            .with_if(
                $crate::Capability::Constraints,
                $crate::conforms!($ty, Constraints),
            )
            .with_if($crate::Capability::Name, $crate::conforms!($ty, Name))
            .with_if($crate::Capability::ExtraInfo, $crate::conforms!($ty, ExtraInfo))
            .with_if($crate::Capability::Gradient, $crate::conforms!($ty, Gradient))
            .with_if(
                $crate::Capability::GradientSparsity,
                $crate::conforms!($ty, GradientSparsity),
            )
            .with_if($crate::Capability::Hessians, $crate::conforms!($ty, Hessians))
            .with_if(
                $crate::Capability::HessiansSparsity,
                $crate::conforms!($ty, HessiansSparsity),
            )
            .with_if(
                $crate::Capability::ObjectiveCount,
                $crate::conforms!($ty, ObjectiveCount),
            )
    };
}

/// A set of capabilities, usually built with [`capabilities!`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet {
    bits: u32,
}

impl CapabilitySet {
    pub const EMPTY: Self = Self { bits: 0 };

    pub const ALL: Self = {
        let mut set = Self::EMPTY;
        let mut index = 0;
        while index < Capability::ALL.len() {
            set = set.with(Capability::ALL[index]);
            index += 1;
        }
        set
    };

    /// Returns this set with `capability` added.
    #[must_use]
    pub const fn with(self, capability: Capability) -> Self {
        Self {
            bits: self.bits | (1 << capability.index()),
        }
    }

    /// Returns this set with `capability` added when `present` is `true`.
    #[must_use]
    pub const fn with_if(self, capability: Capability, present: bool) -> Self {
        if present { self.with(capability) } else { self }
    }

    #[must_use]
    pub const fn contains(self, capability: Capability) -> bool {
        self.bits & (1 << capability.index()) != 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Registered capabilities that are not in this set.
    #[must_use]
    pub const fn missing(self) -> Self {
        Self {
            bits: Self::ALL.bits & !self.bits,
        }
    }

    /// Iterates over the capabilities in registry order.
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL
            .into_iter()
            .filter(move |capability| self.contains(*capability))
    }

    /// Requires `capability` of `T`, whose capabilities this set describes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCapability`] naming `T` if the capability is
    /// absent.
    pub fn require<T: ?Sized>(self, capability: Capability) -> Result<(), Error> {
        if !self.contains(capability) {
            crate::throw!(
                Error,
                Error::MissingCapability {
                    type_name: type_name::<T>(),
                    capability,
                }
            );
        }
        Ok(())
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

/// Lists descriptions in registry order, or `none`.
impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (index, capability) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{capability}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        VectorDouble,
        capability::{DimensionsBounds, Fitness, Gradient},
    };

    struct Empty;

    struct Box2d;

    impl DimensionsBounds for Box2d {
        fn dimension(&self) -> usize {
            2
        }

        fn bounds(&self) -> (VectorDouble, VectorDouble) {
            (vec![-1.0, -1.0], vec![1.0, 1.0])
        }
    }

    struct Linear;

    impl Fitness for Linear {
        fn fitness(&self, x: &VectorDouble) -> VectorDouble {
            vec![x.iter().sum()]
        }
    }

    impl Gradient for Linear {
        fn gradient(&self, x: &VectorDouble) -> VectorDouble {
            vec![1.0; x.len()]
        }
    }

    #[test]
    fn empty_type_has_nothing() {
        assert!(!conforms!(Empty, Fitness));
        assert!(!conforms!(Empty, DimensionsBounds));
        assert_eq!(capabilities!(Empty), CapabilitySet::EMPTY);
    }

    #[test]
    fn hand_written_impls_conform() {
        const LINEAR: CapabilitySet = capabilities!(Linear);

        assert!(conforms!(Linear, Fitness));
        assert!(conforms!(Linear, Gradient));
        assert!(!conforms!(Linear, Hessians));
        assert_eq!(
            LINEAR.iter().collect::<Vec<_>>(),
            [Capability::Fitness, Capability::Gradient]
        );
        assert!(conforms!(Box2d, DimensionsBounds));
    }

    /// Shares names with the items `conforms!` uses internally.
    struct Probe;

    impl crate::capability::Name for Probe {
        fn name(&self) -> String {
            "probe".into()
        }
    }

    struct Absent;

    #[test]
    fn any_type_name_can_be_queried() {
        assert!(conforms!(Probe, Name));
        assert!(!conforms!(Probe, Fitness));
        assert!(!conforms!(Absent, Name));
        assert_eq!(capabilities!(Absent), CapabilitySet::EMPTY);
        assert_eq!(
            capabilities!(Probe),
            CapabilitySet::EMPTY.with(Capability::Name)
        );
    }

    #[test]
    fn reference_types_are_distinct() {
        assert!(!conforms!(&Linear, Fitness));
    }

    #[test]
    fn all_contains_every_capability() {
        assert_eq!(CapabilitySet::ALL.len(), Capability::ALL.len());
        assert!(Capability::ALL.into_iter().all(|c| CapabilitySet::ALL.contains(c)));
        assert_eq!(CapabilitySet::ALL.missing(), CapabilitySet::EMPTY);
    }

    #[test]
    fn missing_is_the_complement() {
        let set: CapabilitySet = [Capability::Name, Capability::Hessians].into_iter().collect();
        let missing = set.missing();

        assert_eq!(missing.len(), Capability::ALL.len() - 2);
        assert!(!missing.contains(Capability::Name));
        assert!(missing.contains(Capability::Gradient));
    }

    #[test]
    fn display_lists_descriptions() {
        let set = CapabilitySet::EMPTY
            .with(Capability::GradientSparsity)
            .with(Capability::Fitness);

        assert_eq!(
            set.to_string(),
            "objective evaluation, gradient sparsity pattern"
        );
        assert_eq!(CapabilitySet::EMPTY.to_string(), "none");
    }

    #[test]
    fn require_reports_the_type_and_capability() {
        const BOX: CapabilitySet = capabilities!(Box2d);

        assert_eq!(BOX.require::<Box2d>(Capability::DimensionsBounds), Ok(()));

        let error = BOX.require::<Box2d>(Capability::Gradient).unwrap_err();
        assert_eq!(
            error,
            Error::MissingCapability {
                type_name: type_name::<Box2d>(),
                capability: Capability::Gradient,
            }
        );
        assert!(error.to_string().ends_with("Box2d` does not provide the gradient capability"));
    }
}
