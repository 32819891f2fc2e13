mod problem;
mod shape;
mod tokens;

use proc_macro::TokenStream;
use syn::{ItemImpl, parse_macro_input};

/// Implements capability traits for the methods of an inherent impl block
/// whose signatures match the capability registry exactly.
///
/// The block is emitted unchanged. For every capability whose operations all
/// appear in the block with the exact registered signature, the macro adds an
/// impl of the matching `optcap_core::capability` trait that forwards to the
/// inherent methods. A method that differs in receiver, parameter passing,
/// parameter type or return type contributes nothing, so the type simply does
/// not have that capability.
///
/// All operations of a multi-operation capability (such as `dimension` and
/// `bounds`) must appear in the same annotated block.
///
/// ## Arguments
///
/// - `require(name, ...)`: capabilities that must be satisfied. Each one
///   that is not produces a compile error explaining the first mismatch.
///   Names may be written in snake case (`gradient_sparsity`) or in camel
///   case (`GradientSparsity`).
///
/// ## Example
///
/// ### Input
///
/// ```ignore
/// #[problem]
/// impl Sphere {
///     fn fitness(&self, x: &VectorDouble) -> VectorDouble {
///         vec![x.iter().map(|v| v * v).sum()]
///     }
///
///     fn gradient(&mut self, x: &VectorDouble) -> VectorDouble {
///         x.iter().map(|v| 2.0 * v).collect()
///     }
/// }
/// ```
///
/// ### Expanded
///
/// ```ignore
/// impl Sphere {
///     // ... unchanged ...
/// }
///
/// impl optcap_core::capability::Fitness for Sphere {
///     fn fitness(&self, arg0: &optcap_core::VectorDouble) -> optcap_core::VectorDouble {
///         <Sphere>::fitness(self, arg0)
///     }
/// }
///
/// // No `Gradient` impl: `gradient` takes `&mut self`.
/// ```
#[proc_macro_attribute]
pub fn problem(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as problem::Args);
    let item = parse_macro_input!(item as ItemImpl);

    match problem::Parsed::new(args, item) {
        Ok(parsed) => parsed.expand().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
