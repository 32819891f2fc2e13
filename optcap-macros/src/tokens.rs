use optcap_registry::{Capability, Operation, Param, Passing, Receiver, TypeShape};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Ident, Type};

/// Path of the capability trait in `optcap_core`.
pub(crate) fn trait_path(capability: Capability) -> TokenStream {
    let ident = format_ident!("{}", capability.trait_name());
    quote! { optcap_core::capability::#ident }
}

/// Generates a trait method that forwards to the inherent method of the same
/// name on `self_ty`.
pub(crate) fn forwarder(op: &Operation, self_ty: &Type) -> TokenStream {
    let name = format_ident!("{}", op.name);
    let args: Vec<Ident> = (0..op.params.len())
        .map(|index| format_ident!("arg{}", index))
        .collect();
    let params = op.params.iter().map(param_type);
    let output = output_type(op.output);

    let (receiver, call_self) = match op.receiver {
        Receiver::Shared => (quote! { &self, }, quote! { self, }),
        Receiver::Exclusive => (quote! { &mut self, }, quote! { self, }),
        Receiver::Owned => (quote! { self, }, quote! { self, }),
        Receiver::Static => (TokenStream::new(), TokenStream::new()),
    };

    quote! {
        fn #name(#receiver #(#args: #params),*) #output {
            <#self_ty>::#name(#call_self #(#args),*)
        }
    }
}

fn param_type(param: &Param) -> TokenStream {
    let ty = shape_type(param.shape);
    match param.passing {
        Passing::Value => ty,
        Passing::Shared => quote! { &#ty },
        Passing::Exclusive => quote! { &mut #ty },
    }
}

fn output_type(shape: TypeShape) -> TokenStream {
    match shape {
        TypeShape::Unit => TokenStream::new(),
        shape => {
            let ty = shape_type(shape);
            quote! { -> #ty }
        }
    }
}

fn shape_type(shape: TypeShape) -> TokenStream {
    match shape {
        TypeShape::VectorDouble => quote! { optcap_core::VectorDouble },
        TypeShape::Size => quote! { usize },
        TypeShape::Bounds => quote! { (optcap_core::VectorDouble, optcap_core::VectorDouble) },
        TypeShape::Text => quote! { String },
        TypeShape::SparsityPattern => quote! { optcap_core::SparsityPattern },
        TypeShape::VectorDoubles => quote! { Vec<optcap_core::VectorDouble> },
        TypeShape::SparsityPatterns => quote! { Vec<optcap_core::SparsityPattern> },
        TypeShape::Unit => quote! { () },
        TypeShape::Unrecognized => unreachable!("registry operations only use recognized types"),
    }
}
