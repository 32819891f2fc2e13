use optcap_registry::{Candidate, Param, Passing, Receiver, TypeShape};
use syn::{
    FnArg, GenericArgument, GenericParam, Ident, Lifetime, PathArguments, ReturnType, Signature,
    Type, TypePath,
};

/// Describes a method signature as a matcher [`Candidate`].
///
/// Returns `None` for methods that can never satisfy a capability: `async`,
/// `unsafe`, `extern` and variadic functions, and functions with type or
/// const generics. Lifetime parameters are allowed, but a reference bound to
/// `'static` or to a lifetime of the impl block never matches.
pub(crate) fn candidate(sig: &Signature) -> Option<Candidate> {
    let generic = sig
        .generics
        .params
        .iter()
        .any(|param| !matches!(param, GenericParam::Lifetime(_)));

    if sig.asyncness.is_some()
        || sig.unsafety.is_some()
        || sig.abi.is_some()
        || sig.variadic.is_some()
        || generic
    {
        return None;
    }

    let local: Vec<&Ident> = sig
        .generics
        .lifetimes()
        .map(|param| &param.lifetime.ident)
        .collect();

    let mut receiver = Receiver::Static;
    let mut params = Vec::new();
    for input in &sig.inputs {
        match input {
            FnArg::Receiver(r) => receiver = receiver_of(r, &local),
            FnArg::Typed(typed) => params.push(param_of(&typed.ty, &local)),
        }
    }

    let output = match &sig.output {
        ReturnType::Default => TypeShape::Unit,
        ReturnType::Type(_, ty) => shape_of(ty),
    };

    Some(Candidate::new(sig.ident.to_string(), receiver, params, output))
}

/// Whether a reference's lifetime can be chosen freely by the caller: elided,
/// `'_`, or declared on the method itself.
///
/// A trait method with elided lifetimes cannot forward to one that requires
/// `'static` or a lifetime fixed by the impl block.
fn is_free(lifetime: Option<&Lifetime>, local: &[&Ident]) -> bool {
    match lifetime {
        None => true,
        Some(lifetime) => lifetime.ident == "_" || local.contains(&&lifetime.ident),
    }
}

fn receiver_of(r: &syn::Receiver, local: &[&Ident]) -> Receiver {
    if let Some((_, lifetime)) = &r.reference {
        return if !is_free(lifetime.as_ref(), local) {
            Receiver::Owned
        } else if r.mutability.is_some() {
            Receiver::Exclusive
        } else {
            Receiver::Shared
        };
    }

    // `self: &Self` and friends.
    match strip(&r.ty) {
        Type::Reference(reference)
            if is_self(&reference.elem) && is_free(reference.lifetime.as_ref(), local) =>
        {
            if reference.mutability.is_some() {
                Receiver::Exclusive
            } else {
                Receiver::Shared
            }
        }
        _ => Receiver::Owned,
    }
}

fn param_of(ty: &Type, local: &[&Ident]) -> Param {
    match strip(ty) {
        Type::Reference(reference) => {
            let passing = if reference.mutability.is_some() {
                Passing::Exclusive
            } else {
                Passing::Shared
            };
            let shape = if is_free(reference.lifetime.as_ref(), local) {
                shape_of(&reference.elem)
            } else {
                TypeShape::Unrecognized
            };
            Param::new(passing, shape)
        }
        ty => Param::new(Passing::Value, shape_of(ty)),
    }
}

/// Classifies a type by its trailing path segment.
///
/// `std::vec::Vec<f64>`, `Vec<f64>` and `optcap_core::VectorDouble` are all
/// [`TypeShape::VectorDouble`].
pub(crate) fn shape_of(ty: &Type) -> TypeShape {
    match strip(ty) {
        Type::Tuple(tuple) if tuple.elems.is_empty() => TypeShape::Unit,
        Type::Tuple(tuple) if tuple.elems.len() == 2 => {
            let both_vectors = tuple
                .elems
                .iter()
                .all(|elem| shape_of(elem) == TypeShape::VectorDouble);
            if both_vectors {
                TypeShape::Bounds
            } else {
                TypeShape::Unrecognized
            }
        }
        Type::Path(path) => path_shape(path),
        _ => TypeShape::Unrecognized,
    }
}

fn path_shape(path: &TypePath) -> TypeShape {
    let Some((ident, args)) = last_segment(path) else {
        return TypeShape::Unrecognized;
    };

    match (ident.as_str(), args) {
        ("usize", None) => TypeShape::Size,
        ("String", None) => TypeShape::Text,
        ("VectorDouble", None) => TypeShape::VectorDouble,
        ("SparsityPattern", None) => TypeShape::SparsityPattern,
        ("Vec", Some(elem)) => match shape_of(elem) {
            TypeShape::VectorDouble => TypeShape::VectorDoubles,
            TypeShape::SparsityPattern => TypeShape::SparsityPatterns,
            _ if is_named(elem, "f64") => TypeShape::VectorDouble,
            _ if is_index_pair(elem) => TypeShape::SparsityPattern,
            _ => TypeShape::Unrecognized,
        },
        _ => TypeShape::Unrecognized,
    }
}

/// Returns the last segment's name and its single generic type argument, if
/// it has exactly one. Qualified paths (`<T as Trait>::Item`) are rejected.
fn last_segment(path: &TypePath) -> Option<(String, Option<&Type>)> {
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    let ident = segment.ident.to_string();

    match &segment.arguments {
        PathArguments::None => Some((ident, None)),
        PathArguments::AngleBracketed(angle) if angle.args.len() == 1 => {
            match angle.args.first()? {
                GenericArgument::Type(ty) => Some((ident, Some(ty))),
                _ => None,
            }
        }
        _ => None,
    }
}

fn is_named(ty: &Type, name: &str) -> bool {
    match strip(ty) {
        Type::Path(path) => matches!(last_segment(path), Some((ident, None)) if ident == name),
        _ => false,
    }
}

fn is_index_pair(ty: &Type) -> bool {
    match strip(ty) {
        Type::Tuple(tuple) => {
            tuple.elems.len() == 2 && tuple.elems.iter().all(|elem| is_named(elem, "usize"))
        }
        _ => false,
    }
}

fn is_self(ty: &Type) -> bool {
    matches!(strip(ty), Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self"))
}

/// Looks through parentheses and invisible groups.
fn strip(ty: &Type) -> &Type {
    match ty {
        Type::Paren(paren) => strip(&paren.elem),
        Type::Group(group) => strip(&group.elem),
        ty => ty,
    }
}
