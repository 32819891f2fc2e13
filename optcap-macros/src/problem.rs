use heck::ToSnakeCase;
use optcap_registry::{Candidate, Capability};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Error, Ident, ImplItem, ItemImpl, Result, Token, parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

use crate::{shape, tokens};

/// Arguments of `#[problem(...)]`.
#[derive(Debug, Default)]
pub(crate) struct Args {
    require: Vec<(Ident, Capability)>,
}

impl Parse for Args {
    /// Parses nothing, or `require(name, ...)`.
    fn parse(input: ParseStream) -> Result<Self> {
        if input.is_empty() {
            return Ok(Self::default());
        }

        let key: Ident = input.parse()?;
        if key != "require" {
            return Err(Error::new_spanned(
                key,
                "Unsupported argument. Expected `require(...)`.",
            ));
        }

        let content;
        parenthesized!(content in input);
        let names = Punctuated::<Ident, Token![,]>::parse_terminated(&content)?;

        let require = names
            .into_iter()
            .map(|name| -> Result<(Ident, Capability)> {
                let capability = name
                    .to_string()
                    .to_snake_case()
                    .parse::<Capability>()
                    .map_err(|err| Error::new_spanned(&name, err))?;
                Ok((name, capability))
            })
            .collect::<Result<_>>()?;

        if !input.is_empty() {
            return Err(input.error("Unexpected tokens after `require(...)`."));
        }

        Ok(Self { require })
    }
}

#[derive(Debug)]
pub(crate) struct Parsed {
    args: Args,
    item: ItemImpl,
    candidates: Vec<Candidate>,
}

impl Parsed {
    /// Validates the annotated item and collects its candidate methods.
    pub fn new(args: Args, item: ItemImpl) -> Result<Self> {
        if let Some((_, path, _)) = &item.trait_ {
            return Err(Error::new_spanned(
                path,
                "Unsupported impl block. This macro requires an inherent impl block.",
            ));
        }

        let candidates = item
            .items
            .iter()
            .filter_map(|item| match item {
                ImplItem::Fn(method) => shape::candidate(&method.sig),
                _ => None,
            })
            .collect();

        Ok(Self {
            args,
            item,
            candidates,
        })
    }

    /// Capabilities the annotated block satisfies, in registry order.
    fn conforming(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL
            .into_iter()
            .filter(|capability| capability.conforms(&self.candidates))
    }

    /// Generates the full token stream for the macro expansion.
    ///
    /// The annotated block is emitted unchanged, followed by one capability
    /// trait impl per conforming capability and a compile error for each
    /// required capability that does not conform.
    pub fn expand(self) -> TokenStream {
        let item = &self.item;
        let impls = self.conforming().map(|capability| self.capability_impl(capability));
        let errors = self.requirement_errors();

        quote! {
            #item
            #(#impls)*
            #errors
        }
    }

    fn capability_impl(&self, capability: Capability) -> TokenStream {
        let self_ty = &self.item.self_ty;
        let (impl_generics, _ty_generics, where_clause) = self.item.generics.split_for_impl();
        let trait_path = tokens::trait_path(capability);
        let methods = capability
            .operations()
            .iter()
            .map(|op| tokens::forwarder(op, self_ty));

        quote! {
            impl #impl_generics #trait_path for #self_ty #where_clause {
                #(#methods)*
            }
        }
    }

    fn requirement_errors(&self) -> TokenStream {
        let errors = self.args.require.iter().filter_map(|(name, capability)| {
            capability.check(&self.candidates).err().map(|mismatch| {
                Error::new_spanned(
                    name,
                    format!("missing the {capability} capability: {mismatch}"),
                )
                .to_compile_error()
            })
        });

        quote! { #(#errors)* }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_str;

    fn parse(args: &str, item: &str) -> Result<Parsed> {
        let args = parse_str::<Args>(args)?;
        let item = parse_str::<ItemImpl>(item)?;
        Parsed::new(args, item)
    }

    #[test]
    fn generates_forwarding_impls() {
        let input = "
            impl Sphere {
                fn fitness(&self, x: &VectorDouble) -> VectorDouble {
                    vec![x.iter().map(|v| v * v).sum()]
                }

                fn name(&self) -> String {
                    \"sphere\".into()
                }

                fn gradient(&mut self, x: &VectorDouble) -> VectorDouble {
                    x.iter().map(|v| 2.0 * v).collect()
                }
            }
        ";

        let parsed = parse("", input).expect("Parsing should succeed");
        let generated_code = parsed.expand();

        let expected_code = quote! {
            impl Sphere {
                fn fitness(&self, x: &VectorDouble) -> VectorDouble {
                    vec![x.iter().map(|v| v * v).sum()]
                }

                fn name(&self) -> String {
                    "sphere".into()
                }

                fn gradient(&mut self, x: &VectorDouble) -> VectorDouble {
                    x.iter().map(|v| 2.0 * v).collect()
                }
            }

            impl optcap_core::capability::Fitness for Sphere {
                fn fitness(&self, arg0: &optcap_core::VectorDouble) -> optcap_core::VectorDouble {
                    <Sphere>::fitness(self, arg0)
                }
            }

            impl optcap_core::capability::Name for Sphere {
                fn name(&self,) -> String {
                    <Sphere>::name(self,)
                }
            }
        };

        assert_eq!(generated_code.to_string(), expected_code.to_string());
    }

    #[test]
    fn supports_generics() {
        let input = "
            impl<T: Clone> Wrapped<T> where T: Default {
                fn dimension(&self) -> usize { 2 }
                fn bounds(&self) -> (Vec<f64>, Vec<f64>) { (vec![0.0; 2], vec![1.0; 2]) }
            }
        ";

        let parsed = parse("", input).expect("Parsing should succeed");
        let generated_code = parsed.expand();

        let expected_code = quote! {
            impl<T: Clone> Wrapped<T> where T: Default {
                fn dimension(&self) -> usize { 2 }
                fn bounds(&self) -> (Vec<f64>, Vec<f64>) { (vec![0.0; 2], vec![1.0; 2]) }
            }

            impl<T: Clone> optcap_core::capability::DimensionsBounds for Wrapped<T> where T: Default {
                fn dimension(&self,) -> usize {
                    <Wrapped<T> >::dimension(self,)
                }
                fn bounds(&self,) -> (optcap_core::VectorDouble, optcap_core::VectorDouble) {
                    <Wrapped<T> >::bounds(self,)
                }
            }
        };

        assert_eq!(generated_code.to_string(), expected_code.to_string());
    }

    #[test]
    fn partial_blocks_generate_nothing() {
        let input = "
            impl OnlySize {
                fn dimension(&self) -> usize { 1 }
                fn equality_constraint_count(&self) -> usize { 0 }
                fn inequality_constraint_count(&self) -> u32 { 0 }
            }
        ";

        let parsed = parse("", input).expect("Parsing should succeed");
        assert_eq!(parsed.conforming().count(), 0);
    }

    #[test]
    fn parses_required_capabilities() {
        let args = parse_str::<Args>("require(gradient, DimensionsBounds, extra_info)")
            .expect("Parsing should succeed");

        let required: Vec<_> = args.require.iter().map(|(_, c)| *c).collect();
        assert_eq!(
            required,
            [
                Capability::Gradient,
                Capability::DimensionsBounds,
                Capability::ExtraInfo
            ]
        );
    }

    #[test]
    fn unmet_requirement_is_a_compile_error() {
        let input = "
            impl Sphere {
                fn gradient(&mut self, x: &VectorDouble) -> VectorDouble { x.clone() }
            }
        ";

        let parsed = parse("require(gradient)", input).expect("Parsing should succeed");
        let errors = parsed.requirement_errors().to_string();

        assert!(errors.contains("compile_error"));
        assert!(errors.contains(
            "missing the gradient capability: `gradient` takes `&mut self` but `&self` is required"
        ));
    }

    #[test]
    fn met_requirement_adds_no_errors() {
        let input = "
            impl Named {
                fn name(&self) -> String { String::new() }
            }
        ";

        let parsed = parse("require(name)", input).expect("Parsing should succeed");
        assert!(parsed.requirement_errors().is_empty());
    }

    #[test]
    fn error_if_unknown_capability() {
        let error_message = parse_str::<Args>("require(jacobian)")
            .unwrap_err()
            .to_string();

        assert_eq!(error_message, "unknown capability `jacobian`");
    }

    #[test]
    fn error_if_unknown_argument() {
        let error_message = parse_str::<Args>("optional(gradient)")
            .unwrap_err()
            .to_string();

        assert_eq!(
            error_message,
            "Unsupported argument. Expected `require(...)`."
        );
    }

    #[test]
    fn error_if_trait_impl() {
        let error_message = parse("", "impl Clone for Sphere { fn clone(&self) -> Self { Sphere } }")
            .unwrap_err()
            .to_string();

        assert_eq!(
            error_message,
            "Unsupported impl block. This macro requires an inherent impl block."
        );
    }
}
