// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The `#[verdict::main]` attribute macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{punctuated::Punctuated, Expr, ExprLit, ItemFn, Lit, LitStr, Meta, Path, Token};

/// Parsed attributes from `#[verdict::main(...)]`.
#[derive(Default, Debug)]
struct MainAttrs {
    /// Suite name printed in the banner
    name: Option<LitStr>,
    /// Path to the verdict crate, for renamed dependencies
    krate: Option<Path>,
}

fn string_value(meta_value: Expr) -> syn::Result<LitStr> {
    match meta_value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit_str),
            ..
        }) => Ok(lit_str),
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}

impl Parse for MainAttrs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut result = MainAttrs::default();

        // Shorthand: #[verdict::main("Suite name")]
        if input.peek(LitStr) {
            result.name = Some(input.parse()?);
            if input.is_empty() {
                return Ok(result);
            }
            input.parse::<Token![,]>()?;
        }

        let nested = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in nested {
            match meta {
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    result.name = Some(string_value(nv.value)?);
                }
                Meta::NameValue(nv) if nv.path.is_ident("crate") => {
                    result.krate = Some(string_value(nv.value)?.parse()?);
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "unknown attribute, expected `name = \"...\"` or `crate = \"...\"`",
                    ))
                }
            }
        }

        Ok(result)
    }
}

/// Reject signatures a zero-argument test case cannot have.
fn validate(func: &ItemFn) -> syn::Result<()> {
    let sig = &func.sig;
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "async test code is not supported",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "test code cannot be generic",
        ));
    }
    if !sig.inputs.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.inputs,
            "test code takes no arguments",
        ));
    }
    Ok(())
}

pub fn expand(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let attrs: MainAttrs = syn::parse2(attr)?;
    let func: ItemFn = syn::parse2(item)?;
    validate(&func)?;

    let ItemFn {
        attrs: fn_attrs,
        sig,
        block,
        ..
    } = func;
    let ident = &sig.ident;
    let case_name = ident.to_string();
    let output = &sig.output;

    let suite_name = match &attrs.name {
        Some(lit) => quote!(#lit),
        None => quote!(::core::env!("CARGO_CRATE_NAME")),
    };

    let krate = match &attrs.krate {
        Some(path) => quote!(#path),
        None => quote!(::verdict),
    };

    Ok(quote! {
        fn main() -> ::std::process::ExitCode {
            #(#fn_attrs)*
            fn #ident() #output #block

            #krate::Suite::new(#suite_name)
                .case(#case_name, #ident)
                .run()
        }
    })
}
