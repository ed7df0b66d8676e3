//! Implementation of the `#[derive(Lenses)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Generics, Ident, parse_macro_input};

/// Main implementation of the Lenses derive macro.
pub fn derive_lenses_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let generics = &input.generics;

    let expanded = match &input.data {
        Data::Struct(data_struct) => generate_struct_lenses(name, generics, &data_struct.fields),
        Data::Enum(_) => syn::Error::new_spanned(
            &input.ident,
            "Lenses can only be derived for structs, not enums. Use #[derive(Prisms)] for enums.",
        )
        .to_compile_error(),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "Lenses cannot be derived for unions.")
                .to_compile_error()
        }
    };

    TokenStream::from(expanded)
}

/// Generates lens methods for a struct's fields.
fn generate_struct_lenses(name: &Ident, generics: &Generics, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(named_fields) => {
            let lens_methods: Vec<TokenStream2> = named_fields
                .named
                .iter()
                .filter_map(|field| {
                    field
                        .ident
                        .as_ref()
                        .map(|field_name| generate_field_lens(field_name, &field.ty))
                })
                .collect();

            let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

            quote! {
                impl #impl_generics #name #type_generics #where_clause {
                    #(#lens_methods)*
                }
            }
        }
        Fields::Unnamed(_) => syn::Error::new_spanned(
            name,
            "Lenses can only be derived for structs with named fields, not tuple structs.",
        )
        .to_compile_error(),
        Fields::Unit => syn::Error::new_spanned(
            name,
            "Lenses cannot be derived for unit structs (structs with no fields).",
        )
        .to_compile_error(),
    }
}

fn generate_field_lens(field_name: &Ident, field_type: &syn::Type) -> TokenStream2 {
    let method_name = format_ident!("{}_lens", field_name);
    let documentation = format!("Returns a lens focusing on the `{field_name}` field.");

    quote! {
        #[doc = #documentation]
        #[inline]
        #[must_use]
        pub fn #method_name<__OpticContext, __OpticError>() -> impl ::contextual_optics::optics::Lens<
            __OpticContext,
            Self,
            #field_type,
            Error = __OpticError,
        > + Clone
        where
            #field_type: ::core::clone::Clone,
        {
            ::contextual_optics::optics::FunctionLens::new(
                |_context: &__OpticContext, source: &Self| -> ::core::result::Result<#field_type, __OpticError> {
                    ::core::result::Result::Ok(::core::clone::Clone::clone(&source.#field_name))
                },
                |_context: &__OpticContext, mut source: Self, value: #field_type| -> ::core::result::Result<Self, __OpticError> {
                    source.#field_name = value;
                    ::core::result::Result::Ok(source)
                },
            )
        }
    }
}
