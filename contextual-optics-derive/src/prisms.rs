//! Implementation of the `#[derive(Prisms)]` macro.
//!
//! Every variant shape is reduced to the same three pieces: a pattern that
//! binds the variant's fields by reference, an expression that clones those
//! bindings into the focus, and a build closure body that rebuilds the
//! variant from an owned focus.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Generics, Ident, Variant, parse_macro_input};

/// Main implementation of the Prisms derive macro.
pub fn derive_prisms_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let generics = &input.generics;

    let expanded = match &input.data {
        Data::Enum(data_enum) => {
            generate_enum_prisms(name, generics, &data_enum.variants.iter().collect::<Vec<_>>())
        }
        Data::Struct(_) => syn::Error::new_spanned(
            &input.ident,
            "Prisms can only be derived for enums, not structs. Use #[derive(Lenses)] for structs.",
        )
        .to_compile_error(),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "Prisms cannot be derived for unions.")
                .to_compile_error()
        }
    };

    TokenStream::from(expanded)
}

/// Generates prism methods for an enum's variants.
fn generate_enum_prisms(name: &Ident, generics: &Generics, variants: &[&Variant]) -> TokenStream2 {
    let prism_methods: Vec<TokenStream2> = variants
        .iter()
        .map(|variant| generate_variant_prism(variant))
        .collect();

    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #name #type_generics #where_clause {
            #(#prism_methods)*
        }
    }
}

/// The pieces of a prism that depend on the variant's shape.
struct VariantShape {
    focus_type: TokenStream2,
    field_types: Vec<syn::Type>,
    pattern: TokenStream2,
    focus: TokenStream2,
    build: TokenStream2,
}

fn variant_shape(variant: &Variant) -> VariantShape {
    let variant_name = &variant.ident;

    match &variant.fields {
        Fields::Unit => VariantShape {
            focus_type: quote! { () },
            field_types: Vec::new(),
            pattern: quote! { Self::#variant_name },
            focus: quote! { () },
            build: quote! {{
                let () = focus;
                Self::#variant_name
            }},
        },
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
            let field_type = fields.unnamed[0].ty.clone();
            VariantShape {
                focus_type: quote! { #field_type },
                field_types: vec![field_type],
                pattern: quote! { Self::#variant_name(value) },
                focus: quote! { ::core::clone::Clone::clone(value) },
                build: quote! { Self::#variant_name(focus) },
            }
        }
        Fields::Unnamed(fields) => {
            let field_types: Vec<syn::Type> =
                fields.unnamed.iter().map(|field| field.ty.clone()).collect();
            let bindings: Vec<Ident> = (0..field_types.len())
                .map(|position| format_ident!("v{}", position))
                .collect();
            VariantShape {
                focus_type: quote! { (#(#field_types),*) },
                pattern: quote! { Self::#variant_name(#(#bindings),*) },
                focus: quote! { (#(::core::clone::Clone::clone(#bindings)),*) },
                build: quote! {{
                    let (#(#bindings),*) = focus;
                    Self::#variant_name(#(#bindings),*)
                }},
                field_types,
            }
        }
        Fields::Named(fields) => {
            let field_types: Vec<syn::Type> =
                fields.named.iter().map(|field| field.ty.clone()).collect();
            let field_names: Vec<&Ident> = fields
                .named
                .iter()
                .filter_map(|field| field.ident.as_ref())
                .collect();
            VariantShape {
                focus_type: quote! { (#(#field_types,)*) },
                pattern: quote! { Self::#variant_name { #(#field_names),* } },
                focus: quote! { (#(::core::clone::Clone::clone(#field_names),)*) },
                build: quote! {{
                    let (#(#field_names,)*) = focus;
                    Self::#variant_name { #(#field_names),* }
                }},
                field_types,
            }
        }
    }
}

/// Generates a prism method for a single enum variant.
fn generate_variant_prism(variant: &Variant) -> TokenStream2 {
    let variant_name = &variant.ident;
    let method_name = format_ident!("{}_prism", to_snake_case(&variant_name.to_string()));
    let documentation = format!("Returns a prism focusing on the `{variant_name}` variant.");

    let VariantShape {
        focus_type,
        field_types,
        pattern,
        focus,
        build,
    } = variant_shape(variant);

    quote! {
        #[doc = #documentation]
        #[inline]
        #[must_use]
        pub fn #method_name<__OpticContext, __OpticError>() -> impl ::contextual_optics::optics::Prism<
            __OpticContext,
            Self,
            #focus_type,
            Error = __OpticError,
        > + Clone
        where
            #(#field_types: ::core::clone::Clone,)*
        {
            ::contextual_optics::optics::FunctionPrism::new(
                |_context: &__OpticContext, source: &Self| -> ::core::result::Result<::core::option::Option<#focus_type>, __OpticError> {
                    ::core::result::Result::Ok(match source {
                        #pattern => ::core::option::Option::Some(#focus),
                        #[allow(unreachable_patterns)]
                        _ => ::core::option::Option::None,
                    })
                },
                |_context: &__OpticContext, focus: #focus_type| -> ::core::result::Result<Self, __OpticError> {
                    ::core::result::Result::Ok(#build)
                },
            )
        }
    }
}

/// Converts a `CamelCase` or `PascalCase` string to `snake_case`.
fn to_snake_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 4);
    let characters: Vec<char> = input.chars().collect();

    for (position, &character) in characters.iter().enumerate() {
        if character.is_uppercase() {
            if position > 0 {
                let previous = characters[position - 1];
                let next_is_lowercase = characters
                    .get(position + 1)
                    .is_some_and(|next| next.is_lowercase());

                // "KeyPress" -> "key_press", "XMLParser" -> "xml_parser"
                if previous.is_lowercase() || (previous.is_uppercase() && next_is_lowercase) {
                    result.push('_');
                }
            }
            result.extend(character.to_lowercase());
        } else {
            result.push(character);
        }
    }

    result
}
