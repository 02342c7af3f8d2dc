//! Procedural macros for envconf
//!
//! This crate provides the `#[derive(EnvConfig)]` macro which describes a
//! configuration struct's fields, in declaration order, to the envconf tree walker.

use darling::{FromDeriveInput, FromField, ast};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    Attribute, DeriveInput, Expr, ExprLit, Generics, Ident, Lit, LitStr, Meta, Visibility,
    parse_macro_input,
};

/// Parsed `#[derive(EnvConfig)]` input
#[derive(Debug, FromDeriveInput)]
#[darling(supports(struct_named))]
struct EnvConfigInput {
    ident: Ident,
    generics: Generics,
    data: ast::Data<(), EnvConfigField>,
}

/// A single named field of the configuration struct
#[derive(Debug, FromField)]
#[darling(forward_attrs(env))]
struct EnvConfigField {
    ident: Option<Ident>,
    vis: Visibility,
    attrs: Vec<Attribute>,
}

/// Derive macro for environment-backed configuration structs.
///
/// This macro generates:
/// - `EnvConfig` implementation visiting every field in declaration order
/// - `EnvField` implementation so the struct can be nested inside another config
///
/// Each field may carry one `#[env("...")]` (or `#[env = "..."]`) tag:
/// - `"name"` overrides the variable segment (defaults to the field name)
/// - `",inline"` / `"name,inline"` splices a nested struct into the parent's namespace
/// - `"-"` skips the field entirely
///
/// Fields that are not `pub` are always skipped. Skipped fields don't need to
/// implement `EnvField`.
///
/// # Example
///
/// ```ignore
/// #[derive(Default, EnvConfig)]
/// pub struct Config {
///     #[env("mongo")]
///     pub mongo: MongoConfig,
///     #[env("app_id_list")]
///     pub app_ids: Vec<String>,
///     #[env(",inline")]
///     pub shared: SharedConfig,
///     #[env("-")]
///     pub ratio: f64,
/// }
/// ```
#[proc_macro_derive(EnvConfig, attributes(env))]
pub fn derive_env_config(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    let args = match EnvConfigInput::from_derive_input(&input) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(e.write_errors()),
    };

    let expanded = match impl_env_config(&args) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error(),
    };

    TokenStream::from(expanded)
}

fn impl_env_config(args: &EnvConfigInput) -> syn::Result<TokenStream2> {
    let struct_name = &args.ident;
    let (impl_generics, ty_generics, where_clause) = args.generics.split_for_impl();

    let fields = match &args.data {
        ast::Data::Struct(fields) => &fields.fields,
        ast::Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "EnvConfig only supports structs with named fields",
            ));
        }
    };

    let visits = fields
        .iter()
        .map(field_visit)
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        impl #impl_generics ::envconf::EnvConfig for #struct_name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn walk(&mut self, walker: &mut ::envconf::Walker<'_>) -> ::envconf::Result<()> {
                #(#visits)*
                Ok(())
            }
        }

        impl #impl_generics ::envconf::EnvField for #struct_name #ty_generics #where_clause {
            fn slot(&mut self) -> ::envconf::Slot<'_> {
                ::envconf::Slot::Node(self)
            }
        }
    })
}

/// Generate the walker call for one field
fn field_visit(field: &EnvConfigField) -> syn::Result<TokenStream2> {
    // supports(struct_named) guarantees an identifier
    let Some(ident) = &field.ident else {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "EnvConfig only supports structs with named fields",
        ));
    };
    let name = ident.unraw().to_string();
    let tag = field_tag(&field.attrs)?;
    let private = is_private(&field.vis);

    let mut spec = quote! { ::envconf::FieldSpec::new(#name) };
    if let Some(tag) = &tag {
        spec = quote! { #spec.tag(#tag) };
    }
    if private {
        spec = quote! { #spec.private() };
    }

    let skipped = private || tag.as_ref().is_some_and(|t| t.value() == "-");
    if skipped {
        Ok(quote! { walker.skip(#spec); })
    } else {
        Ok(quote! { walker.field(#spec, &mut self.#ident)?; })
    }
}

/// No `pub`, or `pub(self)` / `pub(in self)`
fn is_private(vis: &Visibility) -> bool {
    match vis {
        Visibility::Inherited => true,
        Visibility::Restricted(restricted) => restricted.path.is_ident("self"),
        Visibility::Public(_) => false,
    }
}

/// Extract the tag literal from `#[env("...")]` or `#[env = "..."]`
fn field_tag(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut tag = None;

    for attr in attrs {
        let lit = match &attr.meta {
            Meta::List(_) => attr.parse_args::<LitStr>()?,
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => s.clone(),
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected a string tag, e.g. #[env = \"name,inline\"]",
                    ));
                }
            },
            Meta::Path(path) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "expected a string tag, e.g. #[env(\"name,inline\")]",
                ));
            }
        };

        if tag.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "only one #[env] attribute is allowed per field",
            ));
        }
        tag = Some(lit);
    }

    Ok(tag)
}
