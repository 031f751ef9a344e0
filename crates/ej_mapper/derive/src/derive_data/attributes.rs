use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, Ident, LitStr};

use crate::MAPPING_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// NestingKind

/// Parsed `#[mapping(nesting = "...")]`, mirrors `ej_exclusion::Nesting`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum NestingKind {
    #[default]
    TopLevel,
    Nested,
    Inner,
    Anonymous,
    Local,
    Unknown,
}

impl NestingKind {
    fn from_lit(lit: &LitStr) -> syn::Result<Self> {
        Ok(match lit.value().as_str() {
            "top_level" => Self::TopLevel,
            "nested" => Self::Nested,
            "inner" => Self::Inner,
            "anonymous" => Self::Anonymous,
            "local" => Self::Local,
            "unknown" => Self::Unknown,
            _ => {
                return Err(syn::Error::new(
                    lit.span(),
                    "expected one of `top_level`, `nested`, `inner`, `anonymous`, `local`, `unknown`",
                ));
            }
        })
    }

    /// The variant name of `Nesting`.
    pub fn variant(self) -> Ident {
        let name = match self {
            Self::TopLevel => "TopLevel",
            Self::Nested => "Nested",
            Self::Inner => "Inner",
            Self::Anonymous => "Anonymous",
            Self::Local => "Local",
            Self::Unknown => "Unknown",
        };
        Ident::new(name, Span::call_site())
    }
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes on the struct itself.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub nesting: Option<NestingKind>,
    pub type_path: Option<LitStr>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in mapping_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_path") {
                    reject_duplicate(&meta, this.type_path.is_some())?;
                    this.type_path = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("nesting") {
                    reject_duplicate(&meta, this.nesting.is_some())?;
                    let lit: LitStr = meta.value()?.parse()?;
                    this.nesting = Some(NestingKind::from_lit(&lit)?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported type attribute, expected `type_path` or `nesting`"))
                }
            })?;
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Attributes on a single field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    /// Upper-case `Modifiers` constant names, in declaration order.
    pub modifiers: Vec<Ident>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in mapping_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    reject_duplicate(&meta, this.rename.is_some())?;
                    this.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("modifiers") {
                    meta.parse_nested_meta(|inner| {
                        let flag = modifier_const(&inner)?;
                        if !this.modifiers.contains(&flag) {
                            this.modifiers.push(flag);
                        }
                        Ok(())
                    })
                } else {
                    Err(meta.error("unsupported field attribute, expected `rename` or `modifiers`"))
                }
            })?;
        }

        Ok(this)
    }

    /// `Modifiers::empty().union(Modifiers::A)...` for the declared flags.
    pub fn modifiers_expr(&self, modifiers_path: &TokenStream) -> TokenStream {
        let flags = self.modifiers.iter();
        quote! {
            #modifiers_path::empty() #( .union(#modifiers_path::#flags) )*
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers

fn mapping_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(MAPPING_ATTRIBUTE_NAME))
}

fn reject_duplicate(meta: &ParseNestedMeta, seen: bool) -> syn::Result<()> {
    if seen {
        Err(meta.error("duplicate attribute"))
    } else {
        Ok(())
    }
}

fn modifier_const(meta: &ParseNestedMeta) -> syn::Result<Ident> {
    const NAMES: [&str; 8] = [
        "public",
        "private",
        "protected",
        "static",
        "final",
        "volatile",
        "transient",
        "synthetic",
    ];

    let name = meta
        .path
        .get_ident()
        .map(ToString::to_string)
        .filter(|name| NAMES.contains(&name.as_str()))
        .ok_or_else(|| {
            meta.error(
                "unknown modifier, expected one of `public`, `private`, `protected`, `static`, \
                 `final`, `volatile`, `transient`, `synthetic`",
            )
        })?;

    Ok(Ident::new(&name.to_uppercase(), meta.path.span()))
}
