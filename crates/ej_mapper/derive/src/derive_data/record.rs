use std::collections::BTreeSet;

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr, Type};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// Define

/// A struct accepted by `#[derive(Mappable)]`.
pub(crate) struct MappableDerive<'a> {
    pub ident: &'a Ident,
    pub attrs: TypeAttributes,
    pub fields: Vec<RecordField<'a>>,
}

/// A named field of the struct.
pub(crate) struct RecordField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
    /// Index in the generated descriptor slice.
    pub index: usize,
}

// -----------------------------------------------------------------------------
// Parse

impl<'a> MappableDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "`Mappable` cannot be derived for generic types",
            ));
        }

        let data = match &input.data {
            Data::Struct(data) => data,
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`Mappable` cannot be derived for enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`Mappable` cannot be derived for unions",
                ));
            }
        };

        let fields = match &data.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .enumerate()
                .map(|(index, field)| RecordField::new(field, index))
                .collect::<syn::Result<Vec<_>>>()?,
            Fields::Unit => Vec::new(),
            Fields::Unnamed(unnamed) => {
                return Err(syn::Error::new_spanned(
                    unnamed,
                    "`Mappable` cannot be derived for tuple structs",
                ));
            }
        };
        reject_duplicate_keys(&fields)?;

        Ok(Self {
            ident: &input.ident,
            attrs: TypeAttributes::parse_attrs(&input.attrs)?,
            fields,
        })
    }
}

impl<'a> RecordField<'a> {
    fn new(field: &'a Field, index: usize) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };

        Ok(Self {
            ident,
            ty: &field.ty,
            attrs: FieldAttributes::parse_attrs(&field.attrs)?,
            index,
        })
    }

    /// The key the field is written under.
    pub fn key(&self) -> LitStr {
        match &self.attrs.rename {
            Some(rename) => rename.clone(),
            None => LitStr::new(&self.ident.unraw().to_string(), self.ident.span()),
        }
    }
}

/// Two fields written under one key would overwrite each other in the tree.
fn reject_duplicate_keys(fields: &[RecordField<'_>]) -> syn::Result<()> {
    let mut seen = BTreeSet::new();
    for field in fields {
        let key = field.key();
        if !seen.insert(key.value()) {
            return Err(syn::Error::new(
                key.span(),
                format!("duplicate key `{}`, every field needs its own key", key.value()),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use syn::{DeriveInput, parse_quote};

    use super::MappableDerive;

    fn error(input: &DeriveInput) -> String {
        match MappableDerive::from_input(input) {
            Ok(_) => panic!("expected the derive input to be rejected"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn keys_are_unique() {
        let input: DeriveInput = parse_quote! {
            struct Pair {
                #[mapping(rename = "k")]
                a: i32,
                #[mapping(rename = "k")]
                b: i32,
            }
        };
        assert_eq!(error(&input), "duplicate key `k`, every field needs its own key");

        let input: DeriveInput = parse_quote! {
            struct Shadow {
                b: i32,
                #[mapping(rename = "b")]
                a: i32,
            }
        };
        assert!(error(&input).starts_with("duplicate key `b`"));

        let input: DeriveInput = parse_quote! {
            struct Swap {
                #[mapping(rename = "b")]
                a: i32,
                #[mapping(rename = "a")]
                b: i32,
            }
        };
        let derive = MappableDerive::from_input(&input).unwrap();
        let keys: Vec<_> = derive.fields.iter().map(|f| f.key().value()).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn raw_identifiers_use_the_plain_name() {
        let input: DeriveInput = parse_quote! {
            struct Token {
                r#type: String,
            }
        };
        let derive = MappableDerive::from_input(&input).unwrap();
        assert_eq!(derive.fields[0].key().value(), "type");
    }
}
