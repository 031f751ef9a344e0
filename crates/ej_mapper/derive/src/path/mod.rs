//! Paths of the runtime items the generated code refers to.
//!
//! Kept in one place so that moving an item in `ej_mapper` only needs an
//! update here.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `ej_mapper` crate.
///
/// 1. For crates that depend on `ej_mapper`, `::ej_mapper` is returned.
/// 2. For crates that depend on `ej_core`, `::ej_core::mapper` is returned.
/// 3. For other situations, `::ej_mapper` is returned, which resolves inside
///    `ej_mapper` itself through `extern crate self as ej_mapper`.
///
/// Reading the manifest is not free, so the path is fetched once per
/// derive and passed around.
pub(crate) fn ej_mapper() -> syn::Path {
    ej_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("ej_mapper"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn mappable_(mapper: &syn::Path) -> TokenStream {
    quote!(#mapper::Mappable)
}

#[inline(always)]
pub(crate) fn mappable_ref_(mapper: &syn::Path) -> TokenStream {
    quote!(#mapper::MappableRef)
}

#[inline(always)]
pub(crate) fn record_(mapper: &syn::Path) -> TokenStream {
    quote!(#mapper::Record)
}

#[inline(always)]
pub(crate) fn record_mut_(mapper: &syn::Path) -> TokenStream {
    quote!(#mapper::RecordMut)
}

#[inline(always)]
pub(crate) fn from_tree_context_(mapper: &syn::Path) -> TokenStream {
    quote!(#mapper::FromTreeContext)
}

#[inline(always)]
pub(crate) fn result_(mapper: &syn::Path) -> TokenStream {
    quote!(#mapper::Result)
}

#[inline(always)]
pub(crate) fn json_node_(mapper: &syn::Path) -> TokenStream {
    quote!(#mapper::node::JsonNode)
}

#[inline(always)]
pub(crate) fn class_descriptor_(mapper: &syn::Path) -> TokenStream {
    quote!(#mapper::exclusion::ClassDescriptor)
}

#[inline(always)]
pub(crate) fn field_descriptor_(mapper: &syn::Path) -> TokenStream {
    quote!(#mapper::exclusion::FieldDescriptor)
}

#[inline(always)]
pub(crate) fn modifiers_(mapper: &syn::Path) -> TokenStream {
    quote!(#mapper::exclusion::Modifiers)
}

#[inline(always)]
pub(crate) fn nesting_(mapper: &syn::Path) -> TokenStream {
    quote!(#mapper::exclusion::Nesting)
}
