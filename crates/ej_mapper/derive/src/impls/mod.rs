// -----------------------------------------------------------------------------
// Modules

mod trait_mappable;
mod trait_record;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use crate::derive_data::MappableDerive;

/// Implements `Mappable`, `Record` and `RecordMut` for a struct.
///
/// Everything is emitted inside an anonymous `const` block, together with
/// the type path constant and the `'static` field descriptors it shares.
pub(crate) fn impl_record(derive: &MappableDerive) -> TokenStream {
    let mapper = crate::path::ej_mapper();
    let ident = derive.ident;

    let type_path = match &derive.attrs.type_path {
        Some(lit) => lit.to_token_stream(),
        None => quote!(::core::concat!(::core::module_path!(), "::", ::core::stringify!(#ident))),
    };

    let fields_static = trait_record::fields_static(derive, &mapper);
    let mappable_impl = trait_mappable::impl_trait_mappable(derive, &mapper);
    let record_impl = trait_record::impl_trait_record(derive, &mapper);
    let record_mut_impl = trait_record::impl_trait_record_mut(derive, &mapper);

    quote! {
        const _: () = {
            const __TYPE_PATH: &str = #type_path;

            #fields_static

            #mappable_impl

            #record_impl

            #record_mut_impl
        };
    }
}
