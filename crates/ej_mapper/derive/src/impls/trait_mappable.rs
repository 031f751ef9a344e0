use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::MappableDerive;

/// Generates the `Mappable` impl, which classifies the value as a record
/// and reads it back through `FromTreeContext::read_record`.
pub(crate) fn impl_trait_mappable(derive: &MappableDerive, mapper: &syn::Path) -> TokenStream {
    let ident = derive.ident;

    let mappable_ = crate::path::mappable_(mapper);
    let mappable_ref_ = crate::path::mappable_ref_(mapper);
    let from_tree_context_ = crate::path::from_tree_context_(mapper);
    let result_ = crate::path::result_(mapper);
    let json_node_ = crate::path::json_node_(mapper);
    let class_descriptor_ = crate::path::class_descriptor_(mapper);
    let nesting_ = crate::path::nesting_(mapper);

    let nesting = derive.attrs.nesting.unwrap_or_default().variant();

    quote! {
        impl #mappable_ for #ident {
            #[inline]
            fn classify(&self) -> #mappable_ref_<'_> {
                #mappable_ref_::Record(self)
            }

            fn from_tree(
                node: &#json_node_,
                cx: &mut #from_tree_context_<'_>,
            ) -> #result_<Self> {
                cx.read_record::<Self>(node)
            }

            #[inline]
            fn class_descriptor() -> #class_descriptor_ {
                #class_descriptor_::new(__TYPE_PATH).with_nesting(#nesting_::#nesting)
            }

            #[inline]
            fn type_path(&self) -> &'static str {
                __TYPE_PATH
            }
        }
    }
}
