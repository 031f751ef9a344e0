use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::MappableDerive;

/// `static __FIELDS: [FieldDescriptor; N] = [...];`
pub(crate) fn fields_static(derive: &MappableDerive, mapper: &syn::Path) -> TokenStream {
    let mappable_ = crate::path::mappable_(mapper);
    let field_descriptor_ = crate::path::field_descriptor_(mapper);
    let modifiers_ = crate::path::modifiers_(mapper);

    let len = derive.fields.len();

    let descriptors = derive.fields.iter().map(|field| {
        let key = field.key();
        let ty = field.ty;

        let with_modifiers = if field.attrs.modifiers.is_empty() {
            TokenStream::new()
        } else {
            let modifiers = field.attrs.modifiers_expr(&modifiers_);
            quote!(.with_modifiers(#modifiers))
        };

        quote! {
            #field_descriptor_::new(
                #key,
                __TYPE_PATH,
                <#ty as #mappable_>::class_descriptor,
            ) #with_modifiers
        }
    });

    quote! {
        static __FIELDS: [#field_descriptor_; #len] = [ #(#descriptors),* ];
    }
}

/// Generates the `Record` impl: descriptor access and field reads by index.
pub(crate) fn impl_trait_record(derive: &MappableDerive, mapper: &syn::Path) -> TokenStream {
    let ident = derive.ident;

    let mappable_ = crate::path::mappable_(mapper);
    let record_ = crate::path::record_(mapper);
    let class_descriptor_ = crate::path::class_descriptor_(mapper);
    let field_descriptor_ = crate::path::field_descriptor_(mapper);

    let arms = derive.fields.iter().map(|field| {
        let index = field.index;
        let member = field.ident;
        quote! {
            #index => ::core::option::Option::Some(&self.#member),
        }
    });

    quote! {
        impl #record_ for #ident {
            #[inline]
            fn class(&self) -> #class_descriptor_ {
                <Self as #mappable_>::class_descriptor()
            }

            #[inline]
            fn fields(&self) -> &'static [#field_descriptor_] {
                &__FIELDS
            }

            fn field(&self, index: usize) -> ::core::option::Option<&dyn #mappable_> {
                match index {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}

/// Generates the `RecordMut` impl: converts a node into the field's type and
/// stores it. Conversion errors propagate unchanged.
pub(crate) fn impl_trait_record_mut(derive: &MappableDerive, mapper: &syn::Path) -> TokenStream {
    let ident = derive.ident;

    let mappable_ = crate::path::mappable_(mapper);
    let record_mut_ = crate::path::record_mut_(mapper);
    let from_tree_context_ = crate::path::from_tree_context_(mapper);
    let result_ = crate::path::result_(mapper);
    let json_node_ = crate::path::json_node_(mapper);

    let body = if derive.fields.is_empty() {
        quote! {
            let _ = (index, node, cx);
        }
    } else {
        let arms = derive.fields.iter().map(|field| {
            let index = field.index;
            let member = field.ident;
            let ty = field.ty;
            quote! {
                #index => self.#member = <#ty as #mappable_>::from_tree(node, cx)?,
            }
        });

        quote! {
            match index {
                #(#arms)*
                _ => {}
            }
        }
    };

    quote! {
        impl #record_mut_ for #ident {
            fn write_field(
                &mut self,
                index: usize,
                node: &#json_node_,
                cx: &mut #from_tree_context_<'_>,
            ) -> #result_<()> {
                #body
                ::core::result::Result::Ok(())
            }
        }
    }
}
