mod decode_record;

use decode_record::decode_record;
use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemStruct, parse_macro_input};

/// Implements `quarry::Record` and a key-stripping `Clone`.
///
/// The struct needs one named field of type `Attributes`. The table defaults to the snake case name of the struct
/// and the primary key to `id`, override them with `#[quarry(table = "products", primary_key = "code")]`.
#[proc_macro_derive(Record, attributes(quarry))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let metadata = decode_record(&item);
    let table = &metadata.table;
    let primary_key = &metadata.primary_key;
    let attributes = &metadata.attributes;
    quote! {
        impl #impl_generics ::quarry::Record for #name #ty_generics #where_clause {
            const TABLE_NAME: &'static str = #table;
            const PRIMARY_KEY: &'static str = #primary_key;

            fn attributes(&self) -> &::quarry::Attributes {
                &self.#attributes
            }

            fn attributes_mut(&mut self) -> &mut ::quarry::Attributes {
                &mut self.#attributes
            }
        }

        impl #impl_generics ::std::clone::Clone for #name #ty_generics #where_clause {
            fn clone(&self) -> Self {
                ::quarry::Record::duplicate(self)
            }
        }
    }
    .into()
}
