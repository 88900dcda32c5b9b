mod decode_field;

use decode_field::decode_field;
use proc_macro::TokenStream;
use quote::quote;
use syn::{Fields, ItemStruct, parse_macro_input, parse_quote};

/// Derives `Record`: every non private field is listed in declaration order, together with its
/// `#[sql = "column,flag,..."]` tag (empty when missing).
#[proc_macro_derive(Record, attributes(sql))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let Fields::Named(..) = item.fields else {
        panic!(
            "Record can only be derived for structs with named fields, `{}` is not",
            item.ident
        );
    };
    let name = &item.ident;
    let record_name = name.to_string();
    if let Some(lifetime) = item.generics.lifetimes().next() {
        panic!(
            "Record requires a `'static` type, `{}` cannot have the lifetime parameter `{}`",
            item.ident, lifetime.lifetime
        );
    }
    let mut generics = item.generics.clone();
    let params: Vec<_> = generics.type_params().map(|v| v.ident.clone()).collect();
    let predicates = &mut generics.make_where_clause().predicates;
    for param in params {
        predicates.push(parse_quote!(
            #param: ::std::marker::Send + ::std::marker::Sync + 'static
        ));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let fields = item.fields.iter().filter_map(decode_field).map(|field| {
        let ident = &field.ident;
        let name = &field.name;
        let tag = &field.tag;
        quote! {
            ::tack::FieldDef {
                name: #name,
                tag: #tag,
                get: |record: &Self| {
                    ::tack::AsValue::as_value(::std::clone::Clone::clone(&record.#ident))
                },
                set: |record: &mut Self, value: &::tack::Value| {
                    ::tack::ScanTarget::scan(
                        &mut ::tack::NullableField::new(&mut record.#ident),
                        value,
                    )
                },
            }
        }
    });
    quote! {
        impl #impl_generics ::tack::Record for #name #ty_generics #where_clause {
            fn record_name() -> &'static str {
                #record_name
            }
            fn fields() -> ::std::vec::Vec<::tack::FieldDef<Self>> {
                ::std::vec![#(#fields),*]
            }
        }
    }
    .into()
}
