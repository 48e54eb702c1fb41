extern crate proc_macro;
extern crate quote;
extern crate syn;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Ident};

/// Implements `SerializableModel` for an atomic model, along with the
/// `from_value` constructor the model factory uses to build the model from
/// a YAML/JSON configuration.  `ReportableModel` and `SerializableModel`
/// must be in scope where the derive is used.
#[proc_macro_derive(SerializableModel)]
pub fn model(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let name = input.ident;
    let tokens = quote! {
        impl #name {
            pub fn from_value(value: serde_yaml::Value) -> Option<Box<dyn ReportableModel>> {
                match serde_yaml::from_value::<Self>(value) {
                    Ok(model) => Some(Box::new(model)),
                    Err(_) => None
                }
            }
        }
        impl SerializableModel for #name {
            fn get_type(&self) -> &'static str {
                stringify!(#name)
            }
            fn serialize(&self) -> serde_yaml::Value {
                serde_yaml::to_value(self).unwrap_or(serde_yaml::Value::Null)
            }
        }
    };
    tokens.into()
}

/// Registers a model type (deriving `SerializableModel`) with the model
/// factory, so configurations can refer to it by its type name.
#[proc_macro]
pub fn register(item: TokenStream) -> TokenStream {
    let name = parse_macro_input!(item as Ident);
    let tokens = quote! {
        devs_queue::models::model_factory::register(
            stringify!(#name),
            #name::from_value as devs_queue::models::model_factory::ModelConstructor
        );
    };
    tokens.into()
}
