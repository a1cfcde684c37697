//! Procedural macros for generating mock implementations.
//!
//! # client
//!
//! Generates a mock implementation for a client trait whose methods are
//! called through `async_trait`. Both `async` and plain methods are supported.
//!
//! Use `#[cfg_attr(test, mock::client)]` before `#[async_trait]` to generate
//! the mock only during test compilation:
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! #[cfg_attr(test, mock::client)]
//! #[async_trait]
//! pub trait UpstreamClient: Send + Sync + 'static {
//!     fn authorize_url(&self, state: &str) -> Result<String, Error>;
//!     async fn fetch_profile(&self, access_token: &str) -> Result<RawProfile, Error>;
//! }
//!
//! // Generates:
//! // pub struct MockUpstreamClient {
//! //     pub authorize_url: std::sync::Mutex<Option<Result<String, Error>>>,
//! //     pub authorize_url_call_count: AtomicUsize,
//! //     pub fetch_profile: tokio::sync::Mutex<Option<Result<RawProfile, Error>>>,
//! //     pub fetch_profile_call_count: AtomicUsize,
//! // }
//! // impl Default for MockUpstreamClient { ... }
//! // #[async_trait] impl UpstreamClient for MockUpstreamClient { ... }
//! ```
//!
//! Every method hands out its canned result exactly once; a second call
//! panics, which makes unexpected upstream calls fail the test.
//!
//! ## Checking Call Counts in Tests
//!
//! ```ignore
//! assert_eq!(mock.fetch_profile_calls(), 1);
//! ```

use proc_macro::TokenStream;
use quote::ToTokens;
use quote::{format_ident, quote};
use syn::{FnArg, ItemTrait, ReturnType, TraitItem, parse_macro_input};

/// Generates a mock implementation for a client trait.
#[proc_macro_attribute]
pub fn client(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemTrait);
    let trait_name = &input.ident;
    let mock_name = format_ident!("Mock{}", trait_name);
    let vis = &input.vis;

    let mut field_definitions = Vec::new();
    let mut default_fields = Vec::new();
    let mut impl_methods = Vec::new();
    let mut call_count_methods = Vec::new();

    for item in &input.items {
        let TraitItem::Fn(method) = item else {
            continue;
        };
        let method_name = &method.sig.ident;
        let call_count_field = format_ident!("{}_call_count", method_name);
        let call_count_method = format_ident!("{}_calls", method_name);
        let is_async = method.sig.asyncness.is_some();

        let return_type = match &method.sig.output {
            ReturnType::Default => quote! { () },
            ReturnType::Type(_, ty) => quote! { #ty },
        };

        let mutex = if is_async {
            quote! { ::tokio::sync::Mutex }
        } else {
            quote! { ::std::sync::Mutex }
        };

        field_definitions.push(quote! {
            pub #method_name: #mutex<::std::option::Option<#return_type>>
        });
        field_definitions.push(quote! {
            pub #call_count_field: ::std::sync::atomic::AtomicUsize
        });

        default_fields.push(quote! {
            #method_name: #mutex::new(::std::option::Option::None)
        });
        default_fields.push(quote! {
            #call_count_field: ::std::sync::atomic::AtomicUsize::new(0)
        });

        call_count_methods.push(quote! {
            pub fn #call_count_method(&self) -> usize {
                self.#call_count_field.load(::std::sync::atomic::Ordering::SeqCst)
            }
        });

        let params: Vec<_> = method
            .sig
            .inputs
            .iter()
            .filter_map(|arg| {
                let FnArg::Typed(pat_type) = arg else {
                    return None;
                };
                let ty = &pat_type.ty;
                let pat_str = pat_type.pat.to_token_stream().to_string();
                let prefixed_name = format_ident!("_{}", pat_str);
                Some(quote! { #prefixed_name: #ty })
            })
            .collect();

        let take = if is_async {
            quote! { self.#method_name.lock().await.take() }
        } else {
            quote! { self.#method_name.lock().unwrap().take() }
        };
        let message = format!("{mock_name}::{method_name} called without a canned result");
        let asyncness = is_async.then(|| quote! { async });

        impl_methods.push(quote! {
            #asyncness fn #method_name(&self, #(#params),*) -> #return_type {
                self.#call_count_field.fetch_add(1, ::std::sync::atomic::Ordering::SeqCst);
                #take.expect(#message)
            }
        });
    }

    let expanded = quote! {
        #input

        #vis struct #mock_name {
            #(#field_definitions),*
        }

        impl ::std::default::Default for #mock_name {
            fn default() -> Self {
                Self {
                    #(#default_fields),*
                }
            }
        }

        impl #mock_name {
            #(#call_count_methods)*
        }

        #[::async_trait::async_trait]
        impl #trait_name for #mock_name {
            #(#impl_methods)*
        }
    };

    TokenStream::from(expanded)
}
