//! es-commands / es-domain 的派生宏
//!
//! - `#[derive(Command)]`：为命令实现 `::es_commands::Command`，名称默认取类型名，
//!   可通过 `#[command(name = "...")]` 覆写；
//! - `#[derive(Content)]`：为事件内容实现 `::es_domain::Content`，名称默认取类型名，
//!   可通过 `#[content(name = "...")]` 覆写。
//!
//! 名称在编译期确定且不可为空，运行时不会因取名失败而崩溃。
use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

mod utils;

#[proc_macro_derive(Command, attributes(command))]
pub fn derive_command(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = match utils::stable_name(&input, "command") {
        Ok(lit) => lit,
        Err(err) => return err.to_compile_error().into(),
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::es_commands::Command for #ident #ty_generics #where_clause {
            fn name(&self) -> &str {
                #name
            }
        }
    };

    TokenStream::from(expanded)
}

#[proc_macro_derive(Content, attributes(content))]
pub fn derive_content(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = match utils::stable_name(&input, "content") {
        Ok(lit) => lit,
        Err(err) => return err.to_compile_error().into(),
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::es_domain::Content for #ident #ty_generics #where_clause {
            fn event_name(&self) -> &str {
                #name
            }
        }
    };

    TokenStream::from(expanded)
}
