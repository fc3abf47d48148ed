//! Implementation of the #[figgle_font] macro

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::{parse2, FnArg, Ident, ItemFn, LitStr, ReturnType, Token};

/// Parsed attributes for #[figgle_font]
#[derive(Debug, Default)]
struct FiggleFontAttrs {
    name: Option<LitStr>,
}

impl Parse for FiggleFontAttrs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Ok(Self::default());
        }

        // #[figgle_font("stacey")]
        if input.peek(LitStr) {
            let name: LitStr = input.parse()?;
            return Ok(Self { name: Some(name) });
        }

        // #[figgle_font(name = "stacey")]
        let key: Ident = input.parse()?;
        if key != "name" {
            return Err(syn::Error::new(key.span(), "expected `name = \"...\"`"));
        }
        input.parse::<Token![=]>()?;
        let name: LitStr = input.parse()?;
        if !input.is_empty() {
            return Err(input.error("unexpected tokens after font name"));
        }
        Ok(Self { name: Some(name) })
    }
}

/// Check that the function can be used as `fn(&str) -> String`
fn check_signature(input: &ItemFn) -> syn::Result<()> {
    let sig = &input.sig;

    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new(asyncness.span, "font render functions cannot be async"));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&sig.generics, "font render functions cannot be generic"));
    }
    if sig.inputs.len() != 1 {
        return Err(syn::Error::new_spanned(
            &sig.inputs,
            "font render functions take exactly one `&str` argument",
        ));
    }
    if let Some(FnArg::Receiver(receiver)) = sig.inputs.first() {
        return Err(syn::Error::new_spanned(receiver, "font render functions cannot take `self`"));
    }
    if let ReturnType::Default = sig.output {
        return Err(syn::Error::new_spanned(&sig.ident, "font render functions must return `String`"));
    }
    Ok(())
}

pub fn figgle_font_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input: ItemFn = match parse2(item) {
        Ok(input) => input,
        Err(e) => return e.to_compile_error(),
    };

    let attrs: FiggleFontAttrs = match parse2(attr) {
        Ok(attrs) => attrs,
        Err(e) => return e.to_compile_error(),
    };

    if let Err(e) = check_signature(&input) {
        return e.to_compile_error();
    }

    let fn_name = &input.sig.ident;

    // Font name (the function name by default)
    let font_name = attrs
        .name
        .unwrap_or_else(|| LitStr::new(&fn_name.to_string(), Span::call_site()));

    if font_name.value().is_empty() {
        return syn::Error::new(font_name.span(), "font name cannot be empty").to_compile_error();
    }

    let descriptor_fn_name = format_ident!("__{}_figgle_font", fn_name);

    quote! {
        #input

        #[doc(hidden)]
        fn #descriptor_fn_name() -> figgle_gen::FontDescriptor {
            figgle_gen::FontDescriptor::new(#font_name, #fn_name)
        }

        figgle_gen::register_font!(#descriptor_fn_name());
    }
}
