mod attrs;
mod impls;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::Result as SynResult;

/// Implements `nidi::provider::component::Component` for the annotated `impl`
/// block.
///
/// Exactly one associated function of the block must be annotated with
/// `#[inject("a", "b", ...)]`, listing one dependency name per parameter, or
/// with a bare `#[inject]` and a `#[named("...")]` on every parameter. The
/// function must return `Self` or `Result<Self, E>`.
///
/// `#[component(OutputType, post_processor)]` sets `Component::Constructed` to
/// `OutputType` and converts the constructed value with `post_processor`.
#[proc_macro_attribute]
pub fn component(attr: TokenStream, item: TokenStream) -> TokenStream {
    match component_impl(attr, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn component_impl(attr: TokenStream, item: TokenStream) -> SynResult<TokenStream2> {
    let attr_data = attrs::parse_attributes(attr)?;
    let expanded = impls::expand_implementation(item, attr_data)?;
    Ok(expanded)
}
