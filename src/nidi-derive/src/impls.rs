use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::token::Comma;
use syn::visit_mut::{self, VisitMut};
use syn::{
    AngleBracketedGenericArguments, Attribute, Error as SynError, FnArg, GenericArgument, Ident,
    ImplItem, ImplItemFn, ItemImpl, LitStr, Meta, PathArguments, Result as SynResult, ReturnType,
    Type, TypePath,
};

use crate::attrs::AttributeData;

#[derive(Debug)]
struct ConstructorData {
    identifier: Ident,
    arguments: Vec<ArgumentData>,
    return_type: ReturnTypeData,
}

#[derive(Debug)]
struct ArgumentData {
    span: Span,
    ty: Box<Type>,
    name: LitStr,
}

#[derive(Debug)]
enum ReturnTypeData {
    Infallible,
    Result { error_type: TypePath },
}

/// How the constructor lists its dependency names.
enum InjectData {
    /// `#[inject]`, names are taken from `#[named(...)]` on each parameter.
    PerArgument,
    /// `#[inject("a", "b")]`
    Listed(Vec<LitStr>),
}

struct AttributeRemovalVisitor;

impl AttributeRemovalVisitor {
    fn is_custom_attribute(attr: &Attribute) -> bool {
        attr.path().is_ident("inject") || attr.path().is_ident("named")
    }
}

impl VisitMut for AttributeRemovalVisitor {
    fn visit_attributes_mut(&mut self, attrs: &mut Vec<Attribute>) {
        attrs.retain(|attr| !Self::is_custom_attribute(attr));
        attrs
            .iter_mut()
            .for_each(|attr| visit_mut::visit_attribute_mut(self, attr));
    }
}

pub fn expand_implementation(
    impls: TokenStream,
    attr_data: AttributeData,
) -> SynResult<TokenStream2> {
    let mut impls = match syn::parse::<ItemImpl>(impls) {
        Ok(impls) => impls,
        Err(err) => {
            return Err(SynError::new(
                err.span(),
                "`#[component]` should be annotated on the `impl` block",
            ))
        }
    };

    let self_type = get_self_type(&impls)?;
    let (ctor, attr) = get_constructor(&impls.items, impls.span())?;
    let ctor_data = parse_constructor(ctor, attr, &self_type)?;

    let expanded = expand_component_implementation(&impls, &self_type, ctor_data, attr_data);

    let mut visitor = AttributeRemovalVisitor;
    visitor.visit_item_impl_mut(&mut impls);

    Ok(quote! {
        #impls
        #expanded
    })
}

fn get_self_type(impls: &ItemImpl) -> SynResult<TypePath> {
    if let Type::Path(ty) = impls.self_ty.as_ref() {
        Ok(ty.clone())
    } else {
        Err(SynError::new(impls.self_ty.span(), "invalid self type"))
    }
}

fn get_constructor(items: &[ImplItem], impl_span: Span) -> SynResult<(&ImplItemFn, &Attribute)> {
    let ctors: Vec<_> = items
        .iter()
        .filter_map(filter_and_map_item_fn)
        .filter_map(find_inject_attribute)
        .collect();

    let (ctor, attr) = if ctors.len() > 1 {
        return Err(SynError::new(
            impl_span,
            "only one associated function can be annotated with `#[inject]`",
        ));
    } else if let Some(&found) = ctors.first() {
        found
    } else {
        return Err(SynError::new(
            impl_span,
            "no associated function is annotated with `#[inject]`",
        ));
    };

    if let Some(FnArg::Receiver(rec)) = ctor.sig.inputs.first() {
        return Err(SynError::new(
            rec.span(),
            "method is not allowed to be annotated with `#[inject]`",
        ));
    }

    Ok((ctor, attr))
}

fn filter_and_map_item_fn(item: &ImplItem) -> Option<&ImplItemFn> {
    if let ImplItem::Fn(impl_fn) = item {
        Some(impl_fn)
    } else {
        None
    }
}

fn find_inject_attribute(item_fn: &ImplItemFn) -> Option<(&ImplItemFn, &Attribute)> {
    item_fn
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("inject"))
        .map(|attr| (item_fn, attr))
}

fn parse_inject_attribute(attr: &Attribute) -> SynResult<InjectData> {
    match &attr.meta {
        Meta::Path(_) => Ok(InjectData::PerArgument),
        Meta::List(list) => {
            let names = list.parse_args_with(Punctuated::<LitStr, Comma>::parse_terminated)?;
            Ok(InjectData::Listed(names.into_iter().collect()))
        }
        Meta::NameValue(nv) => Err(SynError::new(
            nv.span(),
            "expects `#[inject]` or `#[inject(\"name\", ...)]`",
        )),
    }
}

fn parse_constructor(
    ctor: &ImplItemFn,
    attr: &Attribute,
    self_type: &TypePath,
) -> SynResult<ConstructorData> {
    let inject = parse_inject_attribute(attr)?;
    let identifier = ctor.sig.ident.clone();
    let arguments = parse_constructor_arguments(&ctor.sig.inputs, inject, ctor.sig.span())?;
    let return_type = parse_constructor_return_type(&ctor.sig.output, self_type)?;

    Ok(ConstructorData {
        identifier,
        arguments,
        return_type,
    })
}

fn parse_constructor_arguments(
    inputs: &Punctuated<FnArg, Comma>,
    inject: InjectData,
    sig_span: Span,
) -> SynResult<Vec<ArgumentData>> {
    let arguments: Vec<_> = inputs
        .iter()
        .map(|arg| {
            if let FnArg::Typed(arg) = arg {
                arg
            } else {
                unreachable!("a constructor should not have a receiver argument");
            }
        })
        .collect();

    match inject {
        InjectData::Listed(names) => {
            if names.len() != arguments.len() {
                return Err(SynError::new(
                    sig_span,
                    format!(
                        "`#[inject(...)]` lists {} names but the constructor takes {} parameters",
                        names.len(),
                        arguments.len()
                    ),
                ));
            }

            arguments
                .into_iter()
                .zip(names)
                .map(|(arg, name)| {
                    if let Some(attr) = arg.attrs.iter().find(|attr| attr.path().is_ident("named"))
                    {
                        return Err(SynError::new(
                            attr.span(),
                            "names are already listed in `#[inject(...)]`",
                        ));
                    }
                    Ok(ArgumentData {
                        span: arg.span(),
                        ty: arg.ty.clone(),
                        name,
                    })
                })
                .collect()
        }
        InjectData::PerArgument => arguments
            .into_iter()
            .map(|arg| {
                parse_argument_attributes(&arg.attrs, arg.span()).map(|name| ArgumentData {
                    span: arg.span(),
                    ty: arg.ty.clone(),
                    name,
                })
            })
            .collect(),
    }
}

fn parse_argument_attributes(attrs: &[Attribute], arg_span: Span) -> SynResult<LitStr> {
    let mut res = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("named")) {
        let Meta::List(list) = &attr.meta else {
            return Err(SynError::new(
                attr.span(),
                "expects `#[named(...)]` to receive a string literal",
            ));
        };
        if res.is_some() {
            return Err(SynError::new(
                list.span(),
                "only one `#[named(...)]` attribute is allowed",
            ));
        }
        res = Some(list.parse_args::<LitStr>()?);
    }

    res.ok_or_else(|| {
        SynError::new(
            arg_span,
            "names cannot be inferred from parameter identifiers, \
             use `#[named(\"...\")]` or list them in `#[inject(...)]`",
        )
    })
}

fn parse_constructor_return_type(
    output: &ReturnType,
    self_type: &TypePath,
) -> SynResult<ReturnTypeData> {
    let unexpected = |span| {
        SynError::new(
            span,
            "a constructor's return type should be `Self` or `Result<Self, E>`",
        )
    };

    let ReturnType::Type(_, return_type) = output else {
        return Err(unexpected(output.span()));
    };
    let Type::Path(return_type) = return_type.as_ref() else {
        return Err(unexpected(return_type.span()));
    };

    let segments = &return_type.path.segments;
    let idents: Vec<_> = segments.iter().map(|s| s.ident.to_string()).collect();

    if return_type == self_type || idents == ["Self"] {
        Ok(ReturnTypeData::Infallible)
    } else if idents == ["Result"] || idents == ["std", "result", "Result"] {
        match segments.last() {
            Some(segment) => parse_result_return_type(&segment.arguments, self_type),
            None => Err(unexpected(return_type.span())),
        }
    } else {
        Err(unexpected(return_type.span()))
    }
}

fn parse_result_return_type(
    type_args: &PathArguments,
    self_type: &TypePath,
) -> SynResult<ReturnTypeData> {
    let unexpected = |span| {
        SynError::new(
            span,
            "a constructor's return type should be `Self` or `Result<Self, E>`",
        )
    };

    let PathArguments::AngleBracketed(AngleBracketedGenericArguments { args, .. }) = type_args
    else {
        return Err(unexpected(type_args.span()));
    };

    let mut args = args.iter();
    let (
        Some(GenericArgument::Type(Type::Path(first_type))),
        Some(GenericArgument::Type(Type::Path(error_type))),
        None,
    ) = (args.next(), args.next(), args.next())
    else {
        return Err(unexpected(type_args.span()));
    };

    if first_type == self_type || first_type.path.is_ident("Self") {
        Ok(ReturnTypeData::Result {
            error_type: error_type.clone(),
        })
    } else {
        Err(unexpected(type_args.span()))
    }
}

fn expand_component_implementation(
    impls: &ItemImpl,
    self_type: &TypePath,
    ctor_data: ConstructorData,
    attr_data: AttributeData,
) -> TokenStream2 {
    let (impl_generics, _, where_clause) = impls.generics.split_for_impl();
    let constructor = &ctor_data.identifier;

    let associated_type_constructed = if let AttributeData::Full { output_type, .. } = &attr_data {
        quote! { type Constructed = #output_type; }
    } else {
        quote! { type Constructed = #self_type; }
    };

    let associated_type_error =
        if let ReturnTypeData::Result { error_type } = &ctor_data.return_type {
            quote! { type Error = #error_type; }
        } else {
            quote! { type Error = std::convert::Infallible; }
        };

    let dep_types = ctor_data.arguments.iter().map(|arg| &arg.ty);
    let names = ctor_data.arguments.iter().map(|arg| &arg.name);
    let deps: Vec<_> = ctor_data
        .arguments
        .iter()
        .enumerate()
        .map(|(i, arg)| Ident::new(&format!("dep{i}"), arg.span))
        .collect();

    let wire_deps = if let ReturnTypeData::Infallible = &ctor_data.return_type {
        quote! { Ok(Self::#constructor(#(#deps,)*)) }
    } else {
        quote! { Self::#constructor(#(#deps,)*) }
    };

    let post_process_body = if let AttributeData::Full { post_processor, .. } = &attr_data {
        quote! { #post_processor(self) }
    } else {
        quote! { self }
    };

    quote! {
        impl #impl_generics nidi::provider::component::Component for #self_type #where_clause {
            type Dependencies = (#(#dep_types,)*);
            #associated_type_constructed
            #associated_type_error

            const INJECT: &'static [&'static str] = &[#(#names),*];

            fn construct(
                (#(#deps,)*): Self::Dependencies,
            ) -> std::result::Result<Self, Self::Error> {
                #wire_deps
            }

            fn post_process(self) -> Self::Constructed {
                #post_process_body
            }
        }
    }
}
