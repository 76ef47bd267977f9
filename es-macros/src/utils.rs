use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{DeriveInput, Expr, Ident, LitStr, Result as SynResult, Token, parse::Parse};

// 解析 `#[<attr>(name = "...")]`，缺省时使用类型名
pub(crate) fn stable_name(input: &DeriveInput, attr_name: &str) -> SynResult<LitStr> {
    let mut name: Option<LitStr> = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident(attr_name)) {
        let pairs: Punctuated<AttrKv, Token![,]> =
            attr.parse_args_with(Punctuated::<AttrKv, Token![,]>::parse_terminated)?;

        for kv in pairs {
            match kv.key.to_string().as_str() {
                "name" => {
                    if name.is_some() {
                        return Err(syn::Error::new(
                            kv.key.span(),
                            "duplicate key 'name' in attribute",
                        ));
                    }
                    let lit = match kv.value {
                        Expr::Lit(syn::ExprLit {
                            lit: syn::Lit::Str(lit),
                            ..
                        }) => lit,
                        other => {
                            return Err(syn::Error::new(
                                other.span(),
                                "expected string literal for 'name'",
                            ));
                        }
                    };
                    if lit.value().trim().is_empty() {
                        return Err(syn::Error::new(lit.span(), "'name' must not be empty"));
                    }
                    name = Some(lit);
                }
                _ => {
                    return Err(syn::Error::new(
                        kv.key.span(),
                        "unknown key in attribute; expected 'name'",
                    ));
                }
            }
        }
    }

    Ok(name.unwrap_or_else(|| LitStr::new(&input.ident.to_string(), input.ident.span())))
}

struct AttrKv {
    key: Ident,
    #[allow(dead_code)]
    eq: Token![=],
    value: Expr,
}

impl Parse for AttrKv {
    fn parse(input: syn::parse::ParseStream) -> SynResult<Self> {
        Ok(Self {
            key: input.parse()?,
            eq: input.parse()?,
            value: input.parse()?,
        })
    }
}
