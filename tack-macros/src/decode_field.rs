use syn::{Expr, ExprLit, Field, Ident, Lit, LitStr, Meta, Visibility};

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    pub(crate) name: String,
    pub(crate) tag: String,
}

/// Reads name and tag of a field, `None` for private fields: they cannot be mapped.
pub(crate) fn decode_field(field: &Field) -> Option<FieldMetadata> {
    if let Visibility::Inherited = field.vis {
        return None;
    }
    let Some(ident) = field.ident.clone() else {
        panic!("Record can only be derived for structs with named fields");
    };
    let mut name = ident.to_string();
    if name.starts_with("r#") {
        name.drain(..2);
    }
    let mut tag = String::new();
    for attr in &field.attrs {
        let meta = &attr.meta;
        if !meta.path().is_ident("sql") {
            continue;
        }
        tag = match meta {
            Meta::NameValue(v) => {
                let Expr::Lit(ExprLit {
                    lit: Lit::Str(v), ..
                }) = &v.value
                else {
                    panic!(
                        "Error while parsing `sql` on field `{}`, use it like: `#[sql = \"column,flag\"]`",
                        name
                    );
                };
                v.value()
            }
            Meta::List(v) => {
                let Ok(v) = v.parse_args::<LitStr>() else {
                    panic!(
                        "Error while parsing `sql` on field `{}`, use it like: `#[sql(\"column,flag\")]`",
                        name
                    );
                };
                v.value()
            }
            Meta::Path(..) => {
                panic!(
                    "Attribute `sql` on field `{}` requires a tag, use it like: `#[sql = \"column,flag\"]`",
                    name
                );
            }
        };
    }
    Some(FieldMetadata { ident, name, tag })
}
