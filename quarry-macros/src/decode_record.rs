use convert_case::{Case, Casing};
use syn::{Ident, ItemStruct, LitStr, Type};

pub(crate) struct RecordMetadata {
    pub(crate) table: String,
    pub(crate) primary_key: String,
    pub(crate) attributes: Ident,
}

pub(crate) fn decode_record(item: &ItemStruct) -> RecordMetadata {
    let mut table = item.ident.to_string().to_case(Case::Snake);
    let mut primary_key = "id".to_string();
    for attr in item.attrs.iter().filter(|v| v.path().is_ident("quarry")) {
        if let Err(e) = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                table = meta.value()?.parse::<LitStr>()?.value();
            } else if meta.path.is_ident("primary_key") {
                primary_key = meta.value()?.parse::<LitStr>()?.value();
            } else {
                return Err(meta.error("unsupported quarry attribute"));
            }
            Ok(())
        }) {
            panic!(
                "Error while parsing `quarry`, use it like #[quarry(table = \"{}\", primary_key = \"id\")]: {}",
                table, e
            );
        }
    }
    if table.is_empty() || primary_key.is_empty() {
        panic!("The table name and the primary key of `{}` cannot be empty", item.ident);
    }
    let attributes = item
        .fields
        .iter()
        .find(|f| is_attributes(&f.ty))
        .and_then(|f| f.ident.clone())
        .unwrap_or_else(|| {
            panic!(
                "`{}` must have a named field of type `Attributes` to derive Record",
                item.ident
            )
        });
    RecordMetadata {
        table,
        primary_key,
        attributes,
    }
}

fn is_attributes(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    path.path
        .segments
        .last()
        .is_some_and(|v| v.ident == "Attributes")
}
