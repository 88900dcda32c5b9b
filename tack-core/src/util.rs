use crate::Value;
use std::borrow::Cow;

pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Renders the arguments of a statement for logging, e.g. `[1, 'thing', NULL]`.
pub fn printable_args(args: &[Value]) -> String {
    let mut out = String::from("[");
    separated_by(
        &mut out,
        args,
        |out, v| out.push_str(&v.to_string()),
        ", ",
    );
    out.push(']');
    out
}

/// Shortens long statements for log records.
pub fn truncate_long(query: &str) -> Cow<'_, str> {
    match query.char_indices().nth(497) {
        Some((end, _)) => Cow::Owned(format!("{}...", query[..end].trim_end())),
        None => Cow::Borrowed(query),
    }
}
