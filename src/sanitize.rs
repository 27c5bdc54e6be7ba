// HTML escaping for untrusted text (author names, comment bodies, URIs).
//
// Every string that reaches the view tree from the backend goes through
// `escape_html`. Well-formed character references are kept as-is, so
// escaping already-escaped text is a no-op and YouTube's own entity-encoded
// text (`&#39;`, `&quot;`) displays as intended.

use std::sync::LazyLock;

use regex_lite::Regex;

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});")
        .expect("entity pattern is valid")
});

/// Escape a string for use as HTML text or a quoted attribute value.
///
/// Idempotent: `escape_html(&escape_html(s)) == escape_html(s)`.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    for (i, c) in input.char_indices() {
        match c {
            '&' => match ENTITY.find(&input[i..]) {
                Some(_) => out.push('&'),
                None => out.push_str("&amp;"),
            },
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
