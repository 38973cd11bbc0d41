//! Minimal HTML helpers shared by the editor and player pages

use serde::Serialize;

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Serialize `value` for embedding inside a `<script>` element
///
/// `<` is written as a unicode escape so the payload cannot close the element.
pub fn script_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

/// Wrap head and body markup in a complete document
pub fn page(title: &str, head: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n{}</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        head,
        body
    )
}
