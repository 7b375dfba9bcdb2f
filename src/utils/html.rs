// src/utils/html.rs

use std::collections::HashSet;

/// Entities the sanitizer emits when it serializes text back out.
/// `&amp;` must be decoded last so `&amp;lt;` stays a literal `&lt;`.
const ENTITIES: [(&str, &str); 6] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", "\u{a0}"),
    ("&amp;", "&"),
];

/// Strips markup from user-supplied display text such as quiz names.
///
/// Tags are dropped (script and style together with their content) and the
/// remaining text is returned as plain text, not HTML. Surrounding
/// whitespace is trimmed.
pub fn clean_text(input: &str) -> String {
    let escaped = ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(input.trim())
        .to_string();

    ENTITIES
        .iter()
        .fold(escaped, |text, (entity, plain)| text.replace(entity, plain))
        .trim()
        .to_string()
}
