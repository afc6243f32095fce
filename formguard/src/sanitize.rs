//! Markup stripping for user-supplied text.
//!
//! The contract: output never contains a `<` or `>` delimiter, tag content
//! is kept as plain text, and the inner text of raw-text elements
//! (`<script>`, `<style>`) is dropped entirely. The function is idempotent,
//! total (never fails), and does no allocation beyond the output string.

/// Elements whose inner text must be dropped, not kept.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Strip all markup from `raw`, keeping plain text content, then trim.
///
/// - Tags and their attributes are removed; the text between them survives.
/// - `<script>`/`<style>` elements are removed together with their content.
/// - Stray `>` characters are dropped. A `<` followed by whitespace or end
///   of input is plain text ("price < 100"), so only the delimiter itself
///   is dropped; an unterminated `<` that starts a tag drops the rest of
///   the input (it can only be a truncated tag).
///
/// Idempotent: the output contains no `<` or `>`, so a second pass is the
/// identity.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find(['<', '>']) {
        out.push_str(&rest[..pos]);
        if rest[pos..].starts_with('>') {
            rest = &rest[pos + 1..];
            continue;
        }

        let tag_start = pos + 1;
        match rest[tag_start..].chars().next() {
            // A '<' at end of input, or followed by whitespace, cannot
            // open a tag: drop the delimiter alone and keep the text.
            None => {
                rest = "";
                break;
            }
            Some(next) if next.is_whitespace() => {
                rest = &rest[tag_start..];
                continue;
            }
            Some(_) => {}
        }
        let Some(tag_len) = rest[tag_start..].find('>') else {
            // Truncated tag: nothing after an unterminated '<' is text.
            rest = "";
            break;
        };
        let tag = &rest[tag_start..tag_start + tag_len];
        rest = &rest[tag_start + tag_len + 1..];

        if let Some(element) = raw_text_element(tag) {
            rest = skip_raw_content(rest, element);
        }
    }

    out.push_str(rest);
    out.trim().to_owned()
}

/// If `tag` opens a raw-text element, return its canonical name.
///
/// Closing (`</script`) and self-closing (`<script/>`) forms keep no
/// content, so they return `None`.
fn raw_text_element(tag: &str) -> Option<&'static str> {
    if tag.starts_with('/') || tag.ends_with('/') {
        return None;
    }
    let name_len = tag
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .count();
    let name = &tag[..name_len];
    RAW_TEXT_ELEMENTS
        .into_iter()
        .find(|element| name.eq_ignore_ascii_case(element))
}

/// Drop everything up to and including the closing tag of `element`.
///
/// The close match is ASCII-case-insensitive (`</SCRIPT >` closes
/// `<script>`). With no closing tag the rest of the input is raw content
/// and is dropped entirely.
fn skip_raw_content<'a>(rest: &'a str, element: &str) -> &'a str {
    let close = format!("</{element}");
    let Some(pos) = find_ascii_ci(rest, &close) else {
        return "";
    };
    let after = &rest[pos + close.len()..];
    match after.find('>') {
        Some(end) => &after[end + 1..],
        None => "",
    }
}

/// Find the first ASCII-case-insensitive occurrence of `needle` in `haystack`.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack.char_indices().find_map(|(start, _)| {
        haystack
            .get(start..start + needle.len())
            .filter(|window| window.eq_ignore_ascii_case(needle))
            .map(|_| start)
    })
}
