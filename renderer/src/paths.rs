use std::sync::LazyLock;

use regex::Regex;

/// `href` of a `<link>` or `src` of an `<img>`, double-quoted.
static ASSET_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<(?:link|img)\b[^>]*?\s(?:href|src)\s*=\s*"([^"]*)""#).unwrap()
});

/// Prefix relative stylesheet and image references with `base`.
///
/// Each distinct reference is replaced wherever its exact text occurs in the
/// markup, not only inside the tag it was found in.
pub fn rewrite_paths(markup: &str, base: &str) -> String {
    let mut refs: Vec<&str> = Vec::new();
    for caps in ASSET_REF.captures_iter(markup) {
        let Some(value) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        if is_relative(value) && !refs.contains(&value) {
            refs.push(value);
        }
    }

    let base = base.trim_end_matches('/');
    let mut page = markup.to_string();
    for value in refs {
        let rewritten = format!("{}/{}", base, value);
        tracing::debug!(from = value, to = %rewritten, "rewriting asset path");
        page = page.replace(value, &rewritten);
    }
    page
}

fn is_relative(url: &str) -> bool {
    if url.is_empty() || url.starts_with('/') || url.starts_with('#') {
        return false;
    }
    // A scheme is letters, digits, `+`, `-` or `.` before the first `:`.
    match url.split_once(':') {
        Some((scheme, _)) => {
            scheme.is_empty()
                || !scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => true,
    }
}
