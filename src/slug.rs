use std::sync::LazyLock;

use regex::Regex;

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// URL-safe identifier for `text`: ASCII-folded, lowercased, quotes dropped and
/// every other run of non-alphanumerics collapsed into a single `-`.
///
/// Returns an empty string when nothing alphanumeric survives.
pub fn slugify(text: &str) -> String {
    let folded = deunicode::deunicode(text).to_lowercase();
    let unquoted: String = folded.chars().filter(|c| *c != '\'' && *c != '"').collect();
    SEPARATORS
        .replace_all(&unquoted, "-")
        .trim_matches('-')
        .to_string()
}

/// Display title for a slug: `-` becomes a space and every alphabetic run is
/// capitalized (`"hello-world-2"` -> `"Hello World 2"`).
pub fn humanize(slug: &str) -> String {
    let mut res = String::with_capacity(slug.len());
    let mut in_word = false;
    for c in slug.chars() {
        let c = if c == '-' { ' ' } else { c };
        if c.is_alphabetic() {
            if in_word {
                res.extend(c.to_lowercase());
            } else {
                res.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            res.push(c);
            in_word = false;
        }
    }
    res
}
