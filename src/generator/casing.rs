//! String casing helpers shared by the emitters.

fn is_separator(c: char) -> bool {
    matches!(c, '_' | '-' | ' ' | '/' | '.' | '\t')
}

/// Split an identifier into words at separators and case boundaries.
///
/// `listAllHandler` → `["list", "All", "Handler"]`, `HTTPServer` → `["HTTP", "Server"]`,
/// `user_role` → `["user", "role"]`.
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if is_separator(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Uppercase the first character, leave the rest untouched.
pub fn title(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert separated words to an upper camel case identifier.
///
/// Only the first letter of each word changes, so `userRole` stays `UserRole`.
pub fn to_camel_case(s: &str) -> String {
    s.split(is_separator).map(title).collect()
}

/// Convert an identifier to lower snake case: `UserRole` → `user_role`.
pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}
