use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Folds text to the form used for keyword comparison: lower-cased, NFD
/// decomposed with combining marks dropped, trimmed.
pub fn normalize(text: &str) -> String {
    // Lower-case first: some case mappings (e.g. 'İ') emit a combining mark.
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Same as [`normalize`] for a value that may be missing, which folds to "".
pub fn normalize_field<T: ToString>(value: Option<T>) -> String {
    match value {
        Some(v) => normalize(&v.to_string()),
        None => String::new(),
    }
}
