/// Normalize configured extensions: trimmed, without leading dot, lowercase.
pub fn normalized_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Return the extension from `extensions` that `name` ends with (case-insensitive).
///
/// `extensions` must already be normalized.
pub fn matching_extension<'a>(name: &str, extensions: &'a [String]) -> Option<&'a str> {
    let lower = name.to_ascii_lowercase();
    extensions
        .iter()
        .find(|ext| {
            lower.len() > ext.len()
                && lower.ends_with(ext.as_str())
                && lower.as_bytes()[lower.len() - ext.len() - 1] == b'.'
        })
        .map(String::as_str)
}

/// Strip `.ext` from the end of `name`, falling back to `name` when nothing is left.
pub fn display_name(name: &str, ext: &str) -> String {
    let cut = ext.len() + 1;
    if name.len() <= cut || !name.is_char_boundary(name.len() - cut) {
        return name.to_string();
    }
    let stem = &name[..name.len() - cut];
    if stem.trim().is_empty() {
        name.to_string()
    } else {
        stem.to_string()
    }
}
