/// Separator used in the stored tag string
pub const TAG_SEPARATOR: char = ';';

/// Parse a tag string into individual tags.
///
/// Both `;` and `,` separate tags. Tags are trimmed, empty entries dropped and
/// duplicates removed while keeping first-occurrence order.
pub fn parse_tags(tags_str: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in tags_str
        .split([TAG_SEPARATOR, ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Join tags with the canonical separator
pub fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(&TAG_SEPARATOR.to_string())
}

/// Canonical form of a tag string
pub fn normalize_tags(tags_str: &str) -> String {
    join_tags(&parse_tags(tags_str))
}
