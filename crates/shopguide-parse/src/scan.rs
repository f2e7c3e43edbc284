//! Delimiter scanning shared by the attribute decoders.
//!
//! The catalog format has no escaping: commas separate pairs unless they sit
//! inside a `[...]` list, and lists never nest in practice. A single depth
//! counter is enough; anything it cannot balance is reported as malformed.

/// Splits `record` on commas at bracket depth zero.
///
/// Returns `None` when a `]` closes more than was opened or a `[` is never
/// closed.
pub(crate) fn split_top_level(record: &str) -> Option<Vec<&str>> {
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut parts = Vec::new();

    // Delimiters are ASCII, so byte offsets are always char boundaries.
    for (i, b) in record.bytes().enumerate() {
        match b {
            b'[' => depth += 1,
            b']' => depth = depth.checked_sub(1)?,
            b',' if depth == 0 => {
                parts.push(&record[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return None;
    }
    parts.push(&record[start..]);
    Some(parts)
}

/// Splits the inside of a `[...]` list on commas, trimming each item and
/// dropping empty ones.
pub(crate) fn split_list(inner: &str) -> Vec<&str> {
    inner
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}
