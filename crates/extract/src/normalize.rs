use std::borrow::Cow;

/// Normalize line endings (`\r\n` and lone `\r`) to `\n`.
pub fn sanitize(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Split text into trimmed, whitespace-collapsed, non-empty lines, in order.
pub fn normalize_lines(raw: &str) -> Vec<String> {
    sanitize(raw)
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect()
}
