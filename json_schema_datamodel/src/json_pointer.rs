//! JSON Pointer helpers (RFC 6901) for fragment references.
//!
//! Segments are `/`-separated, with `~` escaped as `~0` and `/` escaped as `~1`.
//! A fragment pointer is a JSON Pointer prefixed with `#` (`#/definitions/color`).

/// Appends a segment to a JSON Pointer path, applying RFC 6901 escaping.
///
/// Escaping rules: `~` -> `~0`, `/` -> `~1`
pub fn push_segment(path: &mut String, segment: &str) {
    path.push('/');
    for c in segment.chars() {
        match c {
            '~' => path.push_str("~0"),
            '/' => path.push_str("~1"),
            other => path.push(other),
        }
    }
}

/// Returns a new JSON Pointer path by appending a segment to the given path.
#[must_use]
pub fn format(path: &str, segment: &str) -> String {
    let mut result: String = path.to_string();
    push_segment(&mut result, segment);
    result
}

/// Reverses RFC 6901 escaping for one segment. Returns `None` for a `~` that
/// is not followed by `0` or `1`.
#[must_use]
pub fn unescape_segment(segment: &str) -> Option<String> {
    let mut result: String = String::with_capacity(segment.len());
    let mut chars: std::str::Chars<'_> = segment.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => result.push('~'),
                Some('1') => result.push('/'),
                _ => return None,
            }
        } else {
            result.push(c);
        }
    }
    Some(result)
}

/// Splits a fragment pointer (`#/a/b`) into unescaped segments.
///
/// `"#"` yields no segments. Returns `None` if the fragment does not start with
/// `#`, the pointer after `#` is not empty and does not start with `/`, or a
/// segment has an invalid escape.
#[must_use]
pub fn fragment_segments(fragment: &str) -> Option<Vec<String>> {
    let pointer: &str = fragment.strip_prefix('#')?;
    if pointer.is_empty() {
        return Some(Vec::new());
    }
    let rest: &str = pointer.strip_prefix('/')?;
    rest.split('/').map(unescape_segment).collect()
}
