//! Wake-phrase detection and stripping for the voice capture path.
//!
//! The trigger is a fixed phrase, matched case-insensitively with word
//! boundaries so that embedded fragments ("hey jonnyx") do not fire. A
//! common recognizer misspelling of the name is accepted as a variant.

/// Accepted wake phrases, canonical form first.
pub const WAKE_PHRASES: &[&str] = &["hey jonny", "hey johnny"];

/// Find the earliest wake-phrase occurrence in `text`.
///
/// Returns `(byte_pos, matched_len)` of the first boundary-valid match
/// across all variants, or `None`. Matching is ASCII case-insensitive on the
/// original text, so the offsets index into `text` directly.
#[must_use]
pub fn find_wake_phrase(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();

    let mut best: Option<(usize, usize)> = None;
    for phrase in WAKE_PHRASES {
        let needle = phrase.as_bytes();
        if needle.is_empty() || needle.len() > bytes.len() {
            continue;
        }
        for pos in 0..=(bytes.len() - needle.len()) {
            if !bytes[pos..pos + needle.len()].eq_ignore_ascii_case(needle) {
                continue;
            }
            let end = pos + needle.len();

            // Word boundary check: start/end of text or a non-alphanumeric
            // neighbour. Avoids firing inside longer words.
            let start_ok = pos == 0 || !bytes[pos - 1].is_ascii_alphanumeric();
            let end_ok = end >= bytes.len() || !bytes[end].is_ascii_alphanumeric();
            if start_ok && end_ok {
                best = match best {
                    Some(prev) if prev.0 <= pos => Some(prev),
                    _ => Some((pos, needle.len())),
                };
                break;
            }
        }
    }
    best
}

/// Returns `true` when `text` contains a wake phrase.
#[must_use]
pub fn contains_wake_phrase(text: &str) -> bool {
    find_wake_phrase(text).is_some()
}

/// Strip the first wake-phrase occurrence from `text` and return the
/// remaining command text, or `None` when no wake phrase is present.
///
/// Text before and after the phrase is kept and rejoined; separators and
/// whitespace around the removed phrase are trimmed away, so
/// "hey jonny, search for cats" becomes "search for cats".
#[must_use]
pub fn strip_wake_phrase(text: &str) -> Option<String> {
    let (pos, len) = find_wake_phrase(text)?;

    let before = text[..pos]
        .trim_end_matches([',', ':', '.', '!', '?'])
        .trim();
    let after = text[pos + len..]
        .trim_start_matches([',', ':', '.', '!', '?'])
        .trim();

    let mut command = String::with_capacity(before.len() + after.len() + 1);
    command.push_str(before);
    if !before.is_empty() && !after.is_empty() {
        command.push(' ');
    }
    command.push_str(after);
    Some(command)
}
