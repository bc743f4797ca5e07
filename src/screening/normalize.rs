/// Canonical text form used for substring matching: lowercase, with every
/// non-alphanumeric run collapsed to a single space and the ends trimmed.
///
/// The same function is applied to resume text and to configured keywords so
/// both sides of a containment check share one alphabet. Applying it twice
/// yields the same string.
pub fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut gap_pending = false;

    for ch in text.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            if gap_pending && !normalized.is_empty() {
                normalized.push(' ');
            }
            gap_pending = false;
            normalized.push(ch);
        } else {
            gap_pending = true;
        }
    }

    normalized
}
