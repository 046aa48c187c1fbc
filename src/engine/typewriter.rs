//! Fixed-cadence typing of a section phrase, shown while the music is off.

/// Prefix of `text` typed after `elapsed_ms` at one character per `interval_ms`.
///
/// A zero interval types everything at once.
pub fn typewriter_reveal(text: &str, elapsed_ms: u64, interval_ms: u64) -> &str {
    if interval_ms == 0 {
        return text;
    }
    typed_prefix(text, usize::try_from(elapsed_ms / interval_ms).unwrap_or(usize::MAX))
}

/// First `chars` characters of `text`, never splitting one.
pub fn typed_prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_char_per_interval() {
        assert_eq!(typewriter_reveal("Right next to you", 0, 60), "");
        assert_eq!(typewriter_reveal("Right next to you", 59, 60), "");
        assert_eq!(typewriter_reveal("Right next to you", 60, 60), "R");
        assert_eq!(typewriter_reveal("Right next to you", 300, 60), "Right");
        assert_eq!(typewriter_reveal("Right next to you", 60_000, 60), "Right next to you");
    }

    #[test]
    fn zero_interval_is_instant() {
        assert_eq!(typewriter_reveal("abc", 0, 0), "abc");
    }

    #[test]
    fn prefix_counts_characters() {
        assert_eq!(typed_prefix("Ñandú", 2), "Ña");
        assert_eq!(typed_prefix("Ñandú", 0), "");
        assert_eq!(typed_prefix("Ñandú", 99), "Ñandú");
    }
}
