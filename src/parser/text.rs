//! Text normalization shared by the parsers.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s\u{00A0}]+").expect("valid regex"))
}

/// NFC-normalize text and collapse whitespace runs to a single space.
///
/// Leading and trailing whitespace is kept (as one space) so runs can be
/// concatenated without gluing words together.
pub fn normalize_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    whitespace_run().replace_all(&composed, " ").into_owned()
}

/// Check if a character belongs to a script written without word spaces.
///
/// Hangul is excluded: Korean uses word spaces.
pub fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2EBEF).contains(&code)
        || (0x3040..=0x309F).contains(&code)
        || (0x30A0..=0x30FF).contains(&code)
        || (0x3000..=0x303F).contains(&code)
}

/// Decode a PDF string without font encoding information.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_text("a \t\n b\u{00A0}\u{00A0}c"), "a b c");
        assert_eq!(normalize_text("  padded  "), " padded ");
    }

    #[test]
    fn test_normalize_composes() {
        // e + combining acute accent
        assert_eq!(normalize_text("cafe\u{0301}"), "caf\u{00E9}");
    }

    #[test]
    fn test_spaceless_scripts() {
        assert!(is_spaceless_script_char('漢'));
        assert!(is_spaceless_script_char('か'));
        assert!(!is_spaceless_script_char('한'));
        assert!(!is_spaceless_script_char('a'));
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0x48, 0x65, 0x6C, 0x6C, 0xE9]), "Hellé");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
    }
}
