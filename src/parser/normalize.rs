//! Line-level text normalization.

use unicode_normalization::UnicodeNormalization;

const LIGATURES: &[(char, &str)] = &[
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// Normalize one extracted line: NFC, ligatures expanded, replacement
/// characters and soft hyphens dropped, Unicode spaces folded to ASCII and
/// whitespace runs collapsed.
pub fn normalize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut pending_space = false;

    for c in line.nfc() {
        match c {
            '\u{FFFD}' | '\u{00AD}' | '\u{200B}' | '\u{FEFF}' => {}
            c if c.is_whitespace() => pending_space = true,
            c => {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                match LIGATURES.iter().find(|(lig, _)| *lig == c) {
                    Some((_, expanded)) => out.push_str(expanded),
                    None => out.push(c),
                }
            }
        }
    }

    out
}

/// Join a continuation line onto accumulated text.
///
/// A trailing hyphen followed by a lowercase start is treated as a word
/// broken across lines and joined without a space.
pub fn join_continuation(acc: &mut String, next: &str) {
    if acc.is_empty() {
        acc.push_str(next);
        return;
    }

    let starts_lower = next.chars().next().is_some_and(char::is_lowercase);
    let hyphenated = acc.ends_with('-') && !acc.ends_with("--") && !acc.ends_with(" -");
    if hyphenated && starts_lower {
        acc.pop();
    } else {
        acc.push(' ');
    }
    acc.push_str(next);
}

/// Whether every cased character in the line is uppercase and it contains at
/// least `min_letters` letters.
pub fn is_uppercase_line(line: &str, min_letters: usize) -> bool {
    let mut letters = 0;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_alphabetic() {
            letters += 1;
        }
    }
    letters >= min_letters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_line("  Of   the\tPunishments  "), "Of the Punishments");
        assert_eq!(normalize_line("\u{00A0}302.\u{2003}Murder"), "302. Murder");
        assert_eq!(normalize_line("   "), "");
    }

    #[test]
    fn test_normalize_ligatures_and_junk() {
        assert_eq!(normalize_line("o\u{FB03}ce"), "office");
        assert_eq!(normalize_line("de\u{FB01}nition"), "definition");
        assert_eq!(normalize_line("of\u{00AD}fence\u{FFFD}"), "offence");
    }

    #[test]
    fn test_normalize_nfc() {
        // e + combining acute composes to a single scalar
        assert_eq!(normalize_line("caf\u{0065}\u{0301}"), "caf\u{00E9}");
    }

    #[test]
    fn test_join_continuation() {
        let mut acc = String::from("Whoever commits");
        join_continuation(&mut acc, "murder shall be");
        assert_eq!(acc, "Whoever commits murder shall be");

        let mut acc = String::from("impri-");
        join_continuation(&mut acc, "sonment for life");
        assert_eq!(acc, "imprisonment for life");

        let mut acc = String::from("Section 34 -");
        join_continuation(&mut acc, "acts done");
        assert_eq!(acc, "Section 34 - acts done");

        let mut acc = String::new();
        join_continuation(&mut acc, "first");
        assert_eq!(acc, "first");
    }

    #[test]
    fn test_is_uppercase_line() {
        assert!(is_uppercase_line("OF OFFENCES AFFECTING THE HUMAN BODY", 3));
        assert!(is_uppercase_line("CHAPTER XVI", 3));
        assert!(!is_uppercase_line("Of murder", 3));
        assert!(!is_uppercase_line("12", 3));
        assert!(!is_uppercase_line("(A)", 3));
    }
}
