//! Character tables shared by the normalizer and the sentence splitter

/// Glyphs that open a bulleted item and force a sentence split
pub const BULLET_GLYPHS: [char; 5] = ['•', '‣', '◦', '⁃', '∙'];

/// Leading list markers removed during normalization.
///
/// Includes the ASCII asterisk, which is never used as a split point because
/// it also marks footnotes inside running text.
pub const LIST_MARKERS: [char; 6] = ['*', '•', '‣', '◦', '⁃', '∙'];

/// Sentence-terminal punctuation
pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Dash and hyphen variants folded to `-`
pub const DASHES: [char; 6] = [
    '\u{2010}', // hyphen
    '\u{2011}', // non-breaking hyphen
    '\u{2012}', // figure dash
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{2015}', // horizontal bar
];

/// Invisible characters dropped entirely
pub const INVISIBLES: [char; 4] = [
    '\u{00AD}', // soft hyphen
    '\u{200B}', // zero width space
    '\u{200C}', // zero width non-joiner
    '\u{200D}', // zero width joiner
];

/// Punctuation removed before comparison; periods are kept
pub const STRIPPED_PUNCTUATION: [char; 9] = [',', ';', ':', '"', '“', '”', '„', '(', ')'];

/// Uppercase letters outside `A-Z` that may open a German sentence
pub const GERMAN_UPPERCASE: [char; 4] = ['Ä', 'Ö', 'Ü', 'ẞ'];

/// Check if character is a bullet glyph
#[inline]
pub fn is_bullet(ch: char) -> bool {
    BULLET_GLYPHS.contains(&ch)
}

/// Check if character is a leading list marker
#[inline]
pub fn is_list_marker(ch: char) -> bool {
    LIST_MARKERS.contains(&ch)
}

/// Check if character ends a sentence
#[inline]
pub fn is_terminator(ch: char) -> bool {
    TERMINATORS.contains(&ch)
}

/// Check if character can start a new sentence
#[inline]
pub fn is_sentence_start(ch: char) -> bool {
    ch.is_ascii_uppercase() || GERMAN_UPPERCASE.contains(&ch)
}

/// Check if text ends with sentence-terminal punctuation
#[inline]
pub fn ends_with_terminator(text: &str) -> bool {
    text.chars().next_back().is_some_and(is_terminator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminator_lookup() {
        assert!(is_terminator('.'));
        assert!(is_terminator('!'));
        assert!(is_terminator('?'));
        assert!(!is_terminator(','));
        assert!(!is_terminator(':'));
    }

    #[test]
    fn test_sentence_start() {
        assert!(is_sentence_start('D'));
        assert!(is_sentence_start('Ä'));
        assert!(is_sentence_start('Ü'));
        assert!(!is_sentence_start('d'));
        assert!(!is_sentence_start('ä'));
        assert!(!is_sentence_start('1'));
    }

    #[test]
    fn test_asterisk_is_marker_but_not_bullet() {
        assert!(is_list_marker('*'));
        assert!(!is_bullet('*'));
        assert!(is_bullet('•'));
    }

    #[test]
    fn test_ends_with_terminator() {
        assert!(ends_with_terminator("Ende."));
        assert!(ends_with_terminator("Wirklich?"));
        assert!(!ends_with_terminator("kein Ende"));
        assert!(!ends_with_terminator(""));
    }
}
