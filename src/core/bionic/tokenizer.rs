//! Single-pass tokenizer: whitespace, word and punctuation runs.

use super::WordKind;

/// Character class driving run boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    Word,
    Other,
}

/// A maximal run of one character class, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub text: &'a str,
    pub kind: WordKind,
}

/// Letters counted for the split point: ASCII plus the Latin-1, Latin Extended-A/B and
/// Latin Extended Additional blocks. `×` and `÷` are math signs, not letters.
pub(crate) fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || (matches!(c, '\u{C0}'..='\u{FF}' | '\u{100}'..='\u{24F}' | '\u{1E00}'..='\u{1EFF}')
            && c != '\u{D7}'
            && c != '\u{F7}')
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

fn class_of(c: char) -> CharClass {
    if is_space(c) {
        CharClass::Space
    } else if c.is_ascii_alphanumeric() || c == '_' || is_letter(c) {
        CharClass::Word
    } else {
        CharClass::Other
    }
}

fn classify(text: &str, class: CharClass) -> WordKind {
    match class {
        CharClass::Space => WordKind::Space,
        CharClass::Word if text.chars().any(is_letter) => WordKind::Word,
        CharClass::Word => WordKind::Other,
        CharClass::Other if text.chars().any(char::is_alphanumeric) => WordKind::Other,
        CharClass::Other => WordKind::Punctuation,
    }
}

/// Split `text` into maximal runs. Every character lands in exactly one token, in order.
pub(crate) fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices();
    let Some((_, first)) = chars.next() else {
        return tokens;
    };
    let mut start = 0;
    let mut class = class_of(first);
    for (idx, c) in chars {
        let next = class_of(c);
        if next != class {
            let run = &text[start..idx];
            tokens.push(Token {
                text: run,
                kind: classify(run, class),
            });
            start = idx;
            class = next;
        }
    }
    let run = &text[start..];
    tokens.push(Token {
        text: run,
        kind: classify(run, class),
    });
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(&str, WordKind)> {
        tokenize(text).into_iter().map(|t| (t.text, t.kind)).collect()
    }

    #[test]
    fn tokenize_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn tokenize_words_spaces_punctuation() {
        assert_eq!(
            kinds("Hello, world!"),
            vec![
                ("Hello", WordKind::Word),
                (",", WordKind::Punctuation),
                (" ", WordKind::Space),
                ("world", WordKind::Word),
                ("!", WordKind::Punctuation),
            ]
        );
    }

    #[test]
    fn tokenize_accented_letters_stay_in_word() {
        assert_eq!(kinds("café"), vec![("café", WordKind::Word)]);
        assert_eq!(kinds("Łódź"), vec![("Łódź", WordKind::Word)]);
    }

    #[test]
    fn tokenize_digits_only_is_other() {
        assert_eq!(
            kinds("42 apples"),
            vec![
                ("42", WordKind::Other),
                (" ", WordKind::Space),
                ("apples", WordKind::Word),
            ]
        );
    }

    #[test]
    fn tokenize_mixed_word_and_digits_is_word() {
        assert_eq!(kinds("mp3"), vec![("mp3", WordKind::Word)]);
    }

    #[test]
    fn tokenize_non_latin_script_is_other() {
        assert_eq!(kinds("привет"), vec![("привет", WordKind::Other)]);
    }

    #[test]
    fn tokenize_emoji_is_punctuation() {
        assert_eq!(kinds("🙂"), vec![("🙂", WordKind::Punctuation)]);
    }

    #[test]
    fn tokenize_whitespace_runs_merge() {
        assert_eq!(
            kinds("a \t\n b"),
            vec![
                ("a", WordKind::Word),
                (" \t\n ", WordKind::Space),
                ("b", WordKind::Word),
            ]
        );
    }

    #[test]
    fn math_signs_are_not_letters() {
        assert!(!is_letter('×'));
        assert!(!is_letter('÷'));
        assert!(is_letter('é'));
        assert!(is_letter('ẞ'));
    }
}
