//! Bionic reading: split each word into an emphasized prefix and a normal suffix.
//!
//! The prefix length depends on how many letters the word has; whitespace,
//! punctuation and letterless runs pass through untouched. Output borrows from
//! the input and always concatenates back to it.

mod tokenizer;

use serde::Serialize;

use tokenizer::{is_letter, tokenize};

/// Classification of a [`BionicWord`]. Exactly one kind per word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WordKind {
    /// Word with at least one letter; the only kind with a bold prefix.
    Word,
    Space,
    Punctuation,
    /// Run without countable letters (digits, `_`, non-Latin scripts), left unsplit.
    Other,
}

/// One token of the input with its bold/normal split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BionicWord<'a> {
    pub bold: &'a str,
    pub normal: &'a str,
    pub original: &'a str,
    pub kind: WordKind,
}

impl<'a> BionicWord<'a> {
    fn passthrough(original: &'a str, kind: WordKind) -> Self {
        Self {
            bold: "",
            normal: original,
            original,
            kind,
        }
    }

    pub fn is_space(&self) -> bool {
        self.kind == WordKind::Space
    }

    pub fn is_punctuation(&self) -> bool {
        self.kind == WordKind::Punctuation
    }
}

/// Processed text: the word list plus the input it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BionicText<'a> {
    pub words: Vec<BionicWord<'a>>,
    pub original_text: &'a str,
}

/// Summary numbers about a processed text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BionicStats {
    pub total_words: usize,
    pub words_with_bold: usize,
    /// Mean of bold chars / word chars over counted words, rounded to 2 decimals.
    pub average_bold_ratio: f64,
    /// Input length in characters.
    pub original_length: usize,
}

/// Number of letters to emphasize for a word with `letters` letters.
pub(crate) fn split_point(letters: usize) -> usize {
    match letters {
        0..=3 => 1,
        4..=5 => letters.div_ceil(2),
        6..=8 => (letters * 4).div_ceil(10),
        _ => (letters * 35).div_ceil(100),
    }
}

/// Byte index right after the `split_point`-th letter, or 0 when the word has no letters.
fn split_index(word: &str) -> usize {
    let letters = word.chars().filter(|c| is_letter(*c)).count();
    if letters == 0 {
        return 0;
    }
    let target = split_point(letters);
    word.char_indices()
        .filter(|(_, c)| is_letter(*c))
        .nth(target - 1)
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0)
}

fn process_word(original: &str, kind: WordKind) -> BionicWord<'_> {
    if kind != WordKind::Word {
        return BionicWord::passthrough(original, kind);
    }
    let (bold, normal) = original.split_at(split_index(original));
    BionicWord {
        bold,
        normal,
        original,
        kind,
    }
}

/// Convert text into bionic words. Total: empty input gives an empty word list.
pub fn process_bionic_text(text: &str) -> BionicText<'_> {
    let words = tokenize(text)
        .into_iter()
        .map(|token| process_word(token.text, token.kind))
        .collect();
    BionicText {
        words,
        original_text: text,
    }
}

/// Reassemble the plain text from processed words.
#[allow(dead_code)]
pub fn bionic_to_plain_text(text: &BionicText<'_>) -> String {
    text.words.iter().map(|w| w.original).collect()
}

/// Word counts and the average emphasized share of each word.
pub fn bionic_stats(text: &BionicText<'_>) -> BionicStats {
    let counted: Vec<&BionicWord<'_>> = text
        .words
        .iter()
        .filter(|w| !w.is_space() && !w.is_punctuation())
        .collect();
    let words_with_bold = text.words.iter().filter(|w| !w.bold.is_empty()).count();
    let average_bold_ratio = if counted.is_empty() {
        0.0
    } else {
        let sum: f64 = counted
            .iter()
            .map(|w| w.bold.chars().count() as f64 / w.original.chars().count() as f64)
            .sum();
        (sum / counted.len() as f64 * 100.0).round() / 100.0
    };
    BionicStats {
        total_words: counted.len(),
        words_with_bold,
        average_bold_ratio,
        original_length: text.original_text.chars().count(),
    }
}
