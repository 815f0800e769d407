// src/splitter.rs

//! Unit splitter: breaks the input text into the units that become strips.
//!
//! `Units` is a lazy, single-pass iterator. Under `SplitPolicy::Words` the
//! space delimiter is discarded and runs of delimiters never yield an empty
//! unit, including at the start or end of the text. Under `SplitPolicy::Chars`
//! every Unicode scalar value (spaces included) is its own unit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const WORD_DELIMITER: char = ' ';

/// How the text is cut into units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitPolicy {
    #[default]
    Words,
    Chars,
}

impl FromStr for SplitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "words" | "word" => Ok(SplitPolicy::Words),
            "chars" | "char" => Ok(SplitPolicy::Chars),
            _ => Err(format!(
                "unknown split policy \"{s}\": expected \"words\" or \"chars\""
            )),
        }
    }
}

impl fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitPolicy::Words => write!(f, "words"),
            SplitPolicy::Chars => write!(f, "chars"),
        }
    }
}

/// One segment of the source text, tagged with its position in the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    index: usize,
    text: String,
}

impl TextUnit {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> std::str::Chars<'_> {
        self.text.chars()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Lazy iterator over the units of a text.
#[derive(Debug)]
pub struct Units<'a> {
    rest: &'a str,
    policy: SplitPolicy,
    next_index: usize,
}

impl<'a> Units<'a> {
    pub fn new(text: &'a str, policy: SplitPolicy) -> Self {
        Self {
            rest: text,
            policy,
            next_index: 0,
        }
    }

    fn emit(&mut self, unit: &str) -> TextUnit {
        let unit = TextUnit::new(self.next_index, unit);
        self.next_index += 1;
        unit
    }
}

impl Iterator for Units<'_> {
    type Item = TextUnit;

    fn next(&mut self) -> Option<TextUnit> {
        match self.policy {
            SplitPolicy::Words => {
                let start = self.rest.trim_start_matches(WORD_DELIMITER);
                if start.is_empty() {
                    self.rest = "";
                    return None;
                }
                let (word, rest) = start.split_once(WORD_DELIMITER).unwrap_or((start, ""));
                self.rest = rest;
                Some(self.emit(word))
            }
            SplitPolicy::Chars => {
                let ch = self.rest.chars().next()?;
                let (unit, rest) = self.rest.split_at(ch.len_utf8());
                self.rest = rest;
                Some(self.emit(unit))
            }
        }
    }
}

impl std::iter::FusedIterator for Units<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        Units::new(text, SplitPolicy::Words)
            .map(TextUnit::into_text)
            .collect()
    }

    fn chars(text: &str) -> Vec<String> {
        Units::new(text, SplitPolicy::Chars)
            .map(TextUnit::into_text)
            .collect()
    }

    #[test]
    fn splits_on_single_spaces() {
        assert_eq!(words("a b"), vec!["a", "b"]);
    }

    #[test]
    fn trailing_delimiter_yields_no_empty_unit() {
        assert_eq!(words("a b "), vec!["a", "b"]);
        assert_eq!(words("a b   "), vec!["a", "b"]);
    }

    #[test]
    fn leading_and_repeated_delimiters_collapse() {
        assert_eq!(words("  Hi   there"), vec!["Hi", "there"]);
    }

    #[test]
    fn no_delimiter_is_one_unit() {
        assert_eq!(words("Bandersnatch!"), vec!["Bandersnatch!"]);
    }

    #[test]
    fn empty_and_blank_inputs_yield_nothing() {
        assert!(words("").is_empty());
        assert!(words("   ").is_empty());
        assert!(chars("").is_empty());
    }

    #[test]
    fn words_rejoin_to_the_input() {
        let text = crate::text::jabberwocky();
        assert_eq!(words(&text).join(" "), text);
    }

    #[test]
    fn chars_concatenate_to_the_input() {
        let text = "’Twas a b ";
        let units = chars(text);
        assert_eq!(units.len(), text.chars().count());
        assert_eq!(units.concat(), text);
        assert!(units.iter().all(|u| u.chars().count() == 1));
    }

    #[test]
    fn indices_follow_document_order() {
        let indices: Vec<usize> = Units::new("one two three", SplitPolicy::Words)
            .map(|u| u.index())
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Words".parse::<SplitPolicy>(), Ok(SplitPolicy::Words));
        assert_eq!("chars".parse::<SplitPolicy>(), Ok(SplitPolicy::Chars));
        assert!("lines".parse::<SplitPolicy>().is_err());
    }
}
