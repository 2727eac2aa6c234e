use crate::{
    letters::{letters_of, LetterCounts, LetterMap},
    scoring::letter_goodness,
};
use color_eyre::eyre::{ensure, Result, WrapErr};
use itertools::Itertools;
use std::{
    fmt::{self, Display},
    path::Path,
};

/// Words beyond this rank are never considered.
pub const MAX_WORDS: usize = 10_000;

/// Penalty offset added to a word's rank before dividing its score.
const RANK_OFFSET: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    counts: LetterMap<i32>,
}

impl Word {
    fn parse(raw: &str) -> Option<Self> {
        let text = raw.to_ascii_lowercase();
        let mut counts = LetterMap::default();
        for letter in letters_of(&text) {
            counts[letter] += 1;
        }
        if counts.iter().all(|&count| count == 0) {
            return None;
        }
        Some(Self { text, counts })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The residual left after spelling this word out of the surplus in
    /// `counts`, or `None` when some letter of the word is not available.
    ///
    /// Every letter of the word is checked; letters the word does not use
    /// are carried over even when they are in deficit.
    pub fn remove_from(&self, counts: &LetterCounts) -> Option<LetterMap<i32>> {
        let mut after = *counts.map();
        let mut fits = true;
        for (letter, &used) in self.counts.entries() {
            if used > 0 {
                after[letter] -= used;
                fits &= after[letter] >= 0;
            }
        }
        fits.then_some(after)
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate words, most common first.
#[derive(Debug, Clone)]
pub struct WordList(Vec<Word>);

impl WordList {
    pub fn bundled() -> Result<Self> {
        Self::parse(include_str!("../words")).wrap_err("bundled word list is broken")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot read word list {}", path.display()))?;
        Self::parse(&text).wrap_err_with(|| format!("invalid word list {}", path.display()))
    }

    /// Whitespace separated words in rank order. Entries without a single
    /// ASCII letter are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut skipped = 0;
        let words = text
            .split_whitespace()
            .filter_map(|raw| {
                let word = Word::parse(raw);
                if word.is_none() {
                    skipped += 1;
                }
                word
            })
            .take(MAX_WORDS)
            .collect_vec();
        if skipped > 0 {
            tracing::warn!(skipped, "ignored word list entries without letters");
        }
        ensure!(!words.is_empty(), "word list has no usable entries");
        Ok(Self(words))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn words(&self) -> &[Word] {
        &self.0
    }

    /// The `limit` best words to spell next out of the surplus letters of
    /// `counts`, best first.
    ///
    /// Each fitting word is weighted by the goodness of what it leaves
    /// behind, divided by `1000 + rank` so that common words win. Equal
    /// weights keep list order.
    pub fn suggest(&self, counts: &LetterCounts, limit: usize) -> Vec<Suggestion<'_>> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(rank, word)| {
                let after = word.remove_from(counts)?;
                let weight = letter_goodness(&after) / (RANK_OFFSET + rank as f64);
                Some(Suggestion { word, rank, weight })
            })
            .k_largest_by(limit, |a, b| {
                a.weight
                    .total_cmp(&b.weight)
                    .then_with(|| b.rank.cmp(&a.rank))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suggestion<'a> {
    pub word: &'a Word,
    pub rank: usize,
    pub weight: f64,
}

impl Display for Suggestion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.word.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{letters::Letter, scoring::EXHAUSTED};

    fn list(words: &str) -> WordList {
        WordList::parse(words).unwrap()
    }

    #[test]
    fn test_bundled_list() -> Result<()> {
        let list = WordList::bundled()?;

        assert_eq!(list.len(), 9203);
        assert!(list
            .words()
            .iter()
            .all(|w| w.as_str().chars().all(|ch| ch.is_ascii_lowercase())));
        assert_eq!(list.words()[0].as_str(), "the");
        Ok(())
    }

    #[test]
    fn test_parse() {
        let list = list("The  quick\nBROWN 42 fox's -- jumps");

        assert_eq!(
            list.words().iter().map(Word::as_str).collect_vec(),
            ["the", "quick", "brown", "fox's", "jumps"]
        );
    }

    #[test]
    fn test_parse_caps_length() {
        let text = iter_words().take(MAX_WORDS + 5).join(" ");

        assert_eq!(list(&text).len(), MAX_WORDS);
    }

    fn iter_words() -> impl Iterator<Item = String> {
        (0..).map(|n: usize| format!("w{n}"))
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(WordList::parse("").is_err());
        assert!(WordList::parse("1 2 ---").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(WordList::load(Path::new("/nonexistent/angrm/words")).is_err());
    }

    #[test]
    fn test_remove_from() {
        let counts = LetterCounts::between("letters", "");
        let word = Word::parse("set").unwrap();

        let after = LetterCounts::from(word.remove_from(&counts).unwrap());
        assert_eq!(after, LetterCounts::between("letr", ""));

        assert_eq!(Word::parse("sets").unwrap().remove_from(&counts), None);
        assert_eq!(Word::parse("sea").unwrap().remove_from(&counts), None);
    }

    #[test]
    fn test_remove_from_checks_every_letter() {
        // the violation is the repeated letter at the very end
        let counts = LetterCounts::between("abcdefg", "");
        assert_eq!(Word::parse("gfedcbaa").unwrap().remove_from(&counts), None);
        assert_eq!(Word::parse("GFEDCBAA").unwrap().remove_from(&counts), None);
    }

    #[test]
    fn test_remove_from_keeps_unrelated_deficit() {
        let counts = LetterCounts::between("cat", "x");
        let after = Word::parse("at").unwrap().remove_from(&counts).unwrap();

        assert_eq!(LetterCounts::from(after).remaining(), "cX");
    }

    #[test]
    fn test_suggest_only_fitting_words() {
        let list = list("the cat act tact at a taco coat toast");
        let counts = LetterCounts::between("attack", "");

        let suggestions = list.suggest(&counts, 20);
        let words = suggestions.iter().map(|s| s.word.as_str()).collect_vec();

        assert_eq!(words.len(), 5);
        for word in ["cat", "act", "tact", "at", "a"] {
            assert!(words.contains(&word), "{word} missing from {words:?}");
        }
        for suggestion in &suggestions {
            let after = suggestion.word.remove_from(&counts).unwrap();
            assert!(after.iter().all(|&c| c >= 0));
            for letter in Letter::all() {
                assert!(after[letter] <= counts.get(letter));
            }
        }
    }

    #[test]
    fn test_suggest_exact_match_wins() {
        let list = list("the and tea eat ate");
        let counts = LetterCounts::between("eat", "");

        let suggestions = list.suggest(&counts, 20);

        assert_eq!(
            suggestions.iter().map(ToString::to_string).collect_vec(),
            ["tea", "eat", "ate"]
        );
        assert_eq!(suggestions[0].weight, EXHAUSTED / 1002.0);
    }

    #[test]
    fn test_suggest_exhausting_word_wins_despite_extra_letters() {
        let list = list("cat a at");
        let counts = LetterCounts::between("cat", "z");

        let suggestions = list.suggest(&counts, 20);

        assert_eq!(
            suggestions.iter().map(ToString::to_string).collect_vec(),
            ["cat", "a", "at"]
        );
        assert_eq!(suggestions[0].weight, EXHAUSTED / 1000.0);
        assert!(suggestions.iter().all(|s| s.weight > 0.0));
    }

    #[test]
    fn test_suggest_is_sorted_and_limited() {
        let list = WordList::bundled().unwrap();
        let counts = LetterCounts::between("the quick brown fox jumps over the lazy dog", "");

        let suggestions = list.suggest(&counts, 20);

        assert_eq!(suggestions.len(), 20);
        assert!(suggestions
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.weight > b.weight || (a.weight == b.weight && a.rank < b.rank)));
        assert_eq!(suggestions, list.suggest(&counts, 20));
        assert_eq!(list.suggest(&counts, 3), suggestions[..3]);
    }

    #[test]
    fn test_suggest_nothing_without_surplus() {
        let list = WordList::bundled().unwrap();

        assert!(list.suggest(&LetterCounts::default(), 20).is_empty());
        assert!(list
            .suggest(&LetterCounts::between("", "extra"), 20)
            .is_empty());
    }
}
