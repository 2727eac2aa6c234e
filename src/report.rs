use crate::{letters::LetterCounts, words::WordList};
use color_eyre::eyre::Result;
use itertools::Itertools;
use std::io::Write;

/// Writes the remaining letters of `source` against `anagram`, followed by
/// the suggested words on a single line.
pub fn print(
    out: &mut impl Write,
    source: &str,
    anagram: &str,
    words: &WordList,
    limit: usize,
) -> Result<()> {
    let counts = LetterCounts::between(source, anagram);
    if counts.is_anagram() {
        writeln!(out, "Anagrammed!")?;
        return Ok(());
    }
    let suggestions = words.suggest(&counts, limit);
    tracing::debug!(total = counts.total(), found = suggestions.len(), "report");
    writeln!(out, "{}", counts.remaining())?;
    writeln!(out, "{}", suggestions.iter().join(" "))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(source: &str, anagram: &str, words: &str) -> Result<String> {
        let mut out = Vec::new();
        print(&mut out, source, anagram, &WordList::parse(words)?, 20)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_anagrammed() -> Result<()> {
        assert_eq!(report("listen", "Silent", "the")?, "Anagrammed!\n");
        Ok(())
    }

    #[test]
    fn test_remaining_and_suggestions() -> Result<()> {
        assert_eq!(
            report("dormitory", "dirty", "the room moor or dorm")?,
            "moor\nroom moor or\n"
        );
        Ok(())
    }

    #[test]
    fn test_only_extra_letters() -> Result<()> {
        assert_eq!(report("ab", "abz", "a b z")?, "Z\n\n");
        Ok(())
    }
}
