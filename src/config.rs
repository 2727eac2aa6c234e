use crate::{logging::LogTarget, words::WordList};
use clap::Parser;
use color_eyre::eyre::Result;
use std::{path::PathBuf, time::Duration};

/// Compare the letters of two texts and find words that turn one into an
/// anagram of the other.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Word list to suggest from, whitespace separated, most common first
    #[arg(long, env = "ANGRM_WORDS")]
    pub words: Option<PathBuf>,

    /// Quiet time after the last keystroke before suggesting words
    #[arg(long, env = "ANGRM_DELAY_MS", default_value_t = 500)]
    pub delay_ms: u64,

    /// Number of suggested words
    #[arg(long, env = "ANGRM_LIMIT", default_value_t = 20)]
    pub limit: usize,

    /// Initial source text
    #[arg(long, default_value = "")]
    pub source: String,

    /// Initial anagram text
    #[arg(long, default_value = "")]
    pub anagram: String,

    /// Print the remaining letters and suggestions, then exit
    #[arg(long)]
    pub print: bool,

    /// Write logs to this file
    #[arg(long, env = "ANGRM_LOG")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn word_list(&self) -> Result<WordList> {
        match &self.words {
            Some(path) => WordList::load(path),
            None => WordList::bundled(),
        }
    }

    /// The terminal belongs to the UI unless we are only printing.
    pub fn log_target(&self) -> LogTarget<'_> {
        match (&self.log_file, self.print) {
            (Some(path), _) => LogTarget::File(path),
            (None, true) => LogTarget::Stderr,
            (None, false) => LogTarget::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["angrm"]).unwrap();

        assert_eq!(args.delay(), Duration::from_millis(500));
        assert_eq!(args.limit, 20);
        assert_eq!(args.source, "");
        assert!(!args.print);
        assert!(matches!(args.log_target(), LogTarget::Off));
    }

    #[test]
    fn test_print_mode() {
        let args = Args::try_parse_from([
            "angrm",
            "--print",
            "--source",
            "dormitory",
            "--anagram",
            "dirty",
            "--limit",
            "5",
        ])
        .unwrap();

        assert!(args.print);
        assert_eq!(args.anagram, "dirty");
        assert_eq!(args.limit, 5);
        assert!(matches!(args.log_target(), LogTarget::Stderr));
    }

    #[test]
    fn test_log_file_wins() {
        let args = Args::try_parse_from(["angrm", "--log-file", "/tmp/angrm.log"]).unwrap();

        assert!(matches!(args.log_target(), LogTarget::File(_)));
    }

    #[test]
    fn test_rejects_bad_delay() {
        assert!(Args::try_parse_from(["angrm", "--delay-ms", "soon"]).is_err());
    }
}
