use clap::Parser;
use color_eyre::eyre::Result;
use config::Args;
use interactive::App;

mod chart;
mod config;
mod debounce;
mod errors;
mod interactive;
mod letters;
mod logging;
mod report;
mod scoring;
mod tui;
mod words;

fn main() -> Result<()> {
    errors::install_hooks()?;
    let args = Args::parse();
    logging::init(args.log_target())?;
    tracing::info!(?args, "starting");

    let words = args.word_list()?;
    tracing::info!(words = words.len(), "loaded word list");
    if args.print {
        return report::print(
            &mut std::io::stdout().lock(),
            &args.source,
            &args.anagram,
            &words,
            args.limit,
        );
    }

    App::new(words, args.limit, args.delay())
        .with_texts(&args.source, &args.anagram)
        .run()
}
