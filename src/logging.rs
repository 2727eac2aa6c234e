use color_eyre::eyre::{eyre, Result, WrapErr};
use std::{fs::File, path::Path, sync::Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
    Off,
}

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`.
pub fn init(target: LogTarget<'_>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match target {
        LogTarget::File(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("cannot create log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::Off => return Ok(()),
    };
    installed.map_err(|e| eyre!(e))
}
