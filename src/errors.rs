use crate::tui;
use color_eyre::{config::HookBuilder, eyre, Result};
use std::{error::Error, panic};

/// Installs color-eyre's panic and error hooks, restoring the terminal
/// before anything is reported.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default()
        .display_env_section(false)
        .into_hooks();

    let panic_hook = panic_hook.into_panic_hook();
    panic::set_hook(Box::new(move |panic_info| {
        tui::restore();
        panic_hook(panic_info);
    }));

    let eyre_hook = eyre_hook.into_eyre_hook();
    eyre::set_hook(Box::new(move |error: &(dyn Error + 'static)| {
        tui::restore();
        eyre_hook(error)
    }))?;

    Ok(())
}
