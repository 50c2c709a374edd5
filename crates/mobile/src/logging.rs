//! Tracing setup for the host process.
//!
//! Android builds write to logcat; everything else writes to stderr. Only
//! events from this workspace's crates are kept.

use std::{panic::PanicHookInfo, sync::Once};

use tracing::Metadata;
use tracing_subscriber::{
    filter::FilterFn, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install the subscriber and a panic hook that logs through it, ahead of
/// whatever hook was already set. Safe to call more than once.
pub fn setup_logging() {
    static LOGGING_SETUP: Once = Once::new();

    LOGGING_SETUP.call_once(|| {
        if let Err(error) = install() {
            eprintln!("failed to set up logging: {error:?}");
            return;
        }
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            log_panic(info);
            previous(info);
        }));
    })
}

fn is_ours(metadata: &Metadata<'_>) -> bool {
    metadata
        .module_path()
        .unwrap_or_default()
        .starts_with("map_app")
}

#[cfg(target_os = "android")]
fn install() -> eyre::Result<()> {
    use eyre::WrapErr;
    use tracing_logcat::{LogcatMakeWriter, LogcatTag};
    use tracing_subscriber::fmt::format::Format;

    let tag = LogcatTag::Fixed("MapApp-Rust".to_owned());
    let writer = LogcatMakeWriter::new(tag).wrap_err("failed to initialize logcat writer")?;
    let layer = fmt::layer()
        .event_format(Format::default().with_level(false).without_time())
        .with_writer(writer)
        .with_ansi(false);
    tracing_subscriber::registry()
        .with(layer)
        .with(FilterFn::new(is_ours))
        .try_init()?;

    Ok(())
}

#[cfg(not(target_os = "android"))]
fn install() -> eyre::Result<()> {
    let layer = fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(layer)
        .with(FilterFn::new(is_ours))
        .try_init()?;

    Ok(())
}

fn log_panic(info: &PanicHookInfo) {
    tracing::error!("{info}")
}
