pub mod logging;
pub(crate) mod runtime;
pub mod state;

uniffi::setup_scaffolding!();

/// Print panics with a full backtrace to stderr. Hooks installed earlier,
/// such as the tracing hook from [`logging::setup_logging`], still run
/// afterwards.
#[uniffi::export]
pub fn init_panic_handler() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        eprintln!("map-app panicked: {info}\n{backtrace}");
        previous(info);
    }));
}
