use std::sync::Once;

use time::format_description::well_known::Iso8601;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{format::Pretty, time::UtcTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer,
};
use tracing_web::{performance_layer, MakeWebConsoleWriter};

/// Logs to the browser console. The worker has no environment to read a
/// filter from so the level is fixed at build time
pub fn configure_tracing(level: LevelFilter) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false) // Only partially supported across browsers
        .with_timer(UtcTime::new(Iso8601::DEFAULT))
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(level);
    let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

    // Only fails if a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(perf_layer)
        .try_init();
}

/// Configures tracing inside a Once block so every event handler can call it
pub fn configure_tracing_once() {
    static ONCE: Once = Once::new();
    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    ONCE.call_once(|| configure_tracing(level));
}
