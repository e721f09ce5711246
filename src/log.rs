use log::LevelFilter;

/// Initialize logging for crossfill.
///
/// Defaults to `Info`, or `Debug` when `debug_enabled` is set; an explicit
/// `RUST_LOG` value overrides both.
pub fn init_logger(debug_enabled: bool) {
    use std::env;

    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    // Let RUST_LOG override our defaults if explicitly set
    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    builder.init();
    log::debug!("logger initialized at {level:?} level");
}
