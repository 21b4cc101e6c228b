use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("keyed_containers", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        // Tests and embedding binaries may have installed a logger already.
        let _ = builder.try_init();
    });
}

#[cfg(test)]
mod tests {
    use log::{log_enabled, Level};

    use super::*;

    /// Invariant: repeated initialisation is harmless, and by default this
    /// crate logs at info while other targets stay at warn.
    #[test]
    fn crate_logs_at_info_by_default() {
        initialize_logger();
        initialize_logger();
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(log::max_level() >= LevelFilter::Info);
        assert!(log_enabled!(target: "keyed_containers::interpreter", Level::Info));
        assert!(!log_enabled!(target: "keyed_containers", Level::Debug));
        assert!(!log_enabled!(target: "some_dependency", Level::Info));
        assert!(log_enabled!(target: "some_dependency", Level::Warn));
    }
}
