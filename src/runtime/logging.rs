use std::fs::{self, File};

use crate::config::{LogSettings, default_log_path};

/// Route `log` output to a file; the terminal belongs to the UI.
///
/// `RUST_LOG` overrides `log.level`. Failures are reported on stderr before
/// the UI starts and leave logging disabled.
pub fn init(settings: &LogSettings) {
    let Some(path) = settings.file.clone().or_else(default_log_path) else {
        return;
    };

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!(
                "reprise: cannot create log directory {}: {e}",
                parent.display()
            );
            return;
        }
    }

    let file = match File::create(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("reprise: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let result = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.level.as_str()),
    )
    .filter_module("symphonia", log::LevelFilter::Warn)
    .format_timestamp_millis()
    .target(env_logger::Target::Pipe(Box::new(file)))
    .try_init();

    match result {
        Ok(()) => log::info!("logging to {}", path.display()),
        Err(e) => eprintln!("reprise: logger already initialised: {e}"),
    }
}
