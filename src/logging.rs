use crate::config::LogSettings;
use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};
use std::fs::OpenOptions;
use std::str::FromStr;

/// Install the global logger.
///
/// `level_override` (from the command line) wins over the configured level.
/// Records go to the configured file when there is one, to stderr otherwise.
/// At level `off` no logger is installed.
pub fn init(settings: &LogSettings, level_override: Option<&str>) -> Result<()> {
    let name = level_override.unwrap_or(&settings.level);
    let level = LevelFilter::from_str(name).with_context(|| format!("invalid log level {name:?}"))?;
    if level == LevelFilter::Off {
        return Ok(());
    }

    let config = ConfigBuilder::new()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();

    match &settings.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            WriteLogger::init(level, config, file)?;
        }
        None => TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)?,
    }
    log::info!("logging at level {level}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_installs_nothing() {
        assert!(init(&LogSettings::default(), None).is_ok());
    }

    #[test]
    fn bad_level_is_an_error() {
        let err = init(&LogSettings::default(), Some("loud")).unwrap_err();
        assert!(err.to_string().contains("loud"));
    }
}
