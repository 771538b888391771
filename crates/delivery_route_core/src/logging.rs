use std::{fs::File, io::Write};

use env_logger::{Builder, Target, WriteStyle, fmt::Formatter};
use log::{Level, Record};

use crate::io::options::{LogFormat, RouteOptions};
use crate::{Error, Result};

const CRATE_TARGET_PREFIX: &str = "delivery_route_core::";

/// Installs the global logger described by `options`. Fails if one is already set.
pub fn init_logger(options: &RouteOptions) -> Result<()> {
    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .target(log_target(options)?)
        .format(move |buf: &mut Formatter, record: &Record| {
            if log_timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(
                buf,
                "{} {}",
                line_prefix(log_format, record.level(), record.target()),
                record.args()
            )
        });

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn log_target(options: &RouteOptions) -> Result<Target> {
    let Some(log_path) = options.log_output_path() else {
        return Ok(Target::Stderr);
    };
    let log_file = File::create(log_path).map_err(|e| {
        Error::other(format!(
            "failed to create log output file {}: {e}",
            log_path.display()
        ))
    })?;
    Ok(Target::Pipe(Box::new(log_file)))
}

fn line_prefix(format: LogFormat, level: Level, target: &str) -> String {
    match format {
        LogFormat::Compact => level_tag(level).to_string(),
        LogFormat::Pretty => {
            let target = target.strip_prefix(CRATE_TARGET_PREFIX).unwrap_or(target);
            format!("{} [{target}]", level_tag(level))
        }
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::{line_prefix, log_target};
    use crate::io::options::{LogFormat, RouteOptions};

    #[test]
    fn compact_prefix_is_just_the_level() {
        let prefix = line_prefix(LogFormat::Compact, Level::Warn, "delivery_route_core::algo::batch");
        assert_eq!(prefix, "WARN");
    }

    #[test]
    fn pretty_prefix_shortens_crate_targets() {
        let prefix = line_prefix(LogFormat::Pretty, Level::Info, "delivery_route_core::algo::batch");
        assert_eq!(prefix, "INFO [algo::batch]");

        let prefix = line_prefix(LogFormat::Pretty, Level::Debug, "delivery_route");
        assert_eq!(prefix, "DEBUG [delivery_route]");
    }

    #[test]
    fn unwritable_log_output_is_reported() {
        let options = RouteOptions {
            log_output: "/nonexistent-dir/for/sure/run.log".to_string(),
            ..RouteOptions::default()
        };
        match log_target(&options) {
            Ok(_) => panic!("missing directory should fail"),
            Err(err) => assert!(err.to_string().contains("failed to create log output file")),
        }
    }
}
