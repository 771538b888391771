use std::{env, fmt, iter::Peekable, path::Path};

use log::LevelFilter;

use crate::{Error, Result};

/// Runtime options for the `delivery-route` binary and batch sequencing.
#[derive(Clone, Debug)]
pub struct RouteOptions {
    /// Input and output format: `text` (`lat,lng[,label]` tokens) or `json` (delivery records).
    pub format: IoFormat,
    /// Run the 2-opt post-pass over each greedy route.
    pub two_opt: bool,
    /// Upper bound on 2-opt passes.
    pub two_opt_passes: usize,
    /// Reject the whole input when any stop has an unusable coordinate.
    pub strict: bool,
    /// Largest route accepted. `0` disables the check.
    pub max_stops: usize,
    /// Structured logging level.
    pub log_level: LogLevel,
    /// Logging output format.
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs and metrics. Empty means stderr.
    pub log_output: String,
    /// Optional input file path for stops. Empty means stdin.
    pub input: String,
    /// Optional output file path for the ordered route. Empty means stdout.
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            _ => Err(invalid_value("log-level", raw, "error|warn|info|debug|trace|off")),
        }
    }

    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(invalid_value("log-format", raw, "compact|pretty")),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IoFormat {
    Text,
    Json,
}

impl IoFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(invalid_value("format", raw, "text|json")),
        }
    }
}

impl fmt::Display for IoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::Off => "off",
        })
    }
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            format: IoFormat::Text,
            two_opt: false,
            two_opt_passes: 50,
            strict: true,
            max_stops: 1_000,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl fmt::Display for RouteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "format={} two_opt={} two_opt_passes={} strict={} max_stops={} log_level={}",
            self.format,
            self.two_opt,
            self.two_opt_passes,
            self.strict,
            self.max_stops,
            self.log_level
        )
    }
}

impl RouteOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = split_arg(raw_name, &mut args);
            options.apply_option(&name, value)?;
        }

        Ok(options)
    }

    fn apply_option(&mut self, name: &str, value: Option<String>) -> Result<()> {
        match name {
            "two-opt" => self.two_opt = parse_flag(name, value)?,
            "no-two-opt" => self.two_opt = !parse_negated_flag(name, value)?,
            "strict" => self.strict = parse_flag(name, value)?,
            "no-strict" => self.strict = !parse_negated_flag(name, value)?,
            "log-timestamp" => self.log_timestamp = parse_flag(name, value)?,
            "no-log-timestamp" => self.log_timestamp = !parse_negated_flag(name, value)?,
            _ => {
                let Some(raw) = value else {
                    return Err(if Self::takes_value(name) {
                        Error::invalid_input(format!("Missing value for --{name}"))
                    } else {
                        unknown_option(name)
                    });
                };
                match name {
                    "format" => self.format = IoFormat::parse(&raw)?,
                    "two-opt-passes" => self.two_opt_passes = parse_number(name, &raw)?,
                    "max-stops" => self.max_stops = parse_number(name, &raw)?,
                    "log-level" => self.log_level = LogLevel::parse(&raw)?,
                    "log-format" => self.log_format = LogFormat::parse(&raw)?,
                    "log-output" => self.log_output = raw,
                    "input" => self.input = raw,
                    "output" => self.output = raw,
                    _ => return Err(unknown_option(name)),
                }
            }
        }
        Ok(())
    }

    fn takes_value(name: &str) -> bool {
        matches!(
            name,
            "format"
                | "two-opt-passes"
                | "max-stops"
                | "log-level"
                | "log-format"
                | "log-output"
                | "input"
                | "output"
        )
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  delivery-route [options] [--input stops.txt]\n",
            "  delivery-route [options] < stops.txt\n\n",
            "Options:\n",
            "  --format <text|json>\n",
            "  --two-opt[=<bool>]\n",
            "  --no-two-opt\n",
            "  --two-opt-passes <usize>\n",
            "  --strict[=<bool>]\n",
            "  --no-strict\n",
            "  --max-stops <usize>\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --input <path>\n",
            "  --output <path>\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  delivery-route < stops.txt\n",
            "  delivery-route --format json --input deliveries.json --output routes.json\n",
            "  delivery-route --two-opt --log-level=info < stops.txt\n",
        )
    }

    /// 2-opt pass budget when refinement is on.
    pub fn refine_passes(&self) -> Option<usize> {
        self.two_opt.then_some(self.two_opt_passes)
    }

    pub fn check_route_size(&self, n: usize) -> Result<()> {
        if self.max_stops > 0 && n > self.max_stops {
            return Err(Error::invalid_input(format!(
                "Route has {n} stops, more than --max-stops {}",
                self.max_stops
            )));
        }
        Ok(())
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        non_stdio_path(&self.input)
    }
}

fn non_stdio_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

fn split_arg(
    raw_name: &str,
    args: &mut Peekable<impl Iterator<Item = String>>,
) -> (String, Option<String>) {
    if let Some((k, v)) = raw_name.split_once('=') {
        return (k.to_string(), Some(v.to_string()));
    }

    let value = match args.peek() {
        Some(next) if !next.starts_with("--") && !is_flag(raw_name) => args.next(),
        _ => None,
    };

    (raw_name.to_string(), value)
}

// Boolean switches only take a value through `--name=value`.
fn is_flag(name: &str) -> bool {
    matches!(
        name,
        "two-opt"
            | "no-two-opt"
            | "strict"
            | "no-strict"
            | "log-timestamp"
            | "no-log-timestamp"
    )
}

fn parse_flag(name: &str, value: Option<String>) -> Result<bool> {
    match value {
        Some(v) => parse_bool(name, &v),
        None => Ok(true),
    }
}

fn parse_negated_flag(name: &str, value: Option<String>) -> Result<bool> {
    if value.is_some() {
        return Err(Error::invalid_input(format!(
            "Flag --{name} does not take a value"
        )));
    }
    Ok(true)
}

fn parse_number(name: &str, raw: &str) -> Result<usize> {
    raw.parse()
        .map_err(|_| Error::invalid_input(format!("Invalid value for --{name}: {raw}")))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}

fn invalid_value(option: &str, raw: &str, expected: &str) -> Error {
    Error::invalid_input(format!(
        "Invalid value for --{option}: {raw} (expected {expected})"
    ))
}

fn unknown_option(name: &str) -> Error {
    Error::invalid_input(format!(
        "Unknown option: --{name}\n\n{}",
        RouteOptions::usage()
    ))
}
