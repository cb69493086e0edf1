//! Command-line arguments and the runtime settings they resolve to.

use std::{path::PathBuf, time::Duration};

use crate::api::DEFAULT_TIMEOUT;
use crate::controller::{RefreshOptions, DEFAULT_SETTLE_DELAY};
use crate::profiles::ProfileEntry;
use crate::render::{ProcSortBy, PROCESS_LIMIT};

pub const USAGE: &str = "[--tls-ca CERT_PEM|-t CERT_PEM] [--profile NAME|-P NAME] [--interval SECS|-i SECS] [--timeout SECS] [--log-file PATH] [--save] [--dry-run] [http://HOST:PORT]";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub url: Option<String>,
    pub tls_ca: Option<String>,
    pub profile: Option<String>,
    pub interval_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub save: bool,
    pub dry_run: bool,
}

fn parse_secs(flag: &str, v: Option<String>) -> Result<u64, String> {
    let v = v.ok_or_else(|| format!("{flag} needs a value in seconds"))?;
    match v.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{flag} expects a positive number of seconds, got '{v}'")),
    }
}

/// Parse `args` (program name first). `Err` carries the text to print before exiting.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "dashtop".into());
    let mut out = ParsedArgs::default();

    while let Some(arg) = it.next() {
        // --flag=value is accepted for every flag that takes a value
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = || inline.clone().or_else(|| it.next());
        match flag.as_str() {
            "-h" | "--help" => return Err(format!("Usage: {prog} {USAGE}")),
            "--tls-ca" | "-t" => out.tls_ca = value().filter(|v| !v.is_empty()),
            "--profile" | "-P" => out.profile = value().filter(|v| !v.is_empty()),
            "--interval" | "-i" => out.interval_secs = Some(parse_secs("--interval", value())?),
            "--timeout" => out.timeout_secs = Some(parse_secs("--timeout", value())?),
            "--log-file" => out.log_file = value().filter(|v| !v.is_empty()).map(PathBuf::from),
            "--save" => out.save = true,
            "--dry-run" => out.dry_run = true,
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option '{arg}'. Usage: {prog} {USAGE}"));
            }
            _ => {
                if out.url.is_none() {
                    out.url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. Usage: {prog} {USAGE}"));
                }
            }
        }
    }
    Ok(out)
}

/// Everything the app needs to start.
#[derive(Debug, Clone)]
pub struct Settings {
    pub url: String,
    pub tls_ca: Option<String>,
    pub refresh_interval: Option<Duration>,
    pub timeout: Duration,
    pub settle_delay: Duration,
    pub process_sort: ProcSortBy,
    pub process_limit: usize,
}

impl Settings {
    pub fn from_profile(entry: &ProfileEntry, args: &ParsedArgs) -> Self {
        Self {
            url: entry.url.clone(),
            tls_ca: entry.tls_ca.clone(),
            refresh_interval: entry.interval_secs.map(Duration::from_secs),
            timeout: args
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            settle_delay: DEFAULT_SETTLE_DELAY,
            process_sort: ProcSortBy::default(),
            process_limit: PROCESS_LIMIT,
        }
    }

    pub fn refresh_options(&self) -> RefreshOptions {
        RefreshOptions {
            settle_delay: self.settle_delay,
            process_sort: self.process_sort,
            process_limit: self.process_limit,
        }
    }
}
