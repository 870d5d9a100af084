//! Logger setup.
//!
//! All human-facing output goes through the `log` macros so that `--quiet`
//! and `--logfile` apply uniformly. Info lines are printed bare; warnings and
//! errors get a colored prefix.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Writes every record to stdout and, when configured, to a log file with
/// ANSI escapes removed.
struct TeeWriter {
    file: Option<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        std::io::stdout().write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Install the global logger.
///
/// `--quiet` limits output to warnings and errors, `--verbose` enables
/// debug messages with timestamps. `RUST_LOG` is applied on top.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> std::io::Result<()> {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let file = logfile.map(File::create).transpose()?;

    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module("gamerhub", level)
        .parse_default_env()
        .target(Target::Pipe(Box::new(TeeWriter { file })))
        .format(move |buf, record| {
            if verbose {
                write!(buf, "{} ", chrono::Local::now().format("%H:%M:%S%.3f"))?;
            }
            match record.level() {
                Level::Error => write!(
                    buf,
                    "{} ",
                    "error:".if_supports_color(Stdout, |t| t.red().bold().to_string())
                )?,
                Level::Warn => write!(
                    buf,
                    "{} ",
                    "warning:".if_supports_color(Stdout, |t| t.yellow().bold().to_string())
                )?,
                _ => {}
            }
            writeln!(buf, "{}", record.args())
        });

    builder
        .try_init()
        .map_err(|e| std::io::Error::other(e.to_string()))
}

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}
