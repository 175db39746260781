//! Minimal stderr backend for the `log` facade with coloured level tags.

use std::io::Write;

use ansi_term::Colour::{Blue, Cyan, Green, Purple, Red, Yellow};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

struct Logger;

static LOGGER: Logger = Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let tag = match record.level() {
            Level::Error => Red.bold().paint("ERROR"),
            Level::Warn => Yellow.bold().paint("WARN"),
            Level::Info => Green.bold().paint("INFO"),
            Level::Debug => Blue.bold().paint("DEBUG"),
            Level::Trace => Purple.paint("TRACE"),
        };

        // Trace lines carry the CPU state; keep them unprefixed by module.
        let mut err = std::io::stderr().lock();
        let _ = if record.level() == Level::Trace {
            writeln!(err, "{} {}", tag, record.args())
        } else {
            writeln!(
                err,
                "{} {} {}",
                tag,
                Cyan.paint(record.target()),
                record.args()
            )
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the logger with `level` as the maximum level. Fails if a logger is
/// already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
