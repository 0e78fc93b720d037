use crate::error::CliError;
use env_logger::{Builder, Env, Target};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

pub fn print_verbose(verbose: bool, msg: &str) {
    if verbose {
        println!("Verbose: {}", msg);
    }
}

/// Default filter for the given verbosity; `RUST_LOG` still wins.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "info,fonz=debug" } else { "info" }
}

/// Initialize the global logger.
///
/// Lines go to stderr as `timestamp - LEVEL - message`. With `log_file`,
/// every line is also appended to that file.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<(), CliError> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter(verbose)));

    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {}",
            chrono::Local::now().format(TIMESTAMP_FORMAT),
            record.level(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        let file = open_log_file(path)?;
        builder.target(Target::Pipe(Box::new(TeeWriter { file })));
    }

    builder
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

fn open_log_file(path: &Path) -> Result<File, CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::Logging(format!("{}: {}", parent.display(), e)))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::Logging(format!("{}: {}", path.display(), e)))
}

/// Writes every log line to stderr and the log file.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}
