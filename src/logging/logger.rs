use std::env;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use env_logger::{Builder, Env, Target};
use log::{Level, LevelFilter};

use crate::error::{ErrorKind, Result, ResultExt};

const FILE_NAME_FORMAT: &str = "%m_%d_%Y_%H_%M_%S";
const ENTRY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub logs_dir: PathBuf,
    pub min_level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            logs_dir: cwd.join("logs"),
            min_level: LevelFilter::Info,
        }
    }
}

/// Returned by [`init`]; the logger itself is global once installed.
#[derive(Debug, Clone)]
pub struct LoggerHandle {
    log_file: PathBuf,
}

impl LoggerHandle {
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

pub fn log_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("{}.log", now.format(FILE_NAME_FORMAT))
}

/// One file per run, directly under the logs directory.
pub fn log_file_path<Tz: TimeZone>(logs_dir: &Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: fmt::Display,
{
    logs_dir.join(log_file_name(now))
}

fn write_entry<W: Write + ?Sized>(
    buf: &mut W,
    timestamp: &str,
    line: u32,
    target: &str,
    level: Level,
    message: &fmt::Arguments<'_>,
) -> std::io::Result<()> {
    writeln!(buf, "[ {} ] {} {} - {} - {}", timestamp, line, target, level, message)
}

/// Create the log file and install it as the global `log` backend.
///
/// `RUST_LOG` still overrides `min_level` when set.
pub fn init(config: &LogConfig) -> Result<LoggerHandle> {
    let now = Local::now();
    fs::create_dir_all(&config.logs_dir).wrap_err(ErrorKind::Logging)?;

    let log_file = log_file_path(&config.logs_dir, &now);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .wrap_err(ErrorKind::Logging)?;

    Builder::from_env(Env::default().default_filter_or(config.min_level.to_string()))
        .format(|buf, record| {
            let timestamp = Local::now().format(ENTRY_TIME_FORMAT).to_string();
            write_entry(
                buf,
                &timestamp,
                record.line().unwrap_or(0),
                record.target(),
                record.level(),
                record.args(),
            )
        })
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .wrap_err(ErrorKind::Logging)?;

    Ok(LoggerHandle { log_file })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use log::info;

    fn fixed_time() -> DateTime<Local> {
        let naive = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 2)
            .unwrap();
        Local.from_local_datetime(&naive).unwrap()
    }

    #[test]
    fn test_log_file_name_format() {
        assert_eq!(log_file_name(&fixed_time()), "03_07_2024_09_05_02.log");
    }

    #[test]
    fn test_log_file_path_is_flat() {
        let path = log_file_path(Path::new("/tmp/run/logs"), &fixed_time());
        assert_eq!(path, PathBuf::from("/tmp/run/logs/03_07_2024_09_05_02.log"));
    }

    #[test]
    fn test_entry_layout() {
        let mut buf = Vec::new();
        write_entry(
            &mut buf,
            "2024-03-07 09:05:02,123",
            42,
            "csv_mongo_loader::extract",
            Level::Info,
            &format_args!("{} records converted", 2),
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "[ 2024-03-07 09:05:02,123 ] 42 csv_mongo_loader::extract - INFO - 2 records converted\n"
        );
    }

    // The only test in this binary that installs the global logger.
    #[test]
    fn test_init_creates_file_and_rejects_second_install() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            logs_dir: dir.path().join("nested").join("logs"),
            min_level: LevelFilter::Info,
        };

        let handle = init(&config).unwrap();
        assert!(handle.log_file().starts_with(&config.logs_dir));
        assert!(handle.log_file().is_file());

        info!("logger ready");
        log::logger().flush();

        let err = init(&config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Logging);
    }
}
