use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use chrono::Utc;
use flapjack_engine::{SessionConfig, Timestamp};

/// Writes `value` as pretty JSON to `path`, or to stdout when no path is given.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(value, BufWriter::new(file))
                .with_context(|| format!("Failed to write JSON to {}", path.display()))
        }
        None => write_json(value, io::stdout().lock()).context("Failed to write JSON to stdout"),
    }
}

fn write_json<T, W>(value: &T, mut writer: W) -> anyhow::Result<()>
where
    T: serde::Serialize,
    W: Write,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads a session configuration, or the defaults when no path is given.
pub fn read_config_file(path: Option<&Path>) -> anyhow::Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let config: SessionConfig = read_json_file("session config", path)?;
    config
        .validate()
        .with_context(|| format!("Invalid session config: {}", path.display()))?;
    Ok(config)
}

/// Current wall-clock time as an engine timestamp.
pub fn wall_clock() -> Timestamp {
    let millis = Utc::now().timestamp_millis();
    Timestamp::from_millis(u64::try_from(millis).unwrap_or_default())
}
