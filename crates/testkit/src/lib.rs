#![warn(missing_docs)]
//! Deterministic testing surfaces (event stream + scripted hand input).

mod scripted;

use anyhow::Result;
use handcast_core::FrameTick;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub use scripted::{HandStep, ScriptedHand};

/// Primary event record captured by headless sessions.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Simulation tick when the event occurred.
    pub tick: FrameTick,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Free-form payload for smoke tests.
    pub payload: &'a str,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

/// Metadata describing one headless run, for CI artifacts.
#[derive(Debug, Serialize)]
pub struct RunMetadata {
    /// Wall-clock start time (RFC 3339).
    pub started_at: String,
    /// Session RNG seed.
    pub seed: u64,
    /// Ticks simulated.
    pub ticks: u64,
}

impl RunMetadata {
    /// Capture metadata for a run starting now.
    pub fn new(seed: u64, ticks: u64) -> Self {
        Self {
            started_at: chrono::Utc::now().to_rfc3339(),
            seed,
            ticks,
        }
    }

    /// Persist as pretty JSON next to the event log.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        let json = serde_json::to_string_pretty(self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(prefix: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "{prefix}-{}.json",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    #[test]
    fn jsonl_sink_writes_one_line_per_event() {
        let path = temp_path("handcast-events");
        let mut sink = JsonlSink::create(&path).expect("sink create");

        sink.write(&EventRecord {
            tick: FrameTick(3),
            kind: "Click",
            payload: "cell=4",
        })
        .expect("write succeeds");
        sink.write(&EventRecord {
            tick: FrameTick(7),
            kind: "Touch",
            payload: "pet",
        })
        .expect("write succeeds");

        let contents = fs::read_to_string(&path).expect("file readable");
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("cell=4"));
        assert!(contents.contains("Touch"));
    }

    #[test]
    fn run_metadata_round_trips_to_disk() {
        let path = temp_path("handcast-run");
        let metadata = RunMetadata::new(42, 600);
        metadata.write_to(&path).expect("write succeeds");

        let contents = fs::read_to_string(&path).expect("file readable");
        assert!(contents.contains("\"seed\": 42"));
        assert!(contents.contains("started_at"));
    }
}
