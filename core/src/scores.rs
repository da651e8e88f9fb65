//! Append-only log of winning times.
//!
//! Each win is stored as one line, `DD.MM.YYYY HH:mm - Time: mm:ss`. Lines are parsed independently so a damaged
//! line never hides the rest of the history.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};

use crate::ScoreError;

pub const DEFAULT_SCORE_FILE: &str = "best_times.txt";

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";
const TIME_MARKER: &str = "Time: ";
const RECORD_SEPARATOR: &str = " - ";

/// Formats a duration as `mm:ss`. Minutes keep counting past 99 instead of wrapping.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Parses `minutes:seconds`, surrounding whitespace allowed, seconds below 60.
pub fn parse_duration(text: &str) -> Option<Duration> {
    let (minutes, seconds) = text.trim().split_once(':')?;
    let minutes = parse_digits(minutes)?;
    let seconds = parse_digits(seconds)?;
    if seconds >= 60 {
        return None;
    }
    let total = minutes.checked_mul(60)?.checked_add(seconds)?;
    Some(Duration::from_secs(total))
}

fn parse_digits(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Extracts the duration that follows the last `Time: ` marker of a record line.
pub fn duration_from_line(line: &str) -> Option<Duration> {
    let (_, time) = line.rsplit_once(TIME_MARKER)?;
    parse_duration(time)
}

/// Minimum duration over all lines that parse; malformed lines are skipped.
pub fn best_time<'a>(lines: impl IntoIterator<Item = &'a str>) -> Option<Duration> {
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let duration = duration_from_line(line);
            if duration.is_none() {
                log::debug!("Skipping malformed score line: {:?}", line);
            }
            duration
        })
        .min()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScoreRecord {
    pub timestamp: NaiveDateTime,
    pub duration: Duration,
}

impl ScoreRecord {
    pub fn new(timestamp: NaiveDateTime, duration: Duration) -> Self {
        Self {
            timestamp,
            duration,
        }
    }

    pub fn to_line(&self) -> String {
        format!(
            "{}{}{}{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            RECORD_SEPARATOR,
            TIME_MARKER,
            format_duration(self.duration)
        )
    }

    pub fn parse_line(line: &str) -> Result<Self, ScoreError> {
        let malformed = || ScoreError::MalformedRecord(line.to_string());

        let (stamp, rest) = line.split_once(RECORD_SEPARATOR).ok_or_else(malformed)?;
        let time = rest.strip_prefix(TIME_MARKER).ok_or_else(malformed)?;
        let timestamp =
            NaiveDateTime::parse_from_str(stamp.trim(), TIMESTAMP_FORMAT).map_err(|_| malformed())?;
        let duration = parse_duration(time).ok_or_else(malformed)?;

        Ok(Self::new(timestamp, duration))
    }
}

/// Destination for completed-game times.
pub trait ScoreStore {
    /// Appends a record stamped with the current local time. `duration` must be `mm:ss`.
    fn append(&mut self, duration: &str) -> Result<(), ScoreError>;

    /// Fastest recorded time, or `None` when nothing usable is stored or the store cannot be read.
    fn load_best_time(&self) -> Option<Duration>;
}

fn record_line_now(duration: &str) -> Result<String, ScoreError> {
    let duration =
        parse_duration(duration).ok_or_else(|| ScoreError::MalformedRecord(duration.to_string()))?;
    Ok(ScoreRecord::new(Local::now().naive_local(), duration).to_line())
}

/// Score log kept in a text file, one record per line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_contents(&self) -> Result<Option<String>, ScoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Every well-formed record in file order.
    pub fn records(&self) -> Result<Vec<ScoreRecord>, ScoreError> {
        let Some(contents) = self.read_contents()? else {
            return Ok(Vec::new());
        };
        Ok(contents
            .lines()
            .filter_map(|line| ScoreRecord::parse_line(line).ok())
            .collect())
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_FILE)
    }
}

impl ScoreStore for FileScoreStore {
    fn append(&mut self, duration: &str) -> Result<(), ScoreError> {
        let line = record_line_now(duration)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        log::debug!("Appended score to {}: {}", self.path.display(), line);
        Ok(())
    }

    fn load_best_time(&self) -> Option<Duration> {
        match self.read_contents() {
            Ok(Some(contents)) => best_time(contents.lines()),
            Ok(None) => None,
            Err(err) => {
                log::warn!("Could not read scores from {}: {}", self.path.display(), err);
                None
            }
        }
    }
}

/// Score log that lives only as long as the process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    lines: Vec<String>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl ScoreStore for MemoryScoreStore {
    fn append(&mut self, duration: &str) -> Result<(), ScoreError> {
        let line = record_line_now(duration)?;
        self.lines.push(line);
        Ok(())
    }

    fn load_best_time(&self) -> Option<Duration> {
        best_time(self.lines.iter().map(String::as_str))
    }
}
