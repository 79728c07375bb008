//! Configuration for key derivation and batch publishing.

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use serde::Deserialize;

use crate::batch::{keys_and_descriptions, KeyBatch};
use crate::error::{ApiKeyError, Result};
use crate::time::{TimeInput, DEFAULT_DATE_FORMAT};
use crate::trace::TraceSink;

/// Options for deriving a single key.
pub struct KeyOptions<'a> {
    /// strftime-style pattern reducing a time to its bucket (numeric fields only).
    pub date_format: String,
    /// Convert timestamps and the default "now" using the local zone instead of UTC.
    pub use_local_time: bool,
    /// Time to derive the key for. `None` means now.
    pub time_input: Option<TimeInput>,
    /// Optional collector for diagnostic notes.
    pub trace: Option<&'a mut dyn TraceSink>,
}

impl Default for KeyOptions<'_> {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            use_local_time: false,
            time_input: None,
            trace: None,
        }
    }
}

impl fmt::Debug for KeyOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyOptions")
            .field("date_format", &self.date_format)
            .field("use_local_time", &self.use_local_time)
            .field("time_input", &self.time_input)
            .field("trace", &self.trace.is_some())
            .finish()
    }
}

impl<'a> KeyOptions<'a> {
    /// Options for the current time with the default date format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a given time with the default date format.
    pub fn at(time: impl Into<TimeInput>) -> Self {
        Self::default().with_time(time)
    }

    /// Set the time to derive the key for.
    pub fn with_time(mut self, time: impl Into<TimeInput>) -> Self {
        self.time_input = Some(time.into());
        self
    }

    /// Set the bucket pattern.
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    /// Use the local time zone for timestamps and the default time.
    pub fn with_local_time(mut self, use_local_time: bool) -> Self {
        self.use_local_time = use_local_time;
        self
    }

    /// Collect diagnostic notes into `sink`.
    pub fn with_trace(mut self, sink: &'a mut dyn TraceSink) -> Self {
        self.trace = Some(sink);
        self
    }
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

/// Publishing configuration: which seeds get keys and how wide the window is.
///
/// ```yaml
/// seeds:
///   - our dear customer
///   - our working horse
/// date_format: "%Y-%m-%d"
/// fuzz_seconds: 86400
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchConfig {
    pub seeds: Vec<String>,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub fuzz_seconds: Option<i64>,
    #[serde(default)]
    pub step_seconds: Option<i64>,
}

impl BatchConfig {
    /// Config for the given seeds, daily buckets and no fuzz.
    pub fn new<I, S>(seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seeds: seeds.into_iter().map(Into::into).collect(),
            date_format: default_date_format(),
            fuzz_seconds: None,
            step_seconds: None,
        }
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| ApiKeyError::InvalidArgument(format!("invalid batch config: {e}")))
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    pub fn with_fuzz_seconds(mut self, fuzz_seconds: i64) -> Self {
        self.fuzz_seconds = Some(fuzz_seconds);
        self
    }

    pub fn with_step_seconds(mut self, step_seconds: i64) -> Self {
        self.step_seconds = Some(step_seconds);
        self
    }

    pub fn fuzz(&self) -> Result<Option<TimeDelta>> {
        self.fuzz_seconds.map(seconds).transpose()
    }

    pub fn step(&self) -> Result<Option<TimeDelta>> {
        self.step_seconds.map(seconds).transpose()
    }

    /// Enumerate the keys valid from `base_time` to `base_time + fuzz`.
    pub fn keys_at(&self, base_time: NaiveDateTime) -> Result<KeyBatch> {
        keys_and_descriptions(
            self.seeds.iter().cloned(),
            base_time,
            &self.date_format,
            self.fuzz()?,
            self.step()?,
        )
    }
}

fn seconds(secs: i64) -> Result<TimeDelta> {
    TimeDelta::try_seconds(secs)
        .ok_or_else(|| ApiKeyError::InvalidArgument(format!("duration of {secs}s is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::TraceNote;

    #[test]
    fn test_default_options() {
        let options = KeyOptions::default();
        assert_eq!(options.date_format, "%Y-%m-%d");
        assert!(!options.use_local_time);
        assert!(options.time_input.is_none());
        assert!(options.trace.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let mut notes: Vec<TraceNote> = Vec::new();
        let options = KeyOptions::at("2022-06-24")
            .with_date_format("%Y%m%d")
            .with_local_time(true)
            .with_trace(&mut notes);
        assert_eq!(options.date_format, "%Y%m%d");
        assert!(options.use_local_time);
        assert_eq!(options.time_input, Some(TimeInput::Bucket("2022-06-24".to_string())));
        assert!(format!("{options:?}").contains("trace: true"));
    }

    #[test]
    fn test_batch_config_from_yaml() {
        let yaml = r#"
seeds:
  - our dear customer
  - our working horse
fuzz_seconds: 86400
"#;
        let config = BatchConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.seeds, vec!["our dear customer", "our working horse"]);
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.fuzz().unwrap(), Some(TimeDelta::days(1)));
        assert_eq!(config.step().unwrap(), None);
    }

    #[test]
    fn test_batch_config_from_json() {
        let json = r#"{
            "seeds": ["s"],
            "date_format": "%Y%m%d%H",
            "fuzz_seconds": 7200,
            "step_seconds": 3600
        }"#;
        let config: BatchConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config,
            BatchConfig::new(["s"])
                .with_fuzz_seconds(7200)
                .with_step_seconds(3600)
                .with_date_format("%Y%m%d%H")
        );
    }

    #[test]
    fn test_batch_config_rejects_missing_seeds() {
        let result = BatchConfig::from_yaml_str("date_format: \"%Y\"\n");
        assert!(matches!(result, Err(ApiKeyError::InvalidArgument(_))));
    }

    #[test]
    fn test_batch_config_rejects_huge_duration() {
        let config = BatchConfig::new(["s"]).with_fuzz_seconds(i64::MAX);
        assert!(matches!(config.fuzz(), Err(ApiKeyError::InvalidArgument(_))));
    }
}
