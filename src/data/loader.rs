use std::path::PathBuf;

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::Reading;

/// Readings compiled into the binary, used whenever live data is unavailable.
const FALLBACK_JSON: &str = include_str!("../../assets/fallback.json");

// ---------------------------------------------------------------------------
// Source – where readings come from
// ---------------------------------------------------------------------------

/// Where to obtain the readings document.
#[derive(Debug, Clone)]
pub enum Source {
    /// No fetch at all; use the embedded fallback readings directly.
    Offline,
    /// `GET` a readings document over HTTP.
    Remote(String),
    /// Read a readings document from disk.
    File(PathBuf),
}

impl Source {
    /// Resolve the command-line arguments into a source.  An absent
    /// `--source` means the process cannot (or should not) fetch anything,
    /// so the embedded readings are used.
    pub fn from_args(source: Option<&str>, offline: bool) -> Source {
        match source {
            _ if offline => Source::Offline,
            None => Source::Offline,
            Some(s) if s.starts_with("http://") || s.starts_with("https://") => {
                Source::Remote(s.to_string())
            }
            Some(s) => Source::File(PathBuf::from(s)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Source::Offline => "offline".to_string(),
            Source::Remote(url) => url.clone(),
            Source::File(path) => path.display().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// LoadOutcome – readings plus where they actually came from
// ---------------------------------------------------------------------------

/// Which path actually produced the readings.  Downstream handling is
/// identical for all three; the origin only feeds the status line and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Fetched,
    FileLoaded,
    Fallback,
}

impl Origin {
    pub fn describe(&self) -> &'static str {
        match self {
            Origin::Fetched => "live data",
            Origin::FileLoaded => "file data",
            Origin::Fallback => "fallback data",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub readings: Vec<Reading>,
    pub origin: Origin,
}

/// Failure reasons, for diagnostics only.  [`load_readings`] never surfaces
/// these to its caller; every failure degrades to the fallback readings.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("reading file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load readings from the configured source.  Infallible by contract: a
/// failed fetch or unreadable file substitutes the embedded fallback
/// readings, and a well-formed document with no recognizable readings is an
/// empty sequence.
pub fn load_readings(source: &Source) -> LoadOutcome {
    match source {
        Source::Offline => {
            log::info!("offline source; using embedded fallback readings");
            LoadOutcome {
                readings: fallback_readings(),
                origin: Origin::Fallback,
            }
        }
        Source::Remote(url) => match fetch_remote(url) {
            Ok(readings) => {
                log::info!("fetched {} readings from {url}", readings.len());
                LoadOutcome {
                    readings,
                    origin: Origin::Fetched,
                }
            }
            Err(e) => {
                log::warn!("failed to fetch {url}: {e}; using fallback readings");
                LoadOutcome {
                    readings: fallback_readings(),
                    origin: Origin::Fallback,
                }
            }
        },
        Source::File(path) => match read_file(path) {
            Ok(readings) => {
                log::info!("loaded {} readings from {}", readings.len(), path.display());
                LoadOutcome {
                    readings,
                    origin: Origin::FileLoaded,
                }
            }
            Err(e) => {
                log::warn!(
                    "failed to read {}: {e}; using fallback readings",
                    path.display()
                );
                LoadOutcome {
                    readings: fallback_readings(),
                    origin: Origin::Fallback,
                }
            }
        },
    }
}

/// The embedded fallback sequence.
pub fn fallback_readings() -> Vec<Reading> {
    match serde_json::from_str::<JsonValue>(FALLBACK_JSON) {
        Ok(root) => parse_payload(&root),
        Err(e) => {
            log::error!("embedded fallback readings are malformed: {e}");
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Transports
// ---------------------------------------------------------------------------

fn fetch_remote(url: &str) -> Result<Vec<Reading>, LoadError> {
    let response = reqwest::blocking::Client::new()
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "no-cache")
        .send()?;

    if !response.status().is_success() {
        return Err(LoadError::Status(response.status()));
    }

    let root: JsonValue = serde_json::from_str(&response.text()?)?;
    Ok(parse_payload(&root))
}

fn read_file(path: &std::path::Path) -> Result<Vec<Reading>, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;
    Ok(parse_payload(&root))
}

// ---------------------------------------------------------------------------
// Payload parsing
// ---------------------------------------------------------------------------

/// Accepted document shapes:
///
/// ```json
/// [ { "timestamp": "...", "pm2_5": 23.42, ... }, ... ]
/// { "readings": [ ... ] }
/// ```
///
/// Any other shape yields an empty sequence, not an error.  Records without
/// a string `timestamp` are skipped; non-numeric measurement fields are
/// dropped from the record.
pub fn parse_payload(root: &JsonValue) -> Vec<Reading> {
    let records = match root {
        JsonValue::Array(items) => items.as_slice(),
        JsonValue::Object(obj) => match obj.get("readings").and_then(|v| v.as_array()) {
            Some(items) => items.as_slice(),
            None => {
                log::debug!("readings document has no array payload");
                return Vec::new();
            }
        },
        _ => {
            log::debug!("readings document has no array payload");
            return Vec::new();
        }
    };

    records
        .iter()
        .enumerate()
        .filter_map(|(i, rec)| match parse_reading(rec) {
            Some(reading) => Some(reading),
            None => {
                log::debug!("skipping record {i}: not an object with a timestamp");
                None
            }
        })
        .collect()
}

fn parse_reading(rec: &JsonValue) -> Option<Reading> {
    let obj = rec.as_object()?;
    let timestamp = obj.get("timestamp")?.as_str()?;

    let reading = obj
        .iter()
        .filter(|(key, _)| key.as_str() != "timestamp")
        .filter_map(|(key, val)| val.as_f64().map(|num| (key.clone(), num)))
        .fold(Reading::new(timestamp), |r, (key, num)| r.with_field(key, num));
    Some(reading)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn parse_str(text: &str) -> Vec<Reading> {
        parse_payload(&serde_json::from_str(text).unwrap())
    }

    #[test]
    fn accepts_bare_array() {
        let readings = parse_str(
            r#"[
                {"timestamp": "2025-12-10T13:36:46.896467+04:00", "pm2_5": 23.42},
                {"timestamp": "2025-12-10T14:06:46.896467+04:00", "pm2_5": 21.0}
            ]"#,
        );
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].fields.get("pm2_5"), Some(&23.42));
    }

    #[test]
    fn accepts_readings_object() {
        let readings = parse_str(
            r#"{"readings": [{"timestamp": "2025-12-10T13:36:46+04:00", "pm10": 30.1}]}"#,
        );
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].fields.get("pm10"), Some(&30.1));
    }

    #[test]
    fn unknown_shapes_are_empty() {
        assert!(parse_str("42").is_empty());
        assert!(parse_str(r#""hello""#).is_empty());
        assert!(parse_str(r#"{"rows": []}"#).is_empty());
        assert!(parse_str(r#"{"readings": "nope"}"#).is_empty());
    }

    #[test]
    fn zero_valued_fields_are_kept() {
        let readings = parse_str(r#"[{"timestamp": "t", "pm2_5": 0}]"#);
        assert_eq!(readings[0].fields.get("pm2_5"), Some(&0.0));
    }

    #[test]
    fn non_numeric_fields_are_dropped() {
        let readings =
            parse_str(r#"[{"timestamp": "t", "pm1": 5.5, "sensor": "SPS30", "ok": true}]"#);
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].fields.len(), 1);
        assert_eq!(readings[0].fields.get("pm1"), Some(&5.5));
    }

    #[test]
    fn records_without_timestamp_are_skipped() {
        let readings = parse_str(r#"[{"pm2_5": 1.0}, {"timestamp": "t", "pm2_5": 2.0}, 7]"#);
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].timestamp, "t");
    }

    #[test]
    fn offline_source_yields_fallback_exactly() {
        let outcome = load_readings(&Source::Offline);
        assert_eq!(outcome.origin, Origin::Fallback);
        assert_eq!(outcome.readings, fallback_readings());
        assert!(!outcome.readings.is_empty());
    }

    #[test]
    fn missing_file_falls_back() {
        let outcome = load_readings(&Source::File(PathBuf::from("/no/such/readings.json")));
        assert_eq!(outcome.origin, Origin::Fallback);
        assert_eq!(outcome.readings, fallback_readings());
    }

    #[test]
    fn malformed_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let outcome = load_readings(&Source::File(file.path().to_path_buf()));
        assert_eq!(outcome.origin, Origin::Fallback);
        assert_eq!(outcome.readings, fallback_readings());
    }

    #[test]
    fn wrong_shape_file_is_empty_not_fallback() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"rows\": []}}").unwrap();
        let outcome = load_readings(&Source::File(file.path().to_path_buf()));
        assert_eq!(outcome.origin, Origin::FileLoaded);
        assert!(outcome.readings.is_empty());
    }

    #[test]
    fn source_from_args() {
        assert!(matches!(Source::from_args(None, false), Source::Offline));
        assert!(matches!(
            Source::from_args(Some("http://host/data.json"), true),
            Source::Offline
        ));
        assert!(matches!(
            Source::from_args(Some("https://host/data.json"), false),
            Source::Remote(_)
        ));
        assert!(matches!(
            Source::from_args(Some("data.json"), false),
            Source::File(_)
        ));
    }
}
