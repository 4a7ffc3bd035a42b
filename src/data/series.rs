use chrono::DateTime;

use super::model::Reading;

// ---------------------------------------------------------------------------
// Series definitions – the four fixed measurement channels
// ---------------------------------------------------------------------------

/// One measurement channel, resolved from a reading by trying its aliases in
/// declared order.  The alias lists are fixed; first present key wins.
#[derive(Debug, Clone, Copy)]
pub struct SeriesDef {
    pub label: &'static str,
    pub aliases: &'static [&'static str],
}

/// The four particulate-matter channels, one chart each.
pub static SERIES: [SeriesDef; 4] = [
    SeriesDef {
        label: "PM1",
        aliases: &["pm1", "pm1_0", "PM1", "PM1.0"],
    },
    SeriesDef {
        label: "PM2.5",
        aliases: &["pm2_5", "PM2.5"],
    },
    SeriesDef {
        label: "PM4",
        aliases: &["pm4_0", "PM4"],
    },
    SeriesDef {
        label: "PM10",
        aliases: &["pm10", "PM10"],
    },
];

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Resolve one reading against a series definition.  Presence means the key
/// exists, so an explicit `0.0` (or a negative value) resolves; a reading
/// carrying none of the aliases resolves to `None`.
pub fn resolve_value(reading: &Reading, def: &SeriesDef) -> Option<f64> {
    def.aliases
        .iter()
        .find_map(|key| reading.fields.get(*key).copied())
}

/// The values sequence for one series, same length as the input.
pub fn series_values(readings: &[Reading], def: &SeriesDef) -> Vec<Option<f64>> {
    readings.iter().map(|r| resolve_value(r, def)).collect()
}

/// Human-readable axis labels, one per reading.  Timestamps that fail to
/// parse as RFC 3339 keep their raw text as the label.
pub fn timestamp_labels(readings: &[Reading]) -> Vec<String> {
    readings
        .iter()
        .map(|r| match DateTime::parse_from_rfc3339(&r.timestamp) {
            Ok(dt) => dt.format("%d %b %H:%M").to_string(),
            Err(_) => r.timestamp.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn pm25() -> &'static SeriesDef {
        &SERIES[1]
    }

    #[test]
    fn first_alias_wins() {
        let reading = Reading::new("t")
            .with_field("PM1.0", 9.0)
            .with_field("pm1_0", 4.0);
        // "pm1" absent, so "pm1_0" is the first present alias.
        assert_eq!(resolve_value(&reading, &SERIES[0]), Some(4.0));
    }

    #[test]
    fn zero_is_present_not_absent() {
        let reading = Reading::new("t").with_field("pm2_5", 0.0);
        assert_eq!(resolve_value(&reading, pm25()), Some(0.0));

        let negative = Reading::new("t").with_field("pm2_5", -1.5);
        assert_eq!(resolve_value(&negative, pm25()), Some(-1.5));
    }

    #[test]
    fn missing_every_alias_is_none() {
        let reading = Reading::new("t").with_field("pm10", 30.0);
        assert_eq!(resolve_value(&reading, pm25()), None);
    }

    #[test]
    fn values_length_matches_dataset() {
        let readings = vec![
            Reading::new("a").with_field("pm2_5", 1.0),
            Reading::new("b"),
            Reading::new("c").with_field("PM2.5", 3.0),
        ];
        for def in &SERIES {
            assert_eq!(series_values(&readings, def).len(), readings.len());
        }
        let values = series_values(&readings, pm25());
        assert_eq!(values, vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn labels_format_or_fall_back_to_raw() {
        let readings = vec![
            Reading::new("2025-12-10T13:36:46.896467+04:00"),
            Reading::new("not-a-timestamp"),
        ];
        let labels = timestamp_labels(&readings);
        assert_eq!(labels, vec!["10 Dec 13:36", "not-a-timestamp"]);
    }
}
