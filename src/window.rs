/// Range parsing module for temporal scope handling
///
/// Parses range strings (e.g. 'today', 'yesterday', '7d', '30d', '90d',
/// 'ytd', '2026-01-01..2026-01-31', 'all') into date boundaries for
/// listing, export, and insights generation.
use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::entry::local_date_of;

/// Range selector kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeKind {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "yesterday")]
    Yesterday,
    #[serde(rename = "7d")]
    Last7,
    #[serde(rename = "30d")]
    Last30,
    #[serde(rename = "90d")]
    Last90,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "all")]
    All,
}

/// A resolved time range with inclusive date bounds.
///
/// `None` on a bound means unbounded on that side. Resolution is pure:
/// `today` is passed in by the caller, so the same inputs always produce
/// the same range.
#[derive(Debug, Clone)]
pub struct TimeRange {
    /// Range key as provided by the user (e.g. "7d", "2026-01-01..2026-01-31")
    pub key: String,
    pub kind: RangeKind,
    /// Start date (inclusive, local)
    pub from: Option<NaiveDate>,
    /// End date (inclusive, local)
    pub to: Option<NaiveDate>,
}

impl TimeRange {
    /// Parse a range string into a TimeRange.
    ///
    /// Supported forms:
    /// - "today" / "yesterday"
    /// - "7d" / "30d" / "90d" → trailing windows ending today
    /// - "ytd" → January 1st of today's year through today
    /// - "START..END" → explicit inclusive date pair ("%Y-%m-%d")
    /// - "all" → unbounded
    ///
    /// A custom range with a missing start or end falls back to the
    /// unfiltered range. That fallback is documented behavior, not an
    /// error.
    pub fn parse(range: &str, today: NaiveDate) -> Result<Self> {
        let range = range.trim();

        match range {
            "all" => {
                return Ok(TimeRange {
                    key: "all".to_string(),
                    kind: RangeKind::All,
                    from: None,
                    to: None,
                })
            }
            "today" => {
                return Ok(TimeRange {
                    key: "today".to_string(),
                    kind: RangeKind::Today,
                    from: Some(today),
                    to: Some(today),
                })
            }
            "yesterday" => {
                let yesterday = today
                    .pred_opt()
                    .ok_or_else(|| anyhow!("No day precedes {}", today))?;
                return Ok(TimeRange {
                    key: "yesterday".to_string(),
                    kind: RangeKind::Yesterday,
                    from: Some(yesterday),
                    to: Some(yesterday),
                });
            }
            "ytd" => {
                let jan_1 = NaiveDate::from_ymd_opt(today.year(), 1, 1)
                    .ok_or_else(|| anyhow!("Invalid year: {}", today.year()))?;
                return Ok(TimeRange {
                    key: "ytd".to_string(),
                    kind: RangeKind::YearToDate,
                    from: Some(jan_1),
                    to: Some(today),
                });
            }
            _ => {}
        }

        // Trailing windows: "7d", "30d", "90d"
        if let Some(days_str) = range.strip_suffix('d') {
            if let Ok(days) = days_str.parse::<i64>() {
                let kind = match days {
                    7 => Some(RangeKind::Last7),
                    30 => Some(RangeKind::Last30),
                    90 => Some(RangeKind::Last90),
                    _ => None,
                };
                if let Some(kind) = kind {
                    let from = today - chrono::Duration::days(days - 1);
                    return Ok(TimeRange {
                        key: range.to_string(),
                        kind,
                        from: Some(from),
                        to: Some(today),
                    });
                }
            }
        }

        // Custom pair: "START..END", either side may be empty
        if let Some((start_str, end_str)) = range.split_once("..") {
            let start = parse_bound(start_str)?;
            let end = parse_bound(end_str)?;

            // Missing bound → unfiltered fallback
            let (from, to) = match (start, end) {
                (Some(s), Some(e)) => (Some(s), Some(e)),
                _ => (None, None),
            };

            return Ok(TimeRange {
                key: range.to_string(),
                kind: RangeKind::Custom,
                from,
                to,
            });
        }

        Err(anyhow!(
            "Invalid range: '{}'. Expected 'today', 'yesterday', '7d', '30d', '90d', 'ytd', 'START..END', or 'all'",
            range
        ))
    }

    /// Whether a millisecond timestamp falls inside this range.
    ///
    /// An unbounded range includes everything, even timestamps that do not
    /// resolve to a date; bounded ranges exclude unresolvable timestamps.
    pub fn contains(&self, ts_millis: i64) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        let Some(date) = local_date_of(ts_millis) else {
            return false;
        };
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }

    /// Convert to a millisecond timestamp range for store queries.
    ///
    /// Returns (start_ts, end_ts): midnight local of the start date and end
    /// of day local (23:59:59.999) of the end date, `None` for unbounded
    /// sides.
    pub fn to_timestamp_range(&self) -> (Option<i64>, Option<i64>) {
        let start_ts = self.from.and_then(|date| {
            date.and_hms_opt(0, 0, 0)
                .and_then(|ndt| Local.from_local_datetime(&ndt).earliest())
                .map(|dt| dt.timestamp_millis())
        });

        let end_ts = self.to.and_then(|date| {
            date.and_hms_milli_opt(23, 59, 59, 999)
                .and_then(|ndt| Local.from_local_datetime(&ndt).latest())
                .map(|dt| dt.timestamp_millis())
        });

        (start_ts, end_ts)
    }

    /// Human label for report headers.
    pub fn label(&self) -> String {
        match self.kind {
            RangeKind::Today => "Today".to_string(),
            RangeKind::Yesterday => "Yesterday".to_string(),
            RangeKind::Last7 => "Last 7 Days".to_string(),
            RangeKind::Last30 => "Last 30 Days".to_string(),
            RangeKind::Last90 => "Last 90 Days".to_string(),
            RangeKind::YearToDate => "This Year".to_string(),
            RangeKind::Custom => match (self.from, self.to) {
                (Some(from), Some(to)) => format!("{} to {}", from, to),
                _ => "All Time".to_string(),
            },
            RangeKind::All => "All Time".to_string(),
        }
    }
}

fn parse_bound(s: &str) -> Result<Option<NaiveDate>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| anyhow!("Invalid date in range: '{}'. Expected YYYY-MM-DD", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 18).unwrap()
    }

    #[test]
    fn test_parse_today() {
        let range = TimeRange::parse("today", today()).unwrap();
        assert_eq!(range.kind, RangeKind::Today);
        assert_eq!(range.from, Some(today()));
        assert_eq!(range.to, Some(today()));
    }

    #[test]
    fn test_parse_yesterday() {
        let range = TimeRange::parse("yesterday", today()).unwrap();
        let expected = NaiveDate::from_ymd_opt(2026, 3, 17).unwrap();
        assert_eq!(range.kind, RangeKind::Yesterday);
        assert_eq!(range.from, Some(expected));
        assert_eq!(range.to, Some(expected));
    }

    #[test]
    fn test_parse_trailing_windows() {
        let range = TimeRange::parse("7d", today()).unwrap();
        assert_eq!(range.kind, RangeKind::Last7);
        assert_eq!(range.from, Some(NaiveDate::from_ymd_opt(2026, 3, 12).unwrap()));
        assert_eq!(range.to, Some(today()));

        let range = TimeRange::parse("30d", today()).unwrap();
        assert_eq!(range.kind, RangeKind::Last30);
        assert_eq!(range.from, Some(NaiveDate::from_ymd_opt(2026, 2, 17).unwrap()));

        let range = TimeRange::parse("90d", today()).unwrap();
        assert_eq!(range.kind, RangeKind::Last90);
        assert_eq!(range.from, Some(NaiveDate::from_ymd_opt(2025, 12, 19).unwrap()));
    }

    #[test]
    fn test_parse_ytd() {
        let range = TimeRange::parse("ytd", today()).unwrap();
        assert_eq!(range.kind, RangeKind::YearToDate);
        assert_eq!(range.from, Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
        assert_eq!(range.to, Some(today()));
    }

    #[test]
    fn test_parse_custom_pair() {
        let range = TimeRange::parse("2026-01-01..2026-01-31", today()).unwrap();
        assert_eq!(range.kind, RangeKind::Custom);
        assert_eq!(range.from, Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
        assert_eq!(range.to, Some(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
    }

    #[test]
    fn test_custom_missing_bound_falls_back_to_unfiltered() {
        let range = TimeRange::parse("2026-01-01..", today()).unwrap();
        assert_eq!(range.kind, RangeKind::Custom);
        assert_eq!(range.from, None);
        assert_eq!(range.to, None);
        assert!(range.contains(0));

        let range = TimeRange::parse("..2026-01-31", today()).unwrap();
        assert_eq!(range.from, None);
        assert_eq!(range.to, None);
    }

    #[test]
    fn test_parse_all() {
        let range = TimeRange::parse("all", today()).unwrap();
        assert_eq!(range.kind, RangeKind::All);
        assert!(range.contains(i64::MIN / 4));
    }

    #[test]
    fn test_invalid_range() {
        assert!(TimeRange::parse("fortnight", today()).is_err());
        assert!(TimeRange::parse("14d", today()).is_err());
        assert!(TimeRange::parse("2026-01-01..soon", today()).is_err());
    }

    #[test]
    fn test_contains_by_local_date() {
        let range = TimeRange::parse("today", today()).unwrap();
        let noon = Local
            .with_ymd_and_hms(2026, 3, 18, 12, 0, 0)
            .unwrap()
            .timestamp_millis();
        let yesterday_noon = Local
            .with_ymd_and_hms(2026, 3, 17, 12, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert!(range.contains(noon));
        assert!(!range.contains(yesterday_noon));
    }

    #[test]
    fn test_timestamp_range_covers_whole_days() {
        let range = TimeRange::parse("today", today()).unwrap();
        let (start, end) = range.to_timestamp_range();
        let start = start.unwrap();
        let end = end.unwrap();
        assert!(start < end);
        // A full local day minus one millisecond
        assert_eq!(end - start, 24 * 3600 * 1000 - 1);
    }
}
