/// Mood aggregation and insights generation module.
///
/// Pure functions over an in-memory entry list: time-window filtering,
/// mood frequency, emotion distribution, streak detection, and the weekly
/// trend. Nothing here performs I/O, caches, or mutates its input; calling
/// any function twice on the same input yields identical output.
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use std::collections::HashSet;

use crate::entry::{MoodEntry, Sentiment};
use crate::insights::*;
use crate::window::TimeRange;

/// Select the entries whose timestamp falls inside the range, preserving
/// the original order. No entries in range is a valid empty result.
pub fn filter_entries<'a>(entries: &'a [MoodEntry], range: &TimeRange) -> Vec<&'a MoodEntry> {
    entries
        .iter()
        .filter(|entry| range.contains(entry.created_at))
        .collect()
}

/// Count occurrences per mood label, ranked by count descending.
///
/// Groups are keyed in first-logged order and the sort is stable, so ties
/// keep first-encountered order. Counts always sum to the input length.
pub fn mood_frequency(entries: &[&MoodEntry]) -> Vec<MoodCount> {
    let mut counts: IndexMap<&str, (&str, i32)> = IndexMap::new();
    for entry in entries {
        let slot = counts
            .entry(entry.mood_name.as_str())
            .or_insert((entry.emoji.as_str(), 0));
        slot.1 += 1;
    }

    let mut ranked: Vec<MoodCount> = counts
        .into_iter()
        .map(|(mood, (emoji, count))| MoodCount {
            mood: mood.to_string(),
            emoji: emoji.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// Count occurrences per emotion category as a share of the total.
///
/// Each group's percentage is rounded independently, so the column need
/// not sum to exactly 100. That is an accepted rounding artifact.
pub fn emotion_distribution(entries: &[&MoodEntry]) -> Vec<EmotionShare> {
    let total = entries.len();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: IndexMap<&str, i32> = IndexMap::new();
    for entry in entries {
        *counts.entry(entry.emotion.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(emotion, count)| EmotionShare {
            emotion: emotion.to_string(),
            count,
            percentage: ((count as f64 / total as f64) * 100.0).round() as i32,
        })
        .collect()
}

/// Find the longest run of consecutive calendar days sharing one mood.
///
/// A streak extends when the next entry lands exactly one day after the
/// previous one with the same mood label. Repeated entries of the same
/// mood on one day leave the running streak unchanged; anything else
/// resets it. The first-encountered longest streak wins ties. Entries
/// whose timestamp does not resolve to a date are excluded.
pub fn longest_streak(entries: &[&MoodEntry]) -> Option<Streak> {
    let mut dated: Vec<(NaiveDate, &MoodEntry)> = entries
        .iter()
        .filter_map(|entry| entry.local_date().map(|date| (date, *entry)))
        .collect();
    dated.sort_by_key(|(_, entry)| entry.created_at);

    let mut best: Option<(String, i32)> = None;
    let mut run_mood: Option<&str> = None;
    let mut run_date: Option<NaiveDate> = None;
    let mut run_len = 0;

    for (date, entry) in &dated {
        let same_mood = run_mood == Some(entry.mood_name.as_str());
        if same_mood && run_date == Some(*date) {
            // Same day logged again with the same mood: no change.
        } else if same_mood && run_date.and_then(|d| d.succ_opt()) == Some(*date) {
            run_len += 1;
            run_date = Some(*date);
        } else {
            run_mood = Some(entry.mood_name.as_str());
            run_date = Some(*date);
            run_len = 1;
        }

        // Strictly greater only: ties keep the first-encountered streak.
        if best.as_ref().map_or(true, |(_, len)| run_len > *len) {
            best = Some((entry.mood_name.clone(), run_len));
        }
    }

    best.map(|(mood, days)| Streak { mood, days })
}

/// Build seven day buckets for the Sunday-anchored week containing
/// `today`.
///
/// Each day with entries takes the chronologically-latest entry's emotion
/// mapped to a sentiment score. Days without entries carry a `None` score,
/// never a numeric 0, so they stay distinct from a logged neutral day.
pub fn weekly_trend(entries: &[&MoodEntry], today: NaiveDate) -> Vec<TrendDay> {
    let week_start = today - chrono::Duration::days(today.weekday().num_days_from_sunday() as i64);

    (0..7)
        .map(|offset| {
            let date = week_start + chrono::Duration::days(offset);
            let latest = entries
                .iter()
                .filter(|entry| entry.local_date() == Some(date))
                .max_by_key(|entry| entry.created_at);

            match latest {
                Some(entry) => TrendDay {
                    date: date.format("%Y-%m-%d").to_string(),
                    weekday: date.format("%a").to_string(),
                    score: Some(Sentiment::of_emotion(&entry.emotion).score()),
                    mood: Some(entry.mood_name.clone()),
                },
                None => TrendDay {
                    date: date.format("%Y-%m-%d").to_string(),
                    weekday: date.format("%a").to_string(),
                    score: None,
                    mood: None,
                },
            }
        })
        .collect()
}

/// Build the full insights document for one window.
///
/// `entries` is the profile's full entry list; `entries_total` in the
/// output reflects it, while every aggregate covers only the filtered
/// window.
pub fn build_insights(
    entries: &[MoodEntry],
    range: &TimeRange,
    profile_name: &str,
    today: NaiveDate,
) -> Result<Insights> {
    let filtered = filter_entries(entries, range);

    let frequency = mood_frequency(&filtered);
    let distribution = emotion_distribution(&filtered);
    let streak = longest_streak(&filtered);
    let trend = weekly_trend(&filtered, today);
    let summary = build_summary(&filtered, &frequency);

    Ok(Insights {
        schema_version: 1,
        range: Range {
            kind: range.kind,
            key: range.key.clone(),
            from: range.from.map(|d| d.format("%Y-%m-%d").to_string()),
            to: range.to.map(|d| d.format("%Y-%m-%d").to_string()),
        },
        generated_at: today.format("%Y-%m-%d").to_string(),
        profile: Profile {
            name: profile_name.to_string(),
            entries_total: entries.len() as i32,
        },
        summary,
        frequency,
        distribution,
        streak,
        weekly_trend: trend,
    })
}

/// Builds the Summary section from the filtered window (private).
fn build_summary(filtered: &[&MoodEntry], frequency: &[MoodCount]) -> Summary {
    let active_dates: HashSet<NaiveDate> = filtered
        .iter()
        .filter_map(|entry| entry.local_date())
        .collect();

    let first = filtered
        .iter()
        .filter(|entry| entry.local_date().is_some())
        .min_by_key(|entry| entry.created_at);
    let last = filtered
        .iter()
        .filter(|entry| entry.local_date().is_some())
        .max_by_key(|entry| entry.created_at);

    Summary {
        entries_logged: filtered.len() as i32,
        days_active: active_dates.len() as i32,
        top_mood: frequency.first().map(|mc| mc.mood.clone()),
        first_entry: first.and_then(|entry| {
            entry
                .local_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
        }),
        last_entry: last.and_then(|entry| {
            entry
                .local_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::find_mood;
    use crate::window::RangeKind;
    use chrono::{Local, TimeZone};

    fn ts(date: NaiveDate, hour: u32, minute: u32) -> i64 {
        Local
            .with_ymd_and_hms(date.year(), date.month(), date.day(), hour, minute, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: i64, mood: &str, date: NaiveDate, hour: u32) -> MoodEntry {
        let kind = find_mood(mood).expect("mood must be in the catalog");
        MoodEntry {
            id,
            mood_name: kind.name.to_string(),
            emotion: kind.emotion.to_string(),
            emoji: kind.emoji.to_string(),
            note: None,
            created_at: ts(date, hour, 0),
            is_private: false,
            location: None,
        }
    }

    fn refs(entries: &[MoodEntry]) -> Vec<&MoodEntry> {
        entries.iter().collect()
    }

    fn all_range() -> TimeRange {
        TimeRange {
            key: "all".to_string(),
            kind: RangeKind::All,
            from: None,
            to: None,
        }
    }

    #[test]
    fn test_filter_today_excludes_yesterday() {
        let today = day(2026, 3, 18);
        let entries = vec![
            entry(1, "Strawberry Bliss", day(2026, 3, 17), 9),
            entry(2, "Sour Lemon", today, 10),
            entry(3, "Peachy Keen", today, 21),
        ];
        let range = TimeRange::parse("today", today).unwrap();

        let filtered = filter_entries(&entries, &range);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|e| e.id != 1));
        // Original order preserved
        assert_eq!(filtered[0].id, 2);
        assert_eq!(filtered[1].id, 3);
    }

    #[test]
    fn test_filter_empty_window_is_valid() {
        let entries = vec![entry(1, "Strawberry Bliss", day(2026, 3, 1), 9)];
        let range = TimeRange::parse("today", day(2026, 6, 1)).unwrap();
        assert!(filter_entries(&entries, &range).is_empty());
    }

    #[test]
    fn test_frequency_counts_sum_to_input_length() {
        let entries = vec![
            entry(1, "Strawberry Bliss", day(2026, 3, 1), 9),
            entry(2, "Strawberry Bliss", day(2026, 3, 2), 9),
            entry(3, "Sour Lemon", day(2026, 3, 2), 12),
            entry(4, "Peachy Keen", day(2026, 3, 3), 9),
            entry(5, "Sour Lemon", day(2026, 3, 4), 9),
        ];
        let freq = mood_frequency(&refs(&entries));
        let total: i32 = freq.iter().map(|mc| mc.count).sum();
        assert_eq!(total, entries.len() as i32);
    }

    #[test]
    fn test_frequency_ties_keep_first_logged_order() {
        let entries = vec![
            entry(1, "Blueberry Blues", day(2026, 3, 1), 9),
            entry(2, "Cherry Charged", day(2026, 3, 1), 10),
            entry(3, "Blueberry Blues", day(2026, 3, 2), 9),
            entry(4, "Cherry Charged", day(2026, 3, 2), 10),
            entry(5, "Strawberry Bliss", day(2026, 3, 3), 9),
        ];
        let freq = mood_frequency(&refs(&entries));
        assert_eq!(freq[0].mood, "Blueberry Blues");
        assert_eq!(freq[0].count, 2);
        assert_eq!(freq[1].mood, "Cherry Charged");
        assert_eq!(freq[1].count, 2);
        assert_eq!(freq[2].mood, "Strawberry Bliss");
        assert_eq!(freq[2].count, 1);
    }

    #[test]
    fn test_distribution_percentages_in_band() {
        let entries = vec![
            entry(1, "Strawberry Bliss", day(2026, 3, 1), 9),
            entry(2, "Sour Lemon", day(2026, 3, 2), 9),
            entry(3, "Blueberry Blues", day(2026, 3, 3), 9),
        ];
        let dist = emotion_distribution(&refs(&entries));
        assert_eq!(dist.len(), 3);
        for share in &dist {
            assert!((0..=100).contains(&share.percentage));
            // 1/3 rounds to 33; the column sums to 99, by design
            assert_eq!(share.percentage, 33);
        }
    }

    #[test]
    fn test_distribution_groups_by_emotion_not_mood() {
        // Strawberry Bliss and no other Happy moods; two Stressed entries
        let entries = vec![
            entry(1, "Strawberry Bliss", day(2026, 3, 1), 9),
            entry(2, "Sour Lemon", day(2026, 3, 2), 9),
            entry(3, "Sour Lemon", day(2026, 3, 3), 9),
            entry(4, "Sour Lemon", day(2026, 3, 4), 9),
        ];
        let dist = emotion_distribution(&refs(&entries));
        assert_eq!(dist.len(), 2);
        let stressed = dist.iter().find(|s| s.emotion == "Stressed").unwrap();
        assert_eq!(stressed.count, 3);
        assert_eq!(stressed.percentage, 75);
    }

    #[test]
    fn test_distribution_empty_input() {
        assert!(emotion_distribution(&[]).is_empty());
    }

    #[test]
    fn test_streak_two_days_then_break() {
        let entries = vec![
            entry(1, "Strawberry Bliss", day(2026, 3, 1), 9),
            entry(2, "Strawberry Bliss", day(2026, 3, 2), 9),
            entry(3, "Blueberry Blues", day(2026, 3, 3), 9),
        ];
        let streak = longest_streak(&refs(&entries)).unwrap();
        assert_eq!(streak.mood, "Strawberry Bliss");
        assert_eq!(streak.days, 2);
    }

    #[test]
    fn test_streak_empty_input_is_none() {
        assert!(longest_streak(&[]).is_none());
    }

    #[test]
    fn test_streak_gap_resets() {
        let entries = vec![
            entry(1, "Strawberry Bliss", day(2026, 3, 1), 9),
            entry(2, "Strawberry Bliss", day(2026, 3, 2), 9),
            // Two-day gap
            entry(3, "Strawberry Bliss", day(2026, 3, 5), 9),
            entry(4, "Strawberry Bliss", day(2026, 3, 6), 9),
            entry(5, "Strawberry Bliss", day(2026, 3, 7), 9),
        ];
        let streak = longest_streak(&refs(&entries)).unwrap();
        assert_eq!(streak.days, 3);
    }

    #[test]
    fn test_streak_same_day_repeat_does_not_reset() {
        let entries = vec![
            entry(1, "Strawberry Bliss", day(2026, 3, 1), 9),
            entry(2, "Strawberry Bliss", day(2026, 3, 1), 21),
            entry(3, "Strawberry Bliss", day(2026, 3, 2), 9),
        ];
        let streak = longest_streak(&refs(&entries)).unwrap();
        assert_eq!(streak.days, 2);
    }

    #[test]
    fn test_streak_tie_break_prefers_first_encountered() {
        let entries = vec![
            entry(1, "Strawberry Bliss", day(2026, 3, 1), 9),
            entry(2, "Strawberry Bliss", day(2026, 3, 2), 9),
            entry(3, "Blueberry Blues", day(2026, 3, 10), 9),
            entry(4, "Blueberry Blues", day(2026, 3, 11), 9),
        ];
        let streak = longest_streak(&refs(&entries)).unwrap();
        assert_eq!(streak.mood, "Strawberry Bliss");
        assert_eq!(streak.days, 2);
    }

    #[test]
    fn test_streak_excludes_unresolvable_timestamps() {
        let mut broken = entry(1, "Strawberry Bliss", day(2026, 3, 1), 9);
        broken.created_at = i64::MAX;
        let ok_a = entry(2, "Blueberry Blues", day(2026, 3, 2), 9);
        let ok_b = entry(3, "Blueberry Blues", day(2026, 3, 3), 9);
        let entries = vec![broken, ok_a, ok_b];

        let streak = longest_streak(&refs(&entries)).unwrap();
        assert_eq!(streak.mood, "Blueberry Blues");
        assert_eq!(streak.days, 2);
    }

    #[test]
    fn test_weekly_trend_always_seven_buckets() {
        // 2026-03-18 is a Wednesday; the containing week starts Sun 03-15
        let today = day(2026, 3, 18);
        let trend = weekly_trend(&[], today);
        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].date, "2026-03-15");
        assert_eq!(trend[0].weekday, "Sun");
        assert_eq!(trend[6].date, "2026-03-21");
        assert_eq!(trend[6].weekday, "Sat");
        assert!(trend.iter().all(|d| d.score.is_none() && d.mood.is_none()));
    }

    #[test]
    fn test_weekly_trend_latest_entry_of_day_wins() {
        let today = day(2026, 3, 18);
        let entries = vec![
            entry(1, "Strawberry Bliss", day(2026, 3, 16), 8),
            entry(2, "Sour Lemon", day(2026, 3, 16), 20),
        ];
        let trend = weekly_trend(&refs(&entries), today);
        // Monday bucket reflects the evening entry
        assert_eq!(trend[1].date, "2026-03-16");
        assert_eq!(trend[1].score, Some(-1));
        assert_eq!(trend[1].mood.as_deref(), Some("Sour Lemon"));
    }

    #[test]
    fn test_weekly_trend_scores_and_missing_days() {
        let today = day(2026, 3, 18);
        let entries = vec![
            entry(1, "Strawberry Bliss", day(2026, 3, 15), 9), // positive
            entry(2, "Kiwi Curious", day(2026, 3, 16), 9),     // neutral, logged
            entry(3, "Banana Drama", day(2026, 3, 17), 9),     // negative
        ];
        let trend = weekly_trend(&refs(&entries), today);
        assert_eq!(trend[0].score, Some(1));
        assert_eq!(trend[1].score, Some(0));
        assert_eq!(trend[2].score, Some(-1));
        // A logged neutral day and a missing day are distinguishable
        assert_eq!(trend[3].score, None);
        assert!(trend[1].score.is_some());
    }

    #[test]
    fn test_aggregators_are_idempotent() {
        let today = day(2026, 3, 18);
        let entries = vec![
            entry(1, "Strawberry Bliss", day(2026, 3, 15), 9),
            entry(2, "Sour Lemon", day(2026, 3, 16), 9),
            entry(3, "Sour Lemon", day(2026, 3, 17), 9),
        ];
        let range = all_range();

        let first = build_insights(&entries, &range, "default", today).unwrap();
        let second = build_insights(&entries, &range, "default", today).unwrap();
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_build_insights_summary() {
        let today = day(2026, 3, 18);
        let entries = vec![
            entry(1, "Strawberry Bliss", day(2026, 3, 10), 9),
            entry(2, "Strawberry Bliss", day(2026, 3, 11), 9),
            entry(3, "Sour Lemon", day(2026, 3, 11), 20),
        ];
        let insights = build_insights(&entries, &all_range(), "default", today).unwrap();

        assert_eq!(insights.summary.entries_logged, 3);
        assert_eq!(insights.summary.days_active, 2);
        assert_eq!(insights.summary.top_mood.as_deref(), Some("Strawberry Bliss"));
        assert_eq!(insights.summary.first_entry.as_deref(), Some("2026-03-10"));
        assert_eq!(insights.summary.last_entry.as_deref(), Some("2026-03-11"));
        assert_eq!(insights.profile.entries_total, 3);
        assert_eq!(insights.weekly_trend.len(), 7);
    }

    #[test]
    fn test_build_insights_windowed_totals_differ() {
        let today = day(2026, 3, 18);
        let entries = vec![
            entry(1, "Strawberry Bliss", day(2025, 6, 1), 9),
            entry(2, "Sour Lemon", day(2026, 3, 18), 9),
        ];
        let range = TimeRange::parse("today", today).unwrap();
        let insights = build_insights(&entries, &range, "default", today).unwrap();

        assert_eq!(insights.profile.entries_total, 2);
        assert_eq!(insights.summary.entries_logged, 1);
        assert_eq!(insights.frequency.len(), 1);
        assert_eq!(insights.frequency[0].mood, "Sour Lemon");
    }
}
