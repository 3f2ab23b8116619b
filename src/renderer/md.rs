use crate::insights::*;
use crate::window::RangeKind;
use anyhow::Result;

/// Render an insights document to Markdown.
pub fn render(insights: &Insights) -> Result<String> {
    let mut output = String::new();

    // 1. Title and window
    render_header(&mut output, insights);

    // 2. Summary
    render_summary(&mut output, &insights.summary);

    // 3. Top moods
    if !insights.frequency.is_empty() {
        render_frequency(&mut output, &insights.frequency);
    }

    // 4. Emotion mix
    if !insights.distribution.is_empty() {
        render_distribution(&mut output, &insights.distribution);
    }

    // 5. Streak
    if let Some(ref streak) = insights.streak {
        render_streak(&mut output, streak);
    }

    // 6. Weekly trend
    render_trend(&mut output, &insights.weekly_trend);

    Ok(output)
}

fn range_phrase(range: &Range) -> String {
    match range.kind {
        RangeKind::Today => "today".to_string(),
        RangeKind::Yesterday => "yesterday".to_string(),
        RangeKind::Last7 => "the last 7 days".to_string(),
        RangeKind::Last30 => "the last 30 days".to_string(),
        RangeKind::Last90 => "the last 90 days".to_string(),
        RangeKind::YearToDate => "this year".to_string(),
        RangeKind::Custom => match (&range.from, &range.to) {
            (Some(from), Some(to)) => format!("{} to {}", from, to),
            _ => "all time".to_string(),
        },
        RangeKind::All => "all time".to_string(),
    }
}

fn render_header(output: &mut String, insights: &Insights) {
    output.push_str(&format!(
        "# 🍓 Your Slurp Recap — {}\n",
        insights.profile.name
    ));
    output.push_str(&format!(
        "*Covering {} · generated {}*\n\n",
        range_phrase(&insights.range),
        insights.generated_at
    ));
}

fn render_summary(output: &mut String, summary: &Summary) {
    output.push_str("### 📊 Summary\n");
    output.push_str(&format!(
        "- 📝 **Entries logged:** {}\n",
        format_number(summary.entries_logged)
    ));
    output.push_str(&format!("- 🔥 **Active days:** {}\n", summary.days_active));

    if let Some(ref top_mood) = summary.top_mood {
        output.push_str(&format!("- 🏆 **Top mood:** {}\n", top_mood));
    }

    if let (Some(first), Some(last)) = (&summary.first_entry, &summary.last_entry) {
        output.push_str(&format!("- 📅 **First to last entry:** {} → {}\n", first, last));
    }
    output.push('\n');
}

fn render_frequency(output: &mut String, frequency: &[MoodCount]) {
    output.push_str("### 🍇 Top Moods\n");
    for mood_count in frequency.iter().take(5) {
        output.push_str(&format!(
            "- {} **{}** × {}\n",
            mood_count.emoji,
            mood_count.mood,
            format_number(mood_count.count)
        ));
    }
    output.push('\n');
}

fn render_distribution(output: &mut String, distribution: &[EmotionShare]) {
    output.push_str("### 🎭 Emotion Mix\n");
    for share in distribution {
        output.push_str(&format!(
            "- **{}:** {}% ({})\n",
            share.emotion,
            share.percentage,
            format_number(share.count)
        ));
    }
    output.push('\n');
}

fn render_streak(output: &mut String, streak: &Streak) {
    let day_word = if streak.days == 1 { "day" } else { "days" };
    output.push_str("### ⛓️ Longest Streak\n");
    output.push_str(&format!(
        "- **{}** for {} {} in a row\n\n",
        streak.mood, streak.days, day_word
    ));
}

fn render_trend(output: &mut String, trend: &[TrendDay]) {
    output.push_str("### 📈 This Week\n");
    for day in trend {
        let marker = match day.score {
            Some(1) => "↑",
            Some(-1) => "↓",
            Some(_) => "→",
            None => "·",
        };
        match &day.mood {
            Some(mood) => output.push_str(&format!(
                "- {} {} {} ({})\n",
                day.weekday, marker, day.date, mood
            )),
            None => output.push_str(&format!(
                "- {} {} {} (no entry)\n",
                day.weekday, marker, day.date
            )),
        }
    }
    output.push('\n');
}

fn format_number(n: i32) -> String {
    let raw = n.to_string();
    let mut grouped = String::new();
    for (i, c) in raw.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 && c.is_ascii_digit() {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::RangeKind;

    fn sample_insights() -> Insights {
        Insights {
            schema_version: 1,
            range: Range {
                kind: RangeKind::Last7,
                key: "7d".to_string(),
                from: Some("2026-03-12".to_string()),
                to: Some("2026-03-18".to_string()),
            },
            generated_at: "2026-03-18".to_string(),
            profile: Profile {
                name: "default".to_string(),
                entries_total: 40,
            },
            summary: Summary {
                entries_logged: 5,
                days_active: 4,
                top_mood: Some("Strawberry Bliss".to_string()),
                first_entry: Some("2026-03-12".to_string()),
                last_entry: Some("2026-03-18".to_string()),
            },
            frequency: vec![MoodCount {
                mood: "Strawberry Bliss".to_string(),
                emoji: "🍓".to_string(),
                count: 3,
            }],
            distribution: vec![EmotionShare {
                emotion: "Happy".to_string(),
                count: 3,
                percentage: 60,
            }],
            streak: Some(Streak {
                mood: "Strawberry Bliss".to_string(),
                days: 3,
            }),
            weekly_trend: vec![
                TrendDay {
                    date: "2026-03-15".to_string(),
                    weekday: "Sun".to_string(),
                    score: Some(1),
                    mood: Some("Strawberry Bliss".to_string()),
                },
                TrendDay {
                    date: "2026-03-16".to_string(),
                    weekday: "Mon".to_string(),
                    score: None,
                    mood: None,
                },
            ],
        }
    }

    #[test]
    fn test_render_contains_all_sections() {
        let md = render(&sample_insights()).unwrap();
        assert!(md.contains("# 🍓 Your Slurp Recap — default"));
        assert!(md.contains("### 📊 Summary"));
        assert!(md.contains("**Entries logged:** 5"));
        assert!(md.contains("### 🍇 Top Moods"));
        assert!(md.contains("**Strawberry Bliss** × 3"));
        assert!(md.contains("### 🎭 Emotion Mix"));
        assert!(md.contains("**Happy:** 60%"));
        assert!(md.contains("### ⛓️ Longest Streak"));
        assert!(md.contains("3 days in a row"));
        assert!(md.contains("### 📈 This Week"));
        assert!(md.contains("Sun ↑"));
        assert!(md.contains("Mon · 2026-03-16 (no entry)"));
    }

    #[test]
    fn test_render_empty_window_omits_optional_sections() {
        let mut insights = sample_insights();
        insights.frequency.clear();
        insights.distribution.clear();
        insights.streak = None;
        insights.summary = Summary {
            entries_logged: 0,
            days_active: 0,
            top_mood: None,
            first_entry: None,
            last_entry: None,
        };

        let md = render(&insights).unwrap();
        assert!(!md.contains("Top Moods"));
        assert!(!md.contains("Emotion Mix"));
        assert!(!md.contains("Longest Streak"));
        assert!(md.contains("**Entries logged:** 0"));
    }

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(7), "7");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }
}
