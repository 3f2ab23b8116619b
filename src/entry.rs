/// Mood entry model and the built-in fruit mood catalog.
///
/// Entries are immutable inputs to the aggregation functions: the builders
/// only ever read them, they never mutate or reorder the source list.
use chrono::{Local, NaiveDate, TimeZone};

/// A single logged mood.
///
/// `created_at` (unix milliseconds) is the sole ordering and windowing key.
/// `emoji`, `is_private` and `location` are presentation metadata and play
/// no role in aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodEntry {
    pub id: i64,
    pub mood_name: String,
    pub emotion: String,
    pub emoji: String,
    pub note: Option<String>,
    pub created_at: i64,
    pub is_private: bool,
    pub location: Option<String>,
}

impl MoodEntry {
    /// Calendar date of this entry in local time.
    ///
    /// Returns `None` for timestamps that do not resolve to a single local
    /// date; such entries are excluded from date-dependent aggregations
    /// instead of aborting the whole computation.
    pub fn local_date(&self) -> Option<NaiveDate> {
        local_date_of(self.created_at)
    }
}

/// Resolve a millisecond timestamp to a local calendar date, if possible.
pub fn local_date_of(ts_millis: i64) -> Option<NaiveDate> {
    match Local.timestamp_millis_opt(ts_millis) {
        chrono::LocalResult::Single(dt) => Some(dt.date_naive()),
        _ => None,
    }
}

/// One mood in the built-in catalog.
#[derive(Debug, Clone, Copy)]
pub struct MoodKind {
    pub name: &'static str,
    pub emotion: &'static str,
    pub emoji: &'static str,
}

/// The fruit mood catalog. Order here is the order shown in pickers.
pub const MOOD_CATALOG: &[MoodKind] = &[
    MoodKind {
        name: "Strawberry Bliss",
        emotion: "Happy",
        emoji: "🍓",
    },
    MoodKind {
        name: "Grape Expectations",
        emotion: "Excited",
        emoji: "🍇",
    },
    MoodKind {
        name: "Peachy Keen",
        emotion: "Calm",
        emoji: "🍑",
    },
    MoodKind {
        name: "Cherry Charged",
        emotion: "Energetic",
        emoji: "🍒",
    },
    MoodKind {
        name: "Mango Mellow",
        emotion: "Grateful",
        emoji: "🥭",
    },
    MoodKind {
        name: "Kiwi Curious",
        emotion: "Curious",
        emoji: "🥝",
    },
    MoodKind {
        name: "Blueberry Blues",
        emotion: "Sad",
        emoji: "🫐",
    },
    MoodKind {
        name: "Sour Lemon",
        emotion: "Stressed",
        emoji: "🍋",
    },
    MoodKind {
        name: "Watermelon Wobble",
        emotion: "Anxious",
        emoji: "🍉",
    },
    MoodKind {
        name: "Banana Drama",
        emotion: "Angry",
        emoji: "🍌",
    },
    MoodKind {
        name: "Coconut Cocoon",
        emotion: "Lonely",
        emoji: "🥥",
    },
    MoodKind {
        name: "Melon Meh",
        emotion: "Tired",
        emoji: "🍈",
    },
];

/// Look up a catalog mood by display label, case-insensitively.
pub fn find_mood(name: &str) -> Option<&'static MoodKind> {
    let wanted = name.trim();
    MOOD_CATALOG
        .iter()
        .find(|kind| kind.name.eq_ignore_ascii_case(wanted))
}

/// Emotion categories counted as positive (+1) in the weekly trend.
pub const POSITIVE_EMOTIONS: &[&str] = &["Happy", "Excited", "Calm", "Energetic", "Grateful"];

/// Emotion categories counted as negative (−1) in the weekly trend.
pub const NEGATIVE_EMOTIONS: &[&str] = &["Sad", "Stressed", "Anxious", "Angry", "Lonely", "Tired"];

/// Sentiment bucket of an emotion category.
///
/// Used only by the weekly trend. Days without an entry are represented as
/// `Option::<Sentiment>::None` by the trend builder, never as a score of 0,
/// so a logged neutral day and a missing day stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Classify an emotion category. Unrecognized categories are neutral.
    pub fn of_emotion(emotion: &str) -> Self {
        if POSITIVE_EMOTIONS
            .iter()
            .any(|e| e.eq_ignore_ascii_case(emotion))
        {
            Sentiment::Positive
        } else if NEGATIVE_EMOTIONS
            .iter()
            .any(|e| e.eq_ignore_ascii_case(emotion))
        {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Numeric score used by the trend line.
    pub fn score(self) -> i8 {
        match self {
            Sentiment::Positive => 1,
            Sentiment::Neutral => 0,
            Sentiment::Negative => -1,
        }
    }
}
