/// Scripted support bot.
///
/// Replies are canned and selected by a tagged intent classifier with an
/// explicit priority order; the first intent whose keyword table matches
/// wins, and crisis language always wins. There is no learning and no
/// conversation state between messages.
use anyhow::{Context, Result};
use chrono::Local;
use inquire::Text;
use is_terminal::IsTerminal;
use rand::seq::SliceRandom;

/// Recognized message intents, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Crisis,
    Breathing,
    Anxious,
    Sad,
    Angry,
    Lonely,
    Tired,
    Stressed,
    Grateful,
    Happy,
    Greeting,
    Farewell,
    Help,
    Fallback,
}

/// Classification order. Crisis must stay first; everything below it is
/// ordered from most to least specific.
const PRIORITY: &[Intent] = &[
    Intent::Crisis,
    Intent::Breathing,
    Intent::Anxious,
    Intent::Sad,
    Intent::Angry,
    Intent::Lonely,
    Intent::Tired,
    Intent::Stressed,
    Intent::Grateful,
    Intent::Happy,
    Intent::Greeting,
    Intent::Farewell,
    Intent::Help,
];

impl Intent {
    /// Keyword table for this intent. Single words match whole words;
    /// phrases match as substrings.
    fn keywords(self) -> &'static [&'static str] {
        match self {
            Intent::Crisis => &[
                "suicide",
                "suicidal",
                "kill myself",
                "end it all",
                "self harm",
                "hurt myself",
                "don't want to live",
                "dont want to live",
            ],
            Intent::Breathing => &[
                "breathe",
                "breathing",
                "panic attack",
                "panicking",
                "grounding",
                "calm down",
            ],
            Intent::Anxious => &["anxious", "anxiety", "worried", "worry", "nervous", "overwhelmed"],
            Intent::Sad => &["sad", "depressed", "crying", "miserable", "heartbroken", "grief"],
            Intent::Angry => &["angry", "furious", "frustrated", "annoyed", "livid"],
            Intent::Lonely => &["lonely", "alone", "isolated", "no one to talk"],
            Intent::Tired => &[
                "tired",
                "exhausted",
                "drained",
                "burnt out",
                "burned out",
                "can't sleep",
                "cant sleep",
                "insomnia",
            ],
            Intent::Stressed => &["stressed", "stress", "pressure", "too much", "deadline"],
            Intent::Grateful => &["grateful", "thankful", "gratitude", "appreciate"],
            Intent::Happy => &["happy", "excited", "wonderful", "amazing", "good news"],
            Intent::Greeting => &["hello", "hi", "hey", "good morning", "good evening"],
            Intent::Farewell => &["bye", "goodbye", "good night", "see you", "talk later"],
            Intent::Help => &["help", "what can you do", "how does this work"],
            Intent::Fallback => &[],
        }
    }

    /// Classify a message. The first intent in priority order with a
    /// matching keyword wins; unmatched text is `Fallback`.
    pub fn classify(message: &str) -> Intent {
        let lowered = message.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .collect();

        for intent in PRIORITY {
            let hit = intent.keywords().iter().any(|keyword| {
                if keyword.contains(' ') {
                    lowered.contains(keyword)
                } else {
                    words.contains(keyword)
                }
            });
            if hit {
                return *intent;
            }
        }
        Intent::Fallback
    }

    fn responses(self) -> &'static [&'static str] {
        match self {
            Intent::Crisis => &[
                "I'm really glad you told me. What you're feeling matters, and you don't have to carry it alone. Please reach out to someone right now — a crisis line (988 in the US), a local emergency number, or someone you trust. I'm only a small journal bot, and you deserve real support.",
            ],
            Intent::Breathing => &[
                "Let's slow things down together. Try `slurp breathe` for a guided box-breathing round: in for 4, hold for 4, out for 4, hold for 4.",
                "When everything races, your breath is the one dial you can reach. `slurp breathe --pattern 478` walks you through a calming 4-7-8 cycle.",
            ],
            Intent::Anxious => &[
                "Anxiety has a way of shouting about things that haven't happened yet. What's the one worry taking up the most room right now?",
                "That sounds really uncomfortable. Sometimes naming the worry out loud shrinks it a little — want to write it down as a journal entry?",
            ],
            Intent::Sad => &[
                "I'm sorry it's heavy today. You don't have to fix the feeling — just letting it exist here is enough.",
                "Thank you for saying it instead of holding it in. Would logging a Blueberry Blues entry help you keep track of how often this visits?",
            ],
            Intent::Angry => &[
                "Anger usually guards something that matters to you. What got stepped on?",
                "That sounds genuinely frustrating. Do you want to vent a bit more before deciding what to do about it?",
            ],
            Intent::Lonely => &[
                "Feeling alone is one of the hardest ones. Is there one person — even someone you haven't talked to in a while — you could send a small message to today?",
                "I'm here, for what a fruit bot is worth. Loneliness lies about being permanent; it isn't.",
            ],
            Intent::Tired => &[
                "Rest is productive too, even when your to-do list disagrees. What would putting one thing down look like today?",
                "Running on empty makes every feeling louder. Be gentle with yourself tonight.",
            ],
            Intent::Stressed => &[
                "That's a lot of weight to carry at once. What's the single smallest piece you could finish or drop?",
                "Stress shrinks when it's written down. Want to split it into a journal entry and see how big it really is?",
            ],
            Intent::Grateful => &[
                "That's lovely to hear. `slurp journal add --gratitude` will tuck it away so future-you can find it on a harder day.",
                "Gratitude logged in the heart — want to log it in the journal too?",
            ],
            Intent::Happy => &[
                "That's wonderful! Days like this are worth recording — a Strawberry Bliss entry would remember it for you.",
                "Love that. Savor it a moment longer before the next thing.",
            ],
            Intent::Greeting => &[
                "Hey there! How is today treating you?",
                "Hello! I'm listening — what's on your mind?",
            ],
            Intent::Farewell => &[
                "Take care of yourself. I'll be here when you want to check in again.",
                "Goodbye for now — be kind to yourself out there.",
            ],
            Intent::Help => &[
                "I'm a small scripted companion: tell me how you feel and I'll respond, point you to breathing exercises, or nudge you toward the journal. Try `slurp log` to record a mood or `slurp insights` to see your patterns.",
            ],
            Intent::Fallback => &[
                "I hear you. Tell me a bit more about how that feels?",
                "I'm not sure I fully followed, but I'm listening. What's underneath that?",
                "Mm. And how are you feeling about it right now?",
            ],
        }
    }
}

/// A bot reply: response text plus an RFC 3339 timestamp.
#[derive(Debug, Clone)]
pub struct BotReply {
    pub response: String,
    pub timestamp: String,
}

/// Produce a reply for one message.
pub fn reply(message: &str) -> BotReply {
    let intent = Intent::classify(message);
    let pool = intent.responses();
    let response = pool
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("I'm listening.")
        .to_string();

    BotReply {
        response,
        timestamp: Local::now().to_rfc3339(),
    }
}

/// Run the chat command: one-shot with `--message`, otherwise a REPL.
pub fn run(message: Option<String>) -> Result<()> {
    if let Some(message) = message {
        let reply = reply(&message);
        println!("{}", reply.response);
        return Ok(());
    }

    if !std::io::stdin().is_terminal() {
        anyhow::bail!("Interactive chat needs a terminal; use --message <text> instead");
    }

    println!("🍇 Slurp support bot. Type how you're feeling; 'bye' to leave.");
    loop {
        let line = Text::new("you:").prompt().context("Chat input cancelled")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let intent = Intent::classify(trimmed);
        let reply = reply(trimmed);
        println!("bot: {}", reply.response);
        tracing::info!(intent = ?intent, "chat exchange");

        if intent == Intent::Farewell {
            break;
        }
    }
    Ok(())
}
