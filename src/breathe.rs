/// Breathing and grounding exercises.
///
/// Fixed phase sequences driven by a per-phase timer. On a TTY each phase
/// renders as a progress bar; otherwise phases print as plain lines so the
/// exercise still works when piped.
use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExercisePattern {
    /// 4-4-4-4 box breathing
    Box,
    /// 4-7-8 relaxing breath
    FourSevenEight,
    /// 5-4-3-2-1 sensory grounding walk
    Grounding,
}

impl ExercisePattern {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "box" => Ok(Self::Box),
            "478" => Ok(Self::FourSevenEight),
            "grounding" => Ok(Self::Grounding),
            _ => Err(anyhow!(
                "Unknown exercise: '{}'. Expected 'box', '478', or 'grounding'",
                s
            )),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Box => "Box breathing (4-4-4-4)",
            Self::FourSevenEight => "4-7-8 breathing",
            Self::Grounding => "5-4-3-2-1 grounding",
        }
    }

    /// Whether the cycle count applies. The grounding walk runs once.
    fn repeats(self) -> bool {
        !matches!(self, Self::Grounding)
    }
}

/// One timed step of an exercise.
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    pub prompt: &'static str,
    pub seconds: u64,
}

/// The fixed phase sequence for a pattern.
pub fn phases(pattern: ExercisePattern) -> &'static [Phase] {
    match pattern {
        ExercisePattern::Box => &[
            Phase { prompt: "Breathe in through your nose", seconds: 4 },
            Phase { prompt: "Hold", seconds: 4 },
            Phase { prompt: "Breathe out through your mouth", seconds: 4 },
            Phase { prompt: "Hold", seconds: 4 },
        ],
        ExercisePattern::FourSevenEight => &[
            Phase { prompt: "Breathe in through your nose", seconds: 4 },
            Phase { prompt: "Hold", seconds: 7 },
            Phase { prompt: "Breathe out slowly", seconds: 8 },
        ],
        ExercisePattern::Grounding => &[
            Phase { prompt: "Name 5 things you can see", seconds: 15 },
            Phase { prompt: "Name 4 things you can touch", seconds: 12 },
            Phase { prompt: "Name 3 things you can hear", seconds: 9 },
            Phase { prompt: "Name 2 things you can smell", seconds: 6 },
            Phase { prompt: "Name 1 thing you can taste", seconds: 3 },
        ],
    }
}

/// Run an exercise for the given number of cycles.
pub fn run(pattern: ExercisePattern, cycles: u32) -> Result<()> {
    let cycles = if pattern.repeats() { cycles.max(1) } else { 1 };
    let is_tty = std::io::stderr().is_terminal();

    eprintln!("🫐 {}", pattern.label());
    tracing::info!(pattern = pattern.label(), cycles, "exercise started");

    for cycle in 1..=cycles {
        if cycles > 1 {
            eprintln!("Cycle {}/{}", cycle, cycles);
        }
        for phase in phases(pattern) {
            run_phase(phase, is_tty);
        }
    }

    eprintln!("Done. Notice how you feel now.");
    Ok(())
}

fn run_phase(phase: &Phase, is_tty: bool) {
    if !is_tty {
        eprintln!("{} ({}s)", phase.prompt, phase.seconds);
        std::thread::sleep(Duration::from_secs(phase.seconds));
        return;
    }

    let bar = ProgressBar::new(phase.seconds);
    let style = ProgressStyle::default_bar()
        .template("  {msg:<34} [{bar:24.cyan/blue}] {pos}/{len}s")
        .unwrap()
        .progress_chars("█▓░");
    bar.set_style(style);
    bar.set_message(phase.prompt);

    for _ in 0..phase.seconds {
        std::thread::sleep(Duration::from_secs(1));
        bar.inc(1);
    }
    bar.finish_and_clear();
    eprintln!("  {} ✓", phase.prompt);
}
