//! Results Reveal Sequencer
//!
//! Drives the results screen through its ordered steps:
//!
//! 1. Bars start at random heights with their values hidden
//! 2. A fixed suspense countdown runs, jittering every bar on each tick
//! 3. At expiry the real tally is computed and the bars settle on it
//! 4. The winner is flagged and the celebration fires exactly once
//!
//! The sequencer is independent of any timer or rendering surface. Callers
//! either feed it timestamps through [`RevealSequencer::tick`] or hand it a
//! [`Clock`] and let [`RevealSequencer::run`] drive the whole sequence.

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tally::Tally;
use crate::model::Chapter;

/// Status line while the countdown runs
pub const SUSPENSE_STATUS: &str = "Mostrando animación…";

/// Status line once the results are showing
pub const FINAL_STATUS: &str = "Resultados finales";

/// Bar label while values are hidden
pub const HIDDEN_LABEL: &str = "?";

/// Accessible label of a bar while values are hidden
pub fn hidden_aria_label(name: &str) -> String {
    format!("{}, votos: desconocido durante animación", name)
}

/// Timing and geometry of the reveal animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Length of the suspense countdown
    #[serde(default = "default_suspense_ms")]
    pub suspense_ms: u64,

    /// Delay between animation ticks
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Height of the tallest bar
    #[serde(default = "default_max_bar_px")]
    pub max_bar_px: u32,

    /// Jittered bars never drop below this height
    #[serde(default = "default_jitter_floor_px")]
    pub jitter_floor_px: u32,

    /// Largest height change per tick, in either direction
    #[serde(default = "default_jitter_px")]
    pub jitter_px: u32,

    /// Lower bound of the random starting height
    #[serde(default = "default_start_min_px")]
    pub start_min_px: u32,

    /// Upper bound of the random starting height
    #[serde(default = "default_start_max_px")]
    pub start_max_px: u32,
}

fn default_suspense_ms() -> u64 {
    10_000 // 10 seconds
}

fn default_tick_ms() -> u64 {
    180
}

fn default_max_bar_px() -> u32 {
    280
}

fn default_jitter_floor_px() -> u32 {
    30
}

fn default_jitter_px() -> u32 {
    30
}

fn default_start_min_px() -> u32 {
    40
}

fn default_start_max_px() -> u32 {
    120
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            suspense_ms: default_suspense_ms(),
            tick_ms: default_tick_ms(),
            max_bar_px: default_max_bar_px(),
            jitter_floor_px: default_jitter_floor_px(),
            jitter_px: default_jitter_px(),
            start_min_px: default_start_min_px(),
            start_max_px: default_start_max_px(),
        }
    }
}

/// Fraction of the countdown that has elapsed, clamped to `[0, 1]`
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Whole seconds left on the countdown display
pub fn countdown_secs(progress: f64, duration_ms: u64) -> u64 {
    let duration_secs = duration_ms as f64 / 1000.0;
    ((1.0 - progress.clamp(0.0, 1.0)) * duration_secs).ceil() as u64
}

/// Apply a jitter delta to a bar height, keeping it inside `[floor, ceil]`
pub fn jitter_height(height: u32, delta: i64, floor: u32, ceil: u32) -> u32 {
    let next = height as i64 + delta;
    next.min(ceil as i64).max(floor as i64) as u32
}

/// Time source for [`RevealSequencer::run`]
#[async_trait(?Send)]
pub trait Clock {
    /// Milliseconds on a monotonic timeline
    fn now_ms(&self) -> f64;

    /// Yield to the event loop for roughly `ms` milliseconds
    async fn sleep_ms(&self, ms: u64);
}

/// Where the sequence currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Countdown running, values hidden
    Suspense,
    /// Real results are showing
    Revealed,
}

/// One animation tick of the suspense countdown
#[derive(Debug, Clone, PartialEq)]
pub struct SuspenseFrame {
    pub progress: f64,
    pub remaining_secs: u64,
    /// Current bar heights, one per chapter, in input order
    pub heights: Vec<u32>,
    pub finished: bool,
}

impl SuspenseFrame {
    /// Countdown text, e.g. "7s"
    pub fn countdown_text(&self) -> String {
        format!("{}s", self.remaining_secs)
    }

    /// Progress bar width in percent
    pub fn progress_pct(&self) -> f64 {
        (self.progress * 100.0).min(100.0)
    }
}

/// Sequences the suspense countdown and the final reveal
pub struct RevealSequencer<R> {
    chapters: Vec<Chapter>,
    config: RevealConfig,
    heights: Vec<u32>,
    rng: R,
    started_at: Option<f64>,
    phase: RevealPhase,
    celebration_pending: bool,
}

impl<R: Rng> RevealSequencer<R> {
    /// Create a sequencer; every bar gets a random starting height
    pub fn new(chapters: Vec<Chapter>, config: RevealConfig, mut rng: R) -> Self {
        let low = config.start_min_px.min(config.start_max_px);
        let high = config.start_min_px.max(config.start_max_px);
        let heights = chapters.iter().map(|_| rng.gen_range(low..=high)).collect();

        Self {
            chapters,
            config,
            heights,
            rng,
            started_at: None,
            phase: RevealPhase::Suspense,
            celebration_pending: false,
        }
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Advance the countdown to `now_ms`. The first call starts the clock.
    pub fn tick(&mut self, now_ms: f64) -> SuspenseFrame {
        let started_at = *self.started_at.get_or_insert(now_ms);
        let progress = progress(now_ms - started_at, self.config.suspense_ms as f64);
        let finished = progress >= 1.0;

        if !finished {
            self.jitter();
        }

        let frame = SuspenseFrame {
            progress,
            remaining_secs: countdown_secs(progress, self.config.suspense_ms),
            heights: self.heights.clone(),
            finished,
        };
        tracing::debug!(
            progress = frame.progress,
            remaining_secs = frame.remaining_secs,
            "suspense tick"
        );
        frame
    }

    fn jitter(&mut self) {
        let spread = self.config.jitter_px as i64;
        let floor = self.config.jitter_floor_px;
        let ceil = self.config.max_bar_px;
        for height in self.heights.iter_mut() {
            let delta = self.rng.gen_range(-spread..=spread);
            *height = jitter_height(*height, delta, floor, ceil);
        }
    }

    /// Compute the real results and switch to the revealed phase.
    ///
    /// The celebration is armed only on the first reveal with a winner.
    pub fn reveal(&mut self) -> Tally {
        let tally = Tally::compute(&self.chapters, self.config.max_bar_px);
        self.heights = tally.standings.iter().map(|s| s.bar_height_px).collect();

        if self.phase == RevealPhase::Suspense {
            self.celebration_pending = tally.winner.is_some();
            if let Some(winner) = tally.winner() {
                tracing::info!(
                    winner = %winner.name,
                    votes = winner.votes,
                    total = tally.total,
                    "results revealed"
                );
            }
        }
        self.phase = RevealPhase::Revealed;
        tally
    }

    /// Returns true exactly once after a reveal that produced a winner
    pub fn take_celebration(&mut self) -> bool {
        std::mem::take(&mut self.celebration_pending)
    }

    /// Run the countdown to completion on `clock`, calling `on_frame` for
    /// every tick, then reveal.
    pub async fn run<C, F>(&mut self, clock: &C, mut on_frame: F) -> Tally
    where
        C: Clock + ?Sized,
        F: FnMut(&SuspenseFrame),
    {
        loop {
            let frame = self.tick(clock.now_ms());
            on_frame(&frame);
            if frame.finished {
                break;
            }
            clock.sleep_ms(self.config.tick_ms).await;
        }
        self.reveal()
    }
}

/// Wall clock backed by the tokio timer
#[cfg(feature = "native")]
pub struct TokioClock {
    origin: std::time::Instant,
}

#[cfg(feature = "native")]
impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "native")]
impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "native")]
#[async_trait(?Send)]
impl Clock for TokioClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    async fn sleep_ms(&self, ms: u64) {
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    /// Clock that jumps forward by exactly the requested sleep
    struct ManualClock {
        now: Cell<f64>,
        sleeps: Cell<u32>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Cell::new(0.0),
                sleeps: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl Clock for ManualClock {
        fn now_ms(&self) -> f64 {
            self.now.get()
        }

        async fn sleep_ms(&self, ms: u64) {
            self.now.set(self.now.get() + ms as f64);
            self.sleeps.set(self.sleeps.get() + 1);
        }
    }

    fn sample() -> Vec<Chapter> {
        vec![
            Chapter::new(1_i64, "Uno", 4),
            Chapter::new(2_i64, "Dos", 12),
            Chapter::new(3_i64, "Tres", 12),
        ]
    }

    fn sequencer(config: RevealConfig) -> RevealSequencer<StdRng> {
        RevealSequencer::new(sample(), config, StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(progress(-5.0, 1000.0), 0.0);
        assert_eq!(progress(500.0, 1000.0), 0.5);
        assert_eq!(progress(2500.0, 1000.0), 1.0);
        assert_eq!(progress(0.0, 0.0), 1.0);
    }

    #[test]
    fn test_countdown_secs() {
        assert_eq!(countdown_secs(0.0, 10_000), 10);
        assert_eq!(countdown_secs(0.05, 10_000), 10);
        assert_eq!(countdown_secs(0.5, 10_000), 5);
        assert_eq!(countdown_secs(0.99, 10_000), 1);
        assert_eq!(countdown_secs(1.0, 10_000), 0);
    }

    #[test]
    fn test_jitter_height_bounds() {
        assert_eq!(jitter_height(40, -30, 30, 280), 30);
        assert_eq!(jitter_height(270, 30, 30, 280), 280);
        assert_eq!(jitter_height(100, 12, 30, 280), 112);
    }

    #[test]
    fn test_start_heights_in_range() {
        let seq = sequencer(RevealConfig::default());
        assert_eq!(seq.heights().len(), 3);
        assert!(seq.heights().iter().all(|h| (40..=120).contains(h)));
        assert_eq!(seq.phase(), RevealPhase::Suspense);
    }

    #[test]
    fn test_ticks_keep_heights_in_bounds() {
        let mut seq = sequencer(RevealConfig::default());
        for step in 0..200 {
            let frame = seq.tick(step as f64 * 50.0);
            assert!(frame.heights.iter().all(|h| (30..=280).contains(h)));
        }
    }

    #[test]
    fn test_final_tick_reports_completion() {
        let mut seq = sequencer(RevealConfig::default());
        let first = seq.tick(1_000.0);
        assert_eq!(first.progress, 0.0);
        assert_eq!(first.countdown_text(), "10s");
        assert!(!first.finished);

        let heights_before = seq.heights().to_vec();
        let last = seq.tick(11_000.0);
        assert!(last.finished);
        assert_eq!(last.progress_pct(), 100.0);
        assert_eq!(last.countdown_text(), "0s");
        // no jitter on the closing frame
        assert_eq!(last.heights, heights_before);
    }

    #[test]
    fn test_reveal_sets_final_heights_and_winner() {
        let mut seq = sequencer(RevealConfig::default());
        let tally = seq.reveal();

        assert_eq!(seq.phase(), RevealPhase::Revealed);
        assert_eq!(tally.total, 28);
        // tie between "Dos" and "Tres" resolves to the first
        assert_eq!(tally.winner, Some(1));
        assert_eq!(seq.heights(), &[93, 280, 280]);
    }

    #[test]
    fn test_celebration_fires_once() {
        let mut seq = sequencer(RevealConfig::default());
        assert!(!seq.take_celebration());

        seq.reveal();
        assert!(seq.take_celebration());
        assert!(!seq.take_celebration());

        // revealing again does not re-arm it
        seq.reveal();
        assert!(!seq.take_celebration());
    }

    #[test]
    fn test_no_celebration_without_candidates() {
        let mut seq = RevealSequencer::new(Vec::new(), RevealConfig::default(), StdRng::seed_from_u64(1));
        seq.reveal();
        assert!(!seq.take_celebration());
    }

    #[tokio::test]
    async fn test_run_drives_full_countdown() {
        let config = RevealConfig {
            suspense_ms: 1_000,
            tick_ms: 100,
            ..RevealConfig::default()
        };
        let mut seq = sequencer(config);
        let clock = ManualClock::new();
        let mut frames = Vec::new();

        let tally = seq.run(&clock, |frame| frames.push(frame.clone())).await;

        // ticks at 0, 100, ..., 1000 ms
        assert_eq!(frames.len(), 11);
        assert_eq!(clock.sleeps.get(), 10);
        assert!(frames.last().unwrap().finished);
        assert!(frames[..10].iter().all(|f| !f.finished));
        assert!(frames.windows(2).all(|w| w[0].progress <= w[1].progress));
        assert_eq!(tally.winner, Some(1));
        assert_eq!(seq.phase(), RevealPhase::Revealed);
    }

    #[tokio::test]
    async fn test_run_with_zero_suspense() {
        let config = RevealConfig {
            suspense_ms: 0,
            ..RevealConfig::default()
        };
        let mut seq = sequencer(config);
        let clock = ManualClock::new();
        let mut count = 0;

        seq.run(&clock, |_| count += 1).await;

        assert_eq!(count, 1);
        assert_eq!(clock.sleeps.get(), 0);
    }

    #[test]
    fn test_config_defaults_from_empty_table() {
        let config: RevealConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RevealConfig::default());
        assert_eq!(config.suspense_ms, 10_000);
        assert_eq!(config.tick_ms, 180);
    }
}
