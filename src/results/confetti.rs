//! Confetti bursts
//!
//! Randomised piece specs for the two celebrations: the glow and confetti
//! on a freshly voted pack, and the bigger burst over the winning bar.
//! Rendering is up to the caller; each piece knows its own inline CSS.

use rand::Rng;

/// Colours used when a vote is accepted
pub const VOTE_PALETTE: [&str; 5] = ["#0A67FF", "#00AEEF", "#8FD4FF", "#ffffff", "#1B84FF"];

/// Colours used over the winning bar
pub const WINNER_PALETTE: [&str; 5] = ["#0A67FF", "#00AEEF", "#8FD4FF", "#ffffff", "#fbc02d"];

/// Which celebration a burst belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfettiStyle {
    Vote,
    Winner,
}

impl ConfettiStyle {
    pub fn piece_count(self) -> usize {
        match self {
            ConfettiStyle::Vote => 36,
            ConfettiStyle::Winner => 42,
        }
    }

    pub fn palette(self) -> &'static [&'static str] {
        match self {
            ConfettiStyle::Vote => &VOTE_PALETTE,
            ConfettiStyle::Winner => &WINNER_PALETTE,
        }
    }

    /// Random spread added to the 1.2 s base fall duration
    fn duration_spread(self) -> f64 {
        match self {
            ConfettiStyle::Vote => 0.8,
            ConfettiStyle::Winner => 0.9,
        }
    }

    /// How long the pieces stay in place before they are removed
    pub fn cleanup_ms(self) -> u32 {
        match self {
            ConfettiStyle::Vote => 2200,
            ConfettiStyle::Winner => 2400,
        }
    }

    /// Vote celebrations also light up the card
    pub fn has_glow(self) -> bool {
        matches!(self, ConfettiStyle::Vote)
    }
}

/// A single confetti piece
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    pub width_px: f64,
    pub height_px: f64,
    pub color: &'static str,
    /// Horizontal start position, percent of the container
    pub left_pct: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    /// Horizontal drift while falling, percent
    pub drift_pct: f64,
    pub rotation_deg: f64,
}

impl ConfettiPiece {
    fn random<R: Rng + ?Sized>(style: ConfettiStyle, rng: &mut R) -> Self {
        let palette = style.palette();
        let size = rng.gen::<f64>() * 8.0 + 6.0;

        Self {
            width_px: size,
            height_px: size * 0.6,
            color: palette[rng.gen_range(0..palette.len())],
            left_pct: 50.0 + (rng.gen::<f64>() * 40.0 - 20.0),
            duration_s: 1.2 + rng.gen::<f64>() * style.duration_spread(),
            delay_s: rng.gen::<f64>() * 0.2,
            drift_pct: rng.gen::<f64>() * 220.0 - 110.0,
            rotation_deg: rng.gen::<f64>() * 600.0 - 300.0,
        }
    }

    /// Inline style; the fall keyframes read `--x` and `--r`
    pub fn css(&self) -> String {
        format!(
            "width:{:.2}px;height:{:.2}px;background:{};left:{:.2}%;\
             animation-duration:{:.3}s;animation-delay:{:.3}s;--x:{:.2}%;--r:{:.2}deg",
            self.width_px,
            self.height_px,
            self.color,
            self.left_pct,
            self.duration_s,
            self.delay_s,
            self.drift_pct,
            self.rotation_deg,
        )
    }
}

/// One celebration's worth of confetti
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiBurst {
    pub style: ConfettiStyle,
    pub pieces: Vec<ConfettiPiece>,
}

impl ConfettiBurst {
    pub fn generate<R: Rng + ?Sized>(style: ConfettiStyle, rng: &mut R) -> Self {
        let pieces = (0..style.piece_count())
            .map(|_| ConfettiPiece::random(style, rng))
            .collect();
        Self { style, pieces }
    }

    pub fn cleanup_ms(&self) -> u32 {
        self.style.cleanup_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_piece_counts() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(ConfettiBurst::generate(ConfettiStyle::Vote, &mut rng).pieces.len(), 36);
        assert_eq!(ConfettiBurst::generate(ConfettiStyle::Winner, &mut rng).pieces.len(), 42);
    }

    #[test]
    fn test_piece_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for style in [ConfettiStyle::Vote, ConfettiStyle::Winner] {
            let burst = ConfettiBurst::generate(style, &mut rng);
            for piece in &burst.pieces {
                assert!((6.0..14.0).contains(&piece.width_px));
                assert!((piece.height_px - piece.width_px * 0.6).abs() < 1e-9);
                assert!((30.0..70.0).contains(&piece.left_pct));
                assert!((1.2..2.1).contains(&piece.duration_s));
                assert!((0.0..0.2).contains(&piece.delay_s));
                assert!((-110.0..110.0).contains(&piece.drift_pct));
                assert!((-300.0..300.0).contains(&piece.rotation_deg));
                assert!(style.palette().contains(&piece.color));
            }
        }
    }

    #[test]
    fn test_vote_durations_stay_under_two_seconds() {
        let mut rng = StdRng::seed_from_u64(5);
        let burst = ConfettiBurst::generate(ConfettiStyle::Vote, &mut rng);
        assert!(burst.pieces.iter().all(|p| p.duration_s < 2.0));
    }

    #[test]
    fn test_cleanup_and_glow() {
        assert_eq!(ConfettiStyle::Vote.cleanup_ms(), 2200);
        assert_eq!(ConfettiStyle::Winner.cleanup_ms(), 2400);
        assert!(ConfettiStyle::Vote.has_glow());
        assert!(!ConfettiStyle::Winner.has_glow());
    }

    #[test]
    fn test_css_carries_custom_properties() {
        let mut rng = StdRng::seed_from_u64(1);
        let burst = ConfettiBurst::generate(ConfettiStyle::Winner, &mut rng);
        let css = burst.pieces[0].css();
        assert!(css.contains("--x:"));
        assert!(css.contains("--r:"));
        assert!(css.contains("animation-duration:"));
    }
}
