//! Results tally
//!
//! Turns a snapshot of chapter vote counts into what the final chart shows:
//! proportional bar heights, vote percentages and the winner.

use serde::Serialize;

use crate::model::{Chapter, ChapterId};

/// Bars never shrink below this height once revealed, so zero-vote
/// candidates stay visible
pub const MIN_BAR_PX: u32 = 8;

/// Final standing of one candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub id: ChapterId,
    pub name: String,
    pub votes: u64,
    pub image_url: String,
    /// Share of all votes, 0-100, unrounded
    pub percentage: f64,
    pub bar_height_px: u32,
}

impl Standing {
    /// Percentage with one decimal, e.g. "37.5%"
    pub fn percentage_text(&self) -> String {
        format!("{:.1}%", self.percentage)
    }

    /// Text shown on the bar after the reveal
    pub fn label(&self) -> String {
        format!("{} ({:.1}%)", self.votes, self.percentage)
    }

    pub fn aria_label(&self) -> String {
        format!("{}, votos: {}, {:.1}%", self.name, self.votes, self.percentage)
    }
}

/// Computed results for a set of chapters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub total: u64,
    pub max_votes: u64,
    /// One standing per input chapter, in input order
    pub standings: Vec<Standing>,
    /// Index into `standings` of the winner
    pub winner: Option<usize>,
}

impl Tally {
    /// Compute the tally. Bar heights are scaled so the leader reaches
    /// `max_bar_px`.
    pub fn compute(chapters: &[Chapter], max_bar_px: u32) -> Self {
        // counts can be as large as u64::MAX; the divisor is summed in f64
        // so percentages still add up to 100
        let total = chapters
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.votes));
        let max_votes = chapters.iter().map(|c| c.votes).max().unwrap_or(0).max(1);
        let divisor = chapters
            .iter()
            .map(|c| c.votes as f64)
            .sum::<f64>()
            .max(1.0);

        let standings = chapters
            .iter()
            .map(|chapter| {
                let ratio = chapter.votes as f64 / max_votes as f64;
                let height = (ratio * max_bar_px as f64).round() as u32;

                Standing {
                    id: chapter.id.clone(),
                    name: chapter.name.clone(),
                    votes: chapter.votes,
                    image_url: chapter.image_url.clone(),
                    percentage: chapter.votes as f64 / divisor * 100.0,
                    bar_height_px: height.max(MIN_BAR_PX),
                }
            })
            .collect();

        Self {
            total,
            max_votes,
            standings,
            winner: winner_index(chapters),
        }
    }

    pub fn winner(&self) -> Option<&Standing> {
        self.winner.and_then(|idx| self.standings.get(idx))
    }

    pub fn is_winner(&self, index: usize) -> bool {
        self.winner == Some(index)
    }
}

/// Index of the chapter with strictly the most votes. On a tie the first one
/// in input order wins.
pub fn winner_index(chapters: &[Chapter]) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for (idx, chapter) in chapters.iter().enumerate() {
        match best {
            Some((_, votes)) if chapter.votes <= votes => {}
            _ => best = Some((idx, chapter.votes)),
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapters(votes: &[u64]) -> Vec<Chapter> {
        votes
            .iter()
            .enumerate()
            .map(|(i, v)| Chapter::new(i as i64 + 1, format!("Capítulo {}", i + 1), *v))
            .collect()
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        for votes in [vec![1, 1, 1], vec![7, 0, 3, 11], vec![1, 2, 3, 4, 5, 6], vec![999_999, 1]] {
            let tally = Tally::compute(&chapters(&votes), 280);
            let sum: f64 = tally.standings.iter().map(|s| s.percentage).sum();
            assert!((sum - 100.0).abs() < 1e-9, "sum was {} for {:?}", sum, votes);
        }
    }

    #[test]
    fn test_zero_votes_do_not_divide_by_zero() {
        let tally = Tally::compute(&chapters(&[0, 0, 0]), 280);

        assert_eq!(tally.total, 0);
        assert_eq!(tally.max_votes, 1);
        for standing in &tally.standings {
            assert_eq!(standing.percentage, 0.0);
            assert_eq!(standing.bar_height_px, MIN_BAR_PX);
            assert_eq!(standing.label(), "0 (0.0%)");
        }
    }

    #[test]
    fn test_empty_input() {
        let tally = Tally::compute(&[], 280);
        assert!(tally.standings.is_empty());
        assert_eq!(tally.winner, None);
        assert!(tally.winner().is_none());
    }

    #[test]
    fn test_bar_heights_are_proportional() {
        let tally = Tally::compute(&chapters(&[10, 5, 1]), 280);
        let heights: Vec<u32> = tally.standings.iter().map(|s| s.bar_height_px).collect();
        // 1/10 * 280 = 28
        assert_eq!(heights, vec![280, 140, 28]);
    }

    #[test]
    fn test_small_share_gets_minimum_height() {
        let tally = Tally::compute(&chapters(&[1000, 1]), 280);
        assert_eq!(tally.standings[1].bar_height_px, MIN_BAR_PX);
    }

    #[test]
    fn test_winner_is_strict_maximum() {
        let tally = Tally::compute(&chapters(&[3, 9, 4]), 280);
        assert_eq!(tally.winner, Some(1));
        assert_eq!(tally.winner().unwrap().votes, 9);
        assert!(tally.is_winner(1));
        assert!(!tally.is_winner(0));
    }

    #[test]
    fn test_tie_goes_to_first_in_input_order() {
        assert_eq!(winner_index(&chapters(&[2, 5, 5, 1])), Some(1));
        assert_eq!(winner_index(&chapters(&[0, 0])), Some(0));
    }

    #[test]
    fn test_labels() {
        let tally = Tally::compute(&chapters(&[1, 2]), 280);
        let second = &tally.standings[1];
        assert_eq!(second.percentage_text(), "66.7%");
        assert_eq!(second.label(), "2 (66.7%)");
        assert_eq!(second.aria_label(), "Capítulo 2, votos: 2, 66.7%");
    }

    #[test]
    fn test_huge_vote_counts_do_not_overflow() {
        let chapters: Vec<Chapter> =
            serde_json::from_str(r#"[{"id":1,"votes":1e30},{"id":2,"votes":5},{"id":3,"votes":"1e30"}]"#)
                .unwrap();
        let tally = Tally::compute(&chapters, 280);

        assert_eq!(tally.total, u64::MAX);
        let sum: f64 = tally.standings.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-6);
        assert!(tally.standings.iter().all(|s| s.percentage.is_finite()));
        assert_eq!(tally.winner, Some(0));
        assert_eq!(tally.standings[0].bar_height_px, 280);
    }
}
