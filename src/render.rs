//! Terminal Rendering
//!
//! Draws the results reveal in a terminal: horizontal bars that jitter
//! during the countdown, then settle on the real tally with the winner
//! banner underneath. Each redraw moves the cursor back over the previous
//! frame instead of scrolling.

use crossterm::{
    cursor, queue,
    terminal::{self, ClearType},
};
use std::io::{self, Write};

use crate::model::Chapter;
use crate::results::{Standing, SuspenseFrame, Tally, FINAL_STATUS, HIDDEN_LABEL, SUSPENSE_STATUS};

/// Width of a full-height bar, in terminal cells
pub const BAR_COLUMNS: usize = 40;

/// Width of the countdown progress bar
const PROGRESS_COLUMNS: usize = 30;

/// Names longer than this are cut
const MAX_NAME_WIDTH: usize = 24;

/// Number of cells for a bar of `height_px`
pub fn bar_cells(height_px: u32, max_bar_px: u32, columns: usize) -> usize {
    if max_bar_px == 0 {
        return 0;
    }
    let ratio = (height_px as f64 / max_bar_px as f64).clamp(0.0, 1.0);
    (ratio * columns as f64).round() as usize
}

/// One chart row: padded name, bar, label
pub fn bar_line(name: &str, name_width: usize, cells: usize, label: &str) -> String {
    let name: String = name.chars().take(name_width).collect();
    format!(
        "{:<width$} │{} {}",
        name,
        "█".repeat(cells),
        label,
        width = name_width
    )
}

/// Countdown row, e.g. `[#######-------] 6s`
pub fn progress_line(frame: &SuspenseFrame) -> String {
    let filled = ((frame.progress_pct() / 100.0) * PROGRESS_COLUMNS as f64).round() as usize;
    let filled = filled.min(PROGRESS_COLUMNS);
    format!(
        "[{}{}] {}",
        "#".repeat(filled),
        "-".repeat(PROGRESS_COLUMNS - filled),
        frame.countdown_text()
    )
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_WIDTH)
}

/// Lines for one suspense frame
pub fn suspense_lines(chapters: &[Chapter], frame: &SuspenseFrame, max_bar_px: u32) -> Vec<String> {
    let width = name_width(chapters.iter().map(|c| c.name.as_str()));
    let mut lines = vec![SUSPENSE_STATUS.to_string(), progress_line(frame), String::new()];

    for (chapter, height) in chapters.iter().zip(&frame.heights) {
        let cells = bar_cells(*height, max_bar_px, BAR_COLUMNS);
        lines.push(bar_line(&chapter.name, width, cells, HIDDEN_LABEL));
    }
    lines
}

/// Lines for the final chart plus the winner banner
pub fn result_lines(tally: &Tally, max_bar_px: u32) -> Vec<String> {
    let width = name_width(tally.standings.iter().map(|s| s.name.as_str()));
    let mut lines = vec![FINAL_STATUS.to_string(), String::new()];

    for (idx, standing) in tally.standings.iter().enumerate() {
        let cells = bar_cells(standing.bar_height_px, max_bar_px, BAR_COLUMNS);
        let mut line = bar_line(&standing.name, width, cells, &standing.label());
        if tally.is_winner(idx) {
            line.push_str(" 🏆");
        }
        lines.push(line);
    }

    if let Some(winner) = tally.winner() {
        lines.push(String::new());
        lines.extend(winner_banner(winner));
    }
    lines
}

/// Winner announcement
pub fn winner_banner(winner: &Standing) -> Vec<String> {
    vec![
        format!("🎉 Ganador: {}", winner.name),
        format!("   Votos: {} ({})", winner.votes, winner.percentage_text()),
    ]
}

/// Redraws the reveal in place on a terminal
pub struct TerminalReveal<W: Write> {
    out: W,
    drawn: u16,
    max_bar_px: u32,
}

impl<W: Write> TerminalReveal<W> {
    pub fn new(out: W, max_bar_px: u32) -> Self {
        Self {
            out,
            drawn: 0,
            max_bar_px,
        }
    }

    pub fn draw_suspense(&mut self, chapters: &[Chapter], frame: &SuspenseFrame) -> io::Result<()> {
        let lines = suspense_lines(chapters, frame, self.max_bar_px);
        self.redraw(&lines)
    }

    pub fn draw_results(&mut self, tally: &Tally) -> io::Result<()> {
        let lines = result_lines(tally, self.max_bar_px);
        self.redraw(&lines)
    }

    fn redraw(&mut self, lines: &[String]) -> io::Result<()> {
        if self.drawn > 0 {
            queue!(
                self.out,
                cursor::MoveToPreviousLine(self.drawn),
                terminal::Clear(ClearType::FromCursorDown)
            )?;
        }
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        self.drawn = lines.len() as u16;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(progress: f64, heights: Vec<u32>) -> SuspenseFrame {
        SuspenseFrame {
            progress,
            remaining_secs: crate::results::countdown_secs(progress, 10_000),
            heights,
            finished: progress >= 1.0,
        }
    }

    #[test]
    fn test_bar_cells() {
        assert_eq!(bar_cells(280, 280, 40), 40);
        assert_eq!(bar_cells(140, 280, 40), 20);
        assert_eq!(bar_cells(999, 280, 40), 40);
        assert_eq!(bar_cells(10, 0, 40), 0);
    }

    #[test]
    fn test_bar_line_pads_and_truncates() {
        assert_eq!(bar_line("Uno", 5, 3, "?"), "Uno   │███ ?");
        assert_eq!(bar_line("Larguísimo", 4, 0, "1 (100.0%)"), "Larg │ 1 (100.0%)");
    }

    #[test]
    fn test_progress_line() {
        assert_eq!(
            progress_line(&frame(0.5, vec![])),
            format!("[{}{}] 5s", "#".repeat(15), "-".repeat(15))
        );
        assert!(progress_line(&frame(1.0, vec![])).ends_with("] 0s"));
    }

    #[test]
    fn test_suspense_hides_values() {
        let chapters = vec![Chapter::new(1_i64, "Uno", 30), Chapter::new(2_i64, "Dos", 10)];
        let lines = suspense_lines(&chapters, &frame(0.2, vec![100, 60]), 280);

        assert_eq!(lines[0], SUSPENSE_STATUS);
        assert!(lines[3].starts_with("Uno"));
        assert!(lines[3].ends_with(" ?"));
        assert!(!lines.iter().any(|l| l.contains("30")));
    }

    #[test]
    fn test_results_mark_winner() {
        let chapters = vec![Chapter::new(1_i64, "Uno", 1), Chapter::new(2_i64, "Dos", 3)];
        let tally = Tally::compute(&chapters, 280);
        let lines = result_lines(&tally, 280);

        assert_eq!(lines[0], FINAL_STATUS);
        assert!(lines[2].ends_with("1 (25.0%)"));
        assert!(lines[3].ends_with("3 (75.0%) 🏆"));
        assert!(lines.contains(&"🎉 Ganador: Dos".to_string()));
        assert!(lines.contains(&"   Votos: 3 (75.0%)".to_string()));
    }

    #[test]
    fn test_redraw_rewinds_previous_frame() {
        let chapters = vec![Chapter::new(1_i64, "Uno", 1)];
        let mut reveal = TerminalReveal::new(Vec::new(), 280);

        reveal.draw_suspense(&chapters, &frame(0.0, vec![50])).unwrap();
        let first_len = reveal.out.len();
        assert!(!reveal.out.contains(&0x1b));

        reveal.draw_suspense(&chapters, &frame(0.5, vec![70])).unwrap();
        let out = reveal.into_inner();
        // the second frame starts with an escape sequence moving the cursor up
        assert_eq!(out[first_len], 0x1b);
    }
}
