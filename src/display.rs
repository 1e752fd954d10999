//! Terminal rendering for boards and game status.
//!
//! Cells show their tile-set label; ranks past the end of the set fall back
//! to the classic 2048 value.

use std::fmt::Write as _;

use crate::engine::{Board, Rank, SIZE};
use crate::game::Status;
use crate::tiles::TileSet;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[91m";
pub const GREEN: &str = "\x1b[92m";

const PALETTE: [&str; 6] = [
    "\x1b[37m", "\x1b[96m", "\x1b[94m", "\x1b[95m", "\x1b[93m", "\x1b[92m",
];

const CELL_WIDTH: usize = 12;

const KEY_HINT: &str = "wasd / hjkl / arrows to move, r restart, ? help, q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Ansi,
    Plain,
}

impl Style {
    fn paint(self, code: &str, text: &str) -> String {
        match self {
            Style::Ansi => format!("{code}{text}{RESET}"),
            Style::Plain => text.to_string(),
        }
    }
}

pub fn rank_color(rank: Rank) -> &'static str {
    PALETTE[rank as usize % PALETTE.len()]
}

/// Render a board as a grid of labelled cells.
pub fn render_board(board: &Board, tiles: &TileSet, style: Style) -> String {
    let border = format!("+{}+", vec!["-".repeat(CELL_WIDTH); SIZE].join("+"));
    let mut out = String::new();
    let _ = writeln!(out, "{border}");
    for row in board.rows() {
        out.push('|');
        for cell in row {
            let text = match cell {
                Some(rank) => {
                    let label = truncate(&tiles.label(*rank), CELL_WIDTH);
                    let centered = format!("{:^width$}", label, width = CELL_WIDTH);
                    style.paint(rank_color(*rank), &centered)
                }
                None => " ".repeat(CELL_WIDTH),
            };
            out.push_str(&text);
            out.push('|');
        }
        out.push('\n');
        let _ = writeln!(out, "{border}");
    }
    out
}

/// Banner for a terminal state, if any.
pub fn banner(status: Status, tiles: &TileSet, style: Style) -> Option<String> {
    match status {
        Status::Playing => None,
        Status::Lost => Some(style.paint(&format!("{BOLD}{RED}"), "Game Over!")),
        Status::Won => {
            let label = tiles.label(tiles.winning_rank());
            let text = format!("You built the {label}!");
            let headline = style.paint(&format!("{BOLD}{GREEN}"), &text);
            Some(format!("{headline} Press c to keep playing."))
        }
    }
}

/// Full screen: title, board, banner and key hints.
pub fn render_screen(board: &Board, status: Status, tiles: &TileSet, style: Style) -> String {
    let mut out = String::new();
    let title = format!("2048: {}", tiles.name());
    let _ = writeln!(out, "{}", style.paint(BOLD, &title));
    out.push_str(&render_board(board, tiles, style));
    if let Some(text) = banner(status, tiles, style) {
        let _ = writeln!(out, "{text}");
    }
    let _ = writeln!(out, "{}", style.paint(DIM, KEY_HINT));
    out
}

pub fn help_text() -> &'static str {
    "Commands:\n  \
     w/k/up, s/j/down, a/h/left, d/l/right   move\n  \
     r                                       start a new board\n  \
     c                                       dismiss the win banner\n  \
     q, esc, ctrl-c                          leave the game"
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
