use super::engine::Ending;
use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    text::{Line, Span},
    widgets::{Block, Clear, Widget},
};

/// A widget for displaying a pop-up while the game is paused
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Paused;

impl Paused {
    pub(super) const SIZE: Size = Size {
        width: 20,
        height: 4,
    };
}

impl Widget for Paused {
    /*
     * ┌───── PAUSED ─────┐
     * │ Resume (p/space) │
     * │     Quit (q)     │
     * └──────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        render_popup(
            " PAUSED ",
            [key_line("Resume", &["p", "space"]), key_line("Quit", &["q"])],
            area,
            buf,
        );
    }
}

/// A widget for displaying the final score once a round has ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct GameOver {
    pub(super) score: u32,
    pub(super) ending: Ending,
}

impl GameOver {
    pub(super) const SIZE: Size = Size {
        width: 20,
        height: 5,
    };
}

impl Widget for GameOver {
    /*
     * ┌─── GAME OVER ────┐
     * │     Score: 3     │
     * │  Play again (r)  │
     * │     Quit (q)     │
     * └──────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.ending {
            Ending::Wall | Ending::SelfCollision => " GAME OVER ",
            Ending::BoardFull => " BOARD FULL ",
        };
        render_popup(
            title,
            [
                Line::from(format!("Score: {}", self.score)),
                key_line("Play again", &["r"]),
                key_line("Quit", &["q"]),
            ],
            area,
            buf,
        );
    }
}

fn render_popup<const N: usize>(
    title: &'static str,
    lines: [Line<'static>; N],
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::bordered()
        .title(title)
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    Clear.render(area, buf);
    block.render(area, buf);
    for (line, row) in lines.into_iter().zip(inner.rows()) {
        line.centered().render(row, buf);
    }
}

/// Render `label (key1/key2/...)` with the keys highlighted
fn key_line(label: &'static str, keys: &[&'static str]) -> Line<'static> {
    let mut spans = vec![Span::raw(label), Span::raw(" (")];
    for (i, &key) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("/"));
        }
        spans.push(Span::styled(key, consts::KEY_STYLE));
    }
    spans.push(Span::raw(")"));
    Line::from(spans)
}
