use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::borrow::Cow;

/// A pop-up reporting a non-fatal error (and its chain of causes) to the
/// user.  The game does not advance while a warning is displayed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
}

impl Warning {
    const MAX_LINES: u16 = 12;
    const TEXT_WIDTH: u16 = 36;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    /// Handle a command.  Returns `Some` if the user dismissed the warning or
    /// asked to quit.
    pub(crate) fn handle_command(&self, cmd: Command) -> Option<WarningOutcome> {
        match cmd {
            Command::Enter => Some(WarningOutcome::Dismissed),
            Command::Quit => Some(WarningOutcome::Quit),
            _ => None,
        }
    }

    fn from_error_messages(msgs: Vec<String>) -> Self {
        let mut msgs = msgs.into_iter();
        let Some(first) = msgs.next() else {
            return Warning {
                lines: vec![String::from("Something went wrong.")],
            };
        };
        let mut lines = wrap(&first, textwrap::Options::new(usize::from(Warning::TEXT_WIDTH)));
        let causes = msgs.collect::<Vec<_>>();
        if !causes.is_empty() {
            lines.push(String::new());
            lines.push(String::from("Caused by:"));
        }
        if let [cause] = causes.as_slice() {
            let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
                .initial_indent("    ")
                .subsequent_indent("    ");
            lines.extend(wrap(cause, opts));
        } else {
            for (i, cause) in causes.iter().enumerate() {
                let init_indent = format!("{i:>5}: ");
                let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
                    .initial_indent(&init_indent)
                    .subsequent_indent("       ");
                lines.extend(wrap(cause, opts));
            }
        }
        Warning { lines }
    }
}

fn wrap(text: &str, opts: textwrap::Options<'_>) -> Vec<String> {
    textwrap::wrap(text, opts.break_words(true))
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl<E: std::error::Error> From<E> for Warning {
    fn from(e: E) -> Warning {
        let mut msgs = vec![e.to_string()];
        let mut source = e.source();
        while let Some(src) = source {
            msgs.push(src.to_string());
            source = src.source();
        }
        Warning::from_error_messages(msgs)
    }
}

impl Widget for &Warning {
    // `area` is here the area of the entire display in which the program is
    // drawing, not the area for just the widget proper.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .min(Warning::MAX_LINES)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH,
                height,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        let max_lines = usize::from(Warning::MAX_LINES);
        let mut text = Text::from_iter(self.lines.iter().take(max_lines).map(String::as_str));
        if self.lines.len() > max_lines {
            text.lines.truncate(max_lines - 1);
            text.lines.push(Line::from("…"));
        }
        text.render(text_area, buf);
        Line::from("[OK]").centered().render(ok_area, buf);
    }
}
