// File: src/tui/view.rs
use crate::model::Note;
use crate::store::NotePad;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};
use std::time::{Duration, Instant};

pub const DELETED_HEADER: &str = "Note has been deleted!! -";

/// Time left before the follow-up navigation leaves the deleted-note page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub remaining: Duration,
    pub total: Duration,
}

impl Countdown {
    pub fn new(total: Duration) -> Self {
        Self {
            remaining: total,
            total,
        }
    }

    /// Counts down to `deadline`, the moment the follow-up is due.
    pub fn until(deadline: Instant, total: Duration) -> Self {
        Self {
            remaining: deadline.saturating_duration_since(Instant::now()),
            total,
        }
    }

    /// Whole seconds left, rounded up so the label never shows 0 before the deadline.
    pub fn seconds_left(&self) -> u64 {
        let secs = self.remaining.as_secs();
        if self.remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    fn ratio(&self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        (self.remaining.as_secs_f64() / self.total.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl Widget for Countdown {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Gauge::default()
            .ratio(self.ratio())
            .label(format!("Leaving in {}s", self.seconds_left()))
            .render(area, buf);
    }
}

/// The most recently deleted note in an inverted panel, with the countdown underneath.
/// An absent note renders as empty title and content.
pub struct DeletedNoteView<'a> {
    note: Option<&'a Note>,
    loading: bool,
    countdown: Countdown,
}

impl<'a> DeletedNoteView<'a> {
    pub fn new(note: Option<&'a Note>, loading: bool, countdown: Countdown) -> Self {
        Self {
            note,
            loading,
            countdown,
        }
    }

    pub fn from_state(state: &'a NotePad, countdown: Countdown) -> Self {
        Self::new(state.deleted_note.as_ref(), state.loading, countdown)
    }

    fn text(&self) -> Text<'a> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let (title, content) = self
            .note
            .map(|n| (n.title.as_str(), n.content.as_str()))
            .unwrap_or(("", ""));

        let mut header = vec![Span::styled(DELETED_HEADER, bold)];
        if self.loading {
            header.push(Span::raw(" (syncing…)"));
        }

        let mut lines = vec![
            Line::from(header),
            Line::from(""),
            Line::from(Span::styled(format!("Title: {}", title), bold)),
        ];
        lines.extend(Text::from(content).lines);
        Text::from(lines)
    }
}

impl Widget for DeletedNoteView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().add_modifier(Modifier::REVERSED));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(self.text())
            .wrap(Wrap { trim: false })
            .render(chunks[0], buf);
        Paragraph::new("─".repeat(chunks[1].width as usize)).render(chunks[1], buf);
        self.countdown.render(chunks[2], buf);
    }
}
