//! src/panels/log.rs
//!
//! Scrolling events log; the newest line is highlighted.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::activity::EventLog;

pub struct LogPanel<'a> {
    pub log: &'a EventLog,
    pub title: &'a str,
}

impl LogPanel<'_> {
    /// The last `rows` lines, oldest first.
    pub fn lines(&self, rows: usize) -> Vec<Line<'_>> {
        let tail: Vec<&String> = self.log.tail(rows).collect();
        let last = tail.len().saturating_sub(1);
        tail.into_iter()
            .enumerate()
            .map(|(i, text)| {
                let style = if i == last {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                Line::styled(text.as_str(), style)
            })
            .collect()
    }
}

impl crate::ui::Panel for LogPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default().title(self.title).borders(Borders::ALL);
        let rows = usize::from(area.height.saturating_sub(2));
        f.render_widget(Paragraph::new(self.lines(rows)).block(block), area);
    }
}
