//! src/panels/title.rs
//!
//! Header bar: app title, selected layer, unread notification badge.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::panel::LayerTab;

pub struct TitlePanel<'a> {
    pub title: &'a str,
    pub tab: LayerTab,
    pub unread: usize,
}

impl crate::ui::Panel for TitlePanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![
            Span::styled(self.title, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                "   tab {} (layer {})",
                self.tab.number(),
                self.tab.layer_id()
            )),
        ];
        if self.unread > 0 {
            spans.push(Span::styled(
                format!("   {} unread", self.unread),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ));
        }
        let p = Paragraph::new(Line::from(spans))
            .block(Block::default().title("Title").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
