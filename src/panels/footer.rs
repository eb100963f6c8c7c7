//! src/panels/footer.rs
//!
//! Hotkey legend built from the panel kinds, so it never drifts from the
//! actual bindings.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::panel::PanelKind;

pub struct FooterPanel;

impl FooterPanel {
    pub fn legend() -> Vec<Span<'static>> {
        let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let mut spans = Vec::new();
        for kind in PanelKind::ALL {
            spans.push(Span::styled(kind.hotkey().to_ascii_uppercase().to_string(), key));
            spans.push(Span::raw(format!("={}  ", kind.title())));
        }
        spans.push(Span::styled("Esc", key));
        spans.push(Span::raw("=Close  "));
        spans.push(Span::styled("1-3", key));
        spans.push(Span::raw("=Layer tab  "));
        spans.push(Span::styled("Q", key));
        spans.push(Span::raw("=Quit"));
        spans
    }
}

impl crate::ui::Panel for FooterPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let p = Paragraph::new(Line::from(Self::legend()))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Keys").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
