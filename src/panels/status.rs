//! src/panels/status.rs
//!
//! Status panel: current panel phase, animation class, pending timers.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::panel::{PanelKind, PanelState, Phase};

pub struct StatusPanel {
    pub state: PanelState,
    pub pending_timers: usize,
    pub progress: Option<f64>,
}

impl StatusPanel {
    fn phase_label(phase: Phase) -> (&'static str, Color) {
        match phase {
            Phase::Closed => ("Closed", Color::DarkGray),
            Phase::Opening(_) => ("Opening", Color::Yellow),
            Phase::Open(_) => ("Open", Color::Green),
            Phase::Closing(_) => ("Closing", Color::Red),
        }
    }
}

impl crate::ui::Panel for StatusPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let (label, color) = Self::phase_label(self.state.phase());
        let active = self.state.active_panel.map_or("none", PanelKind::name);
        let class = self.state.animating.map_or("-", |a| a.class());
        let progress = self
            .progress
            .map(|p| format!("{:>3.0}%", p * 100.0))
            .unwrap_or_else(|| "   -".to_string());

        let lines = vec![
            Line::from(vec![
                Span::raw("phase "),
                Span::styled(
                    label,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  active={active}")),
            ]),
            Line::from(format!(
                "class={class}  progress={progress}  timers={}",
                self.pending_timers
            )),
            Line::from(format!(
                "token selector {}",
                if self.state.token_selector_open() {
                    "open"
                } else {
                    "closed"
                }
            )),
        ];

        let block = Block::default().title("Status").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
