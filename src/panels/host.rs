//! src/panels/host.rs
//!
//! Side region hosting the active panel. The region slides in and out with
//! the running transition; its width comes from the same progress the panel
//! manager's timers are based on.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use super::log::LogPanel;
use crate::clock::Clock;
use crate::console::Console;
use crate::panel::{Animating, LayerTab, PanelKind};
use crate::ui::Panel;

/// Narrowest width at which the region is still drawn.
pub const MIN_WIDTH: u16 = 3;

/// Width of the side region for a given transition.
pub fn slide_width(full: u16, transition: Option<(Animating, f64)>) -> u16 {
    let frac = match transition {
        None => return full,
        Some((Animating::Opening(_), p)) => p,
        Some((Animating::Closing, p)) => 1.0 - p,
    };
    let w = (f64::from(full) * frac.clamp(0.0, 1.0)).round() as u16;
    w.clamp(MIN_WIDTH.min(full), full)
}

pub struct HostPanel<'a, C: Clock + Clone> {
    pub console: &'a Console<C>,
}

impl<C: Clock + Clone> HostPanel<'_, C> {
    fn border_style(animating: Option<Animating>) -> Style {
        match animating {
            Some(Animating::Opening(_)) => Style::default().fg(Color::Yellow),
            Some(Animating::Closing) => Style::default().fg(Color::DarkGray),
            None => Style::default().fg(Color::Cyan),
        }
    }

    fn draw_controls(&self, f: &mut Frame<'_>, area: Rect) {
        let lines: Vec<Line> = [LayerTab::Tab1, LayerTab::Tab2, LayerTab::Tab3]
            .into_iter()
            .map(|tab| {
                let text = format!("tab {}  layer {}", tab.number(), tab.layer_id());
                if tab == self.console.tab {
                    Line::styled(
                        format!("> {text}"),
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Line::raw(format!("  {text}"))
                }
            })
            .collect();
        f.render_widget(Paragraph::new(lines), area);
    }

    fn draw_notifications(&self, f: &mut Frame<'_>, area: Rect) {
        let notes = &self.console.notifications;
        let lines: Vec<Line> = if notes.is_empty() {
            vec![Line::raw("no notifications")]
        } else {
            notes
                .iter()
                .rev()
                .take(usize::from(area.height))
                .map(|n| {
                    let marker = if n.read { "  " } else { "* " };
                    Line::from(vec![
                        Span::styled(marker, Style::default().fg(Color::Yellow)),
                        Span::raw(format!("#{} {}", n.id, n.message)),
                    ])
                })
                .collect()
        };
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
    }

    fn draw_save(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = match &self.console.profile {
            None => vec![
                Line::raw("no profile loaded"),
                Line::raw("remote: profile <address>"),
            ],
            Some((address, data)) => {
                let name_style = if data.failed {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                vec![
                    Line::styled(data.name.clone(), name_style),
                    Line::raw(address.clone()),
                    Line::raw(format!(
                        "image: {}",
                        data.profile_image.as_deref().unwrap_or("none")
                    )),
                    Line::raw(format!(
                        "background: {}",
                        data.background_image.as_deref().unwrap_or("none")
                    )),
                ]
            }
        };
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
    }

    fn draw_audio(&self, f: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);
        let levels = self.console.audio;
        let bands = [
            ("Bass", levels.bass, Color::Magenta),
            ("Mid", levels.mid, Color::Cyan),
            ("Treble", levels.treble, Color::Yellow),
        ];
        for ((label, value, color), row) in bands.into_iter().zip(rows.iter()) {
            let gauge = Gauge::default()
                .block(Block::default().title(label).borders(Borders::ALL))
                .gauge_style(Style::default().fg(color))
                .ratio(value.clamp(0.0, 1.0));
            f.render_widget(gauge, *row);
        }
    }

    fn draw_tokens(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = vec![
            Line::styled(
                "token selector open",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(format!("target layer {}", self.console.tab.layer_id())),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }
}

impl<C: Clock + Clone> Panel for HostPanel<'_, C> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let state = self.console.panels.state();
        let Some(kind) = state.active_panel else {
            return;
        };
        let title = match state.animating {
            Some(a) => format!("{} [{}]", kind.title(), a.class()),
            None => kind.title().to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Self::border_style(state.animating));
        let inner = block.inner(area);
        f.render_widget(block, area);

        match kind {
            PanelKind::Controls => self.draw_controls(f, inner),
            PanelKind::Notifications => self.draw_notifications(f, inner),
            PanelKind::Events => {
                let log = LogPanel {
                    log: &self.console.events,
                    title: "Events",
                };
                f.render_widget(Paragraph::new(log.lines(usize::from(inner.height))), inner);
            }
            PanelKind::Save => self.draw_save(f, inner),
            PanelKind::Audio => self.draw_audio(f, inner),
            PanelKind::Tokens => self.draw_tokens(f, inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_follows_transition() {
        assert_eq!(slide_width(40, None), 40);
        assert_eq!(
            slide_width(40, Some((Animating::Opening(PanelKind::Audio), 0.5))),
            20
        );
        assert_eq!(
            slide_width(40, Some((Animating::Opening(PanelKind::Audio), 0.0))),
            MIN_WIDTH
        );
        assert_eq!(slide_width(40, Some((Animating::Closing, 0.25))), 30);
        assert_eq!(slide_width(40, Some((Animating::Closing, 1.0))), MIN_WIDTH);
        assert_eq!(slide_width(2, Some((Animating::Closing, 1.0))), 2);
    }
}
