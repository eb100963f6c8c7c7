use ratatui::Terminal;
use ratatui::backend::TestBackend;

use vj_console::app::build_screen;
use vj_console::clock::ManualClock;
use vj_console::command::Command;
use vj_console::console::Console;
use vj_console::panel::PanelKind;

fn render(console: &Console<ManualClock>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal
        .draw(|f| build_screen(console).draw(f, f.area()))
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn host_title_follows_transition_class() {
    let clock = ManualClock::new();
    let mut console = Console::new(clock.clone(), None);
    let screen = render(&console);
    assert!(screen.contains("Closed"));
    assert!(!screen.contains("[animating]"));

    console.apply(Command::Open(PanelKind::Audio));
    clock.advance_ms(150);
    let screen = render(&console);
    assert!(screen.contains("Audio [animating]"));
    assert!(screen.contains("Opening"));

    clock.advance_ms(150);
    console.tick();
    let screen = render(&console);
    assert!(screen.contains("Bass"));
    assert!(!screen.contains("[animating]"));

    console.apply(Command::Close);
    let screen = render(&console);
    assert!(screen.contains("[closing]"));
}

#[test]
fn initial_panel_renders_open_with_activity() {
    let clock = ManualClock::new();
    let mut console = Console::new(clock, Some(PanelKind::Controls));
    console.apply(Command::Activity("MIDI ch1 CC 20 = 127".into()));
    console.apply(Command::Notify("layer saved".into()));
    let screen = render(&console);
    assert!(screen.contains("Controls"));
    assert!(screen.contains("layer 3"));
    assert!(screen.contains("1 unread"));
    assert!(screen.contains("CC 20 = 127"));
}
