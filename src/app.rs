//! src/app.rs
//!
//! Terminal panel console for the visual synth.
//!
//! # Overview
//! The console shows one side panel at a time (controls, notifications,
//! events, save, audio, tokens) and slides it in and out with timed
//! transitions. Panels can be driven from three places:
//! - the keyboard,
//! - a line-based TCP remote control server,
//! - a MIDI controller on a serial port.
//!
//! # Keyboard
//! - **C N E S A T**: toggle the matching panel.
//! - **Esc**: close the active panel.
//! - **1 2 3**: select the layer tab.
//! - **Q**: quit and restore the terminal.
//!
//! # Remote protocol (ASCII, line based)
//! Default bind address is `127.0.0.1:4000` (`--remote`). One reply line per
//! command, `OK ...` or `ERR <msg>`.
//!
//! ```text
//! $ nc 127.0.0.1 4000
//! open audio
//! OK
//! state
//! OK active=audio animating=none tab=1
//! profile 0x1234567890123456789012345678901234567890
//! OK name=Ada image=https://api.universalprofile.cloud/ipfs/QmA background=none
//! quit
//! OK bye
//! ```
//!
//! Commands: `open <panel>`, `close`, `toggle <panel>`, `tab <1|2|3>`,
//! `state`, `profile <address>`, `notify <text...>`, `quit`.
//!
//! # MIDI
//! With `--midi-port`, pads 36..=41 toggle the panels in hotkey order, pad 42
//! closes, and CC 20/21/22 (value >= 64) select the layer tabs.
//!
//! # Threads
//! Only this loop owns the [`Console`]. The remote server, the MIDI reader and
//! the audio feed send [`Command`]s over one channel, drained every frame.
//! Panel timers are checked on every frame, and the loop wakes early when a
//! transition deadline is closer than the next frame.

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use ratatui::layout::{Constraint, Direction};
use tracing::{info, warn};

use crate::activity::Notifications;
use crate::clock::{Clock, SystemClock};
use crate::command::Command;
use crate::config::Args;
use crate::console::{Console, key_command};
use crate::feed::start_demo_feed;
use crate::midi::MidiMap;
use crate::midi::serial::start_serial_reader;
use crate::net::{RemoteContext, remote_server};
use crate::panels::{FooterPanel, HostPanel, LogPanel, StatusPanel, TitlePanel, slide_width};
use crate::profile::{DirectorySource, NoSource, ProfileService, ProfileSource};
use crate::ui::{Node, group, leaf};

/// Full width of the side region once a panel is fully open.
pub const SIDE_WIDTH: u16 = 42;

/// Compose the frame for the current console state.
pub fn build_screen<C: Clock + Clone>(console: &Console<C>) -> Node<'_> {
    let transition = console.panels.transition_progress();
    let side = if console.panels.state().active_panel.is_some() {
        slide_width(SIDE_WIDTH, transition)
    } else {
        0
    };

    let left = group(
        Direction::Vertical,
        vec![Constraint::Length(5), Constraint::Min(3)],
        vec![
            leaf(StatusPanel {
                state: console.panels.state(),
                pending_timers: console.panels.pending_timers(),
                progress: transition.map(|(_, p)| p),
            }),
            leaf(LogPanel {
                log: &console.events,
                title: "Activity",
            }),
        ],
    );

    group(
        Direction::Vertical,
        vec![
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ],
        vec![
            leaf(TitlePanel {
                title: "VJ Console",
                tab: console.tab,
                unread: console.notifications.unread_count(),
            }),
            group(
                Direction::Horizontal,
                vec![Constraint::Min(20), Constraint::Length(side)],
                vec![left, leaf(HostPanel { console })],
            ),
            leaf(FooterPanel),
        ],
    )
}

fn profile_service(args: &Args) -> ProfileService {
    let source: Arc<dyn ProfileSource> = match &args.profiles_dir {
        Some(dir) => Arc::new(DirectorySource::new(dir)),
        None => Arc::new(NoSource),
    };
    ProfileService::new(source, SystemClock, args.profile_ttl(), &args.ipfs_gateway)
}

/// Apply everything waiting on the channel.
fn drain_commands<C: Clock + Clone>(console: &mut Console<C>, rx: &Receiver<Command>) {
    while let Ok(cmd) = rx.try_recv() {
        console.apply(cmd);
        if !console.running {
            break;
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    let (tx, rx) = mpsc::channel::<Command>();
    let profiles = Arc::new(profile_service(&args));

    // Remote control thread
    let listener = TcpListener::bind(&args.remote)
        .wrap_err_with(|| format!("binding remote control on {}", args.remote))?;
    info!(addr = %args.remote, "remote control listening");
    {
        let ctx = RemoteContext {
            tx: tx.clone(),
            profiles: profiles.clone(),
        };
        thread::spawn(move || remote_server(listener, ctx));
    }

    if let Some(port) = &args.midi_port {
        start_serial_reader(
            port,
            args.midi_baud,
            MidiMap::default_for_channel(args.midi_channel),
            tx.clone(),
        );
    }

    if args.demo_audio {
        start_demo_feed(tx.clone(), Duration::from_millis(60));
    }
    drop(tx);

    let mut console = Console::new(SystemClock, args.initial_panel);
    match Notifications::load(&args.state_file) {
        Ok(saved) => {
            info!(count = saved.len(), path = %args.state_file.display(), "notifications restored");
            console.notifications = saved;
        }
        Err(e) => warn!(path = %args.state_file.display(), error = %e, "ignoring unreadable state file"),
    }
    let frame_time = args.frame_time();
    let mut last_purge = Instant::now();

    let mut terminal = ratatui::init();
    let outcome = (|| -> Result<()> {
        while console.running {
            let frame_start = Instant::now();

            drain_commands(&mut console, &rx);
            console.tick();
            if !console.running {
                break;
            }

            terminal.draw(|f| build_screen(&console).draw(f, f.area()))?;

            // Wait for input, but no longer than the next frame or panel deadline.
            let mut wait = frame_time.saturating_sub(frame_start.elapsed());
            if let Some(due) = console.panels.time_to_next() {
                wait = wait.min(due);
            }
            if crossterm::event::poll(wait)? {
                while crossterm::event::poll(Duration::ZERO)? {
                    if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
                        if let Some(cmd) = key_command(key) {
                            console.apply(cmd);
                        }
                    }
                }
            }

            if last_purge.elapsed() >= args.profile_ttl() {
                profiles.purge_expired();
                last_purge = Instant::now();
            }
        }
        Ok(())
    })();

    console.shutdown();
    ratatui::restore();
    let saved = console
        .notifications
        .save(&args.state_file)
        .wrap_err_with(|| format!("saving state to {}", args.state_file.display()));
    info!("console exited");
    outcome.and(saved)
}
