//! src/net/remote.rs
//!
//! Line-based TCP control server. One thread per client; each line is one
//! command and gets exactly one reply line, `OK ...` or `ERR <msg>`.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::command::{Command, Request, parse_request};
use crate::profile::{ProfileData, ProfileService};

/// How long a `state` query waits for the UI loop to answer.
const STATE_TIMEOUT: Duration = Duration::from_secs(1);

/// Longest accepted command line in bytes, newline included.
pub const MAX_LINE: usize = 4096;

/// Handles shared by every client thread.
#[derive(Clone)]
pub struct RemoteContext {
    pub tx: Sender<Command>,
    pub profiles: Arc<ProfileService>,
}

/// Accept clients on `listener` forever, spawning a handler thread per client.
pub fn remote_server(listener: TcpListener, ctx: RemoteContext) {
    for stream in listener.incoming() {
        match stream {
            Ok(s) => {
                let ctx = ctx.clone();
                thread::spawn(move || handle_remote_client(s, ctx));
            }
            Err(e) => warn!(error = %e, "remote accept failed"),
        }
    }
}

pub fn handle_remote_client(s: TcpStream, ctx: RemoteContext) {
    let peer = s
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "<peer?>".into());
    info!(peer = %peer, "remote client connected");
    let reader = match s.try_clone() {
        Ok(r) => BufReader::new(r),
        Err(e) => {
            warn!(peer = %peer, error = %e, "cannot clone client stream");
            return;
        }
    };
    serve_lines(reader, &s, &ctx, &peer);
    let _ = s.shutdown(Shutdown::Both);
    info!(peer = %peer, "remote client disconnected");
}

/// Run the command loop over any line source and reply sink.
///
/// A line longer than [`MAX_LINE`] gets `ERR too long` and ends the session.
pub fn serve_lines<R: BufRead, W: Write>(mut rdr: R, mut out: W, ctx: &RemoteContext, peer: &str) {
    let mut line = String::new();
    loop {
        line.clear();
        match (&mut rdr).take(MAX_LINE as u64).read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(n) if n == MAX_LINE && !line.ends_with('\n') => {
                warn!(peer, "remote line too long");
                let _ = out.write_all(b"ERR too long\n");
                break;
            }
            Ok(_) => {}
        }
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        debug!(peer, line = raw, "remote command");

        let (reply, quit) = match parse_request(raw) {
            Ok(Request::Quit) => ("OK bye".to_string(), true),
            Ok(req) => {
                let _ = ctx.tx.send(Command::Activity(format!("remote {peer}: {raw}")));
                (execute(req, ctx), false)
            }
            Err(e) => (format!("ERR {e}"), false),
        };

        if out.write_all(format!("{reply}\n").as_bytes()).is_err() || quit {
            break;
        }
    }
}

fn execute(req: Request, ctx: &RemoteContext) -> String {
    let cmd = match req {
        Request::Open(kind) => Command::Open(kind),
        Request::Close => Command::Close,
        Request::Toggle(kind) => Command::Toggle(kind),
        Request::Tab(tab) => Command::SelectTab(tab),
        Request::Notify(text) => Command::Notify(text),
        Request::Read(id) => Command::MarkRead(id),
        Request::Clear => Command::ClearNotifications,
        Request::State => {
            let (reply_tx, reply_rx) = mpsc::channel();
            if ctx.tx.send(Command::QueryState(reply_tx)).is_err() {
                return "ERR ui".to_string();
            }
            return match reply_rx.recv_timeout(STATE_TIMEOUT) {
                Ok(snapshot) => format!("OK {snapshot}"),
                Err(_) => "ERR timeout".to_string(),
            };
        }
        Request::Profile(address) => {
            let Some(data) = ctx.profiles.profile(&address) else {
                return "ERR address".to_string();
            };
            let reply = profile_reply(&data);
            let cmd = Command::ShowProfile {
                address: address.to_ascii_lowercase(),
                data,
            };
            return send_or(ctx, cmd, reply);
        }
        Request::Cached(address) => {
            return match ctx.profiles.cached(&address) {
                Some(data) => profile_reply(&data),
                None => "ERR not cached".to_string(),
            };
        }
        Request::Forget(address) => {
            return if ctx.profiles.invalidate(&address) {
                "OK".to_string()
            } else {
                "ERR address".to_string()
            };
        }
        Request::Quit => return "OK bye".to_string(),
    };
    send_or(ctx, cmd, "OK".to_string())
}

fn profile_reply(data: &ProfileData) -> String {
    format!(
        "OK name={} image={} background={}",
        data.name,
        data.profile_image.as_deref().unwrap_or("none"),
        data.background_image.as_deref().unwrap_or("none"),
    )
}

/// Deliver to the UI loop, answering `ok` or an error if it hung up.
fn send_or(ctx: &RemoteContext, cmd: Command, ok: String) -> String {
    match ctx.tx.send(cmd) {
        Ok(()) => ok,
        Err(_) => "ERR ui".to_string(),
    }
}
