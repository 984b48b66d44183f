pub mod events;
pub mod state;
pub mod ui;

use anyhow::Result;
use crossterm::event::{self, Event};
use log::{error, info};
use ratatui::DefaultTerminal;
use std::io::{BufRead, Write};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use crate::api::MailApi;
use crate::chat::conversation::{Conversation, Job, Rejected};
use crate::chat::router::Router;
use crate::chat::transcript::Role;
use crate::terminal::events::{KeyOutcome, handle_key};
use crate::terminal::state::ChatState;

pub fn run_tui(
    conversation: Conversation,
    api: Arc<dyn MailApi>,
    user_email: Option<&str>,
) -> Result<()> {
    let mut state = ChatState::new(conversation, user_email);

    let terminal = ratatui::init();
    let result = run(terminal, &mut state, api);

    ratatui::restore();

    result
}

fn run(mut terminal: DefaultTerminal, state: &mut ChatState, api: Arc<dyn MailApi>) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, state))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match handle_key(key, state) {
                    KeyOutcome::Quit => break,
                    KeyOutcome::Submit(job) => spawn_job(state, job, api.clone()),
                    KeyOutcome::Continue => {}
                }
            }
        }

        state.poll_inflight();
    }
    Ok(())
}

/// Runs the dispatch on a worker so the UI keeps drawing while the backend
/// answers. Only one job is ever in flight: the conversation refuses new
/// input until this one is finished.
fn spawn_job(state: &mut ChatState, job: Job, api: Arc<dyn MailApi>) {
    let (tx, rx) = mpsc::channel();
    state.track(rx);
    let spawned = thread::Builder::new()
        .name("mail-chat-job".into())
        .spawn(move || {
            let turn = job.run(&Router::new(api.as_ref()));
            let _ = tx.send(turn);
        });
    if let Err(e) = spawned {
        // the sender was dropped with the closure; poll_inflight sees Disconnected
        error!("could not start worker: {e}");
    }
}

/// Line-oriented chat on stdin/stdout, one command per line.
pub fn run_plain(mut conversation: Conversation, api: &dyn MailApi) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    for entry in conversation.transcript().entries() {
        writeln!(stdout, "{}\n", entry.text)?;
    }

    for line in stdin.lock().lines() {
        let line = line?;
        match conversation.submit(api, &line) {
            Ok(entries) => {
                for e in entries.iter().filter(|e| e.role == Role::Assistant) {
                    writeln!(stdout, "{}\n", e.text)?;
                }
            }
            // submit is synchronous, so Busy cannot happen here
            Err(Rejected::Empty | Rejected::Busy) => continue,
        }
        stdout.flush()?;
    }
    info!("stdin closed, leaving chat");
    Ok(())
}
