use std::sync::mpsc::{Receiver, TryRecvError};

use crate::chat::conversation::{Conversation, Job, Rejected};
use crate::chat::router::Turn;

fn header_text(address: Option<&str>) -> String {
    match address {
        Some(a) => format!(" Mail chat — {a} "),
        None => " Mail chat ".to_string(),
    }
}

pub struct ChatState {
    pub conversation: Conversation,
    pub input: String,

    /// Lines scrolled up from the bottom of the transcript
    pub scroll_back: u16,
    /// Shown in the status line while a job runs
    pub status: Option<String>,
    pub header: String,

    inflight: Option<Receiver<Turn>>,
}

impl ChatState {
    /// `user_email` from the config titles the chat until a profile is known.
    pub fn new(conversation: Conversation, user_email: Option<&str>) -> Self {
        let address = conversation
            .session()
            .profile
            .as_ref()
            .map(|p| p.email_address.as_str())
            .or(user_email);
        let header = header_text(address);
        Self {
            conversation,
            input: String::new(),
            scroll_back: 0,
            status: None,
            header,
            inflight: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.conversation.is_busy()
    }

    pub fn push_char(&mut self, c: char) {
        if !self.is_busy() {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if !self.is_busy() {
            self.input.pop();
        }
    }

    /// Takes the input line and starts a job for it.
    pub fn take_submission(&mut self) -> Option<Job> {
        match self.conversation.begin(&self.input) {
            Ok(job) => {
                self.input.clear();
                self.scroll_back = 0;
                self.status = Some(job.progress_label().unwrap_or_else(|| "Working...".into()));
                Some(job)
            }
            Err(Rejected::Empty) => {
                self.input.clear();
                None
            }
            Err(Rejected::Busy) => None,
        }
    }

    pub fn track(&mut self, rx: Receiver<Turn>) {
        self.inflight = Some(rx);
    }

    /// Applies a finished job, if any. Returns true when the view changed.
    pub fn poll_inflight(&mut self) -> bool {
        let Some(rx) = &self.inflight else {
            return false;
        };
        match rx.try_recv() {
            Ok(turn) => {
                self.conversation.finish(turn);
                self.inflight = None;
                self.status = None;
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                // worker died without a turn; keep the session, release the input
                self.conversation.abandon();
                self.inflight = None;
                self.status = None;
                true
            }
        }
    }

    pub fn scroll(&mut self, delta: i32) {
        if delta > 0 {
            self.scroll_back = self.scroll_back.saturating_add(delta as u16);
        } else {
            self.scroll_back = self.scroll_back.saturating_sub((-delta) as u16);
        }
    }
}
