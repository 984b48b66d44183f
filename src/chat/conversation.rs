//! Imperative shell around the router: owns the transcript and the busy flag.
//!
//! A submission is split in three so a UI can run the slow part elsewhere:
//! [`Conversation::begin`] records the user entry and marks the chat busy,
//! [`Job::run`] does the dispatch (and any HTTP call), and
//! [`Conversation::finish`] applies the result and clears busy.

use log::debug;

use crate::api::MailApi;
use crate::chat::format;
use crate::chat::intent::{self, Intent};
use crate::chat::router::{Router, Turn};
use crate::chat::session::Session;
use crate::chat::transcript::{Transcript, TranscriptEntry};

/// Work handed from [`Conversation::begin`] to whoever runs the dispatch.
#[derive(Debug, Clone)]
pub struct Job {
    session: Session,
    intent: Intent,
}

impl Job {
    pub fn progress_label(&self) -> Option<String> {
        self.intent.progress_label()
    }

    pub fn run(self, router: &Router) -> Turn {
        router.dispatch_intent(self.session, self.intent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    Empty,
    Busy,
}

pub struct Conversation {
    session: Session,
    transcript: Transcript,
    busy: bool,
}

impl Conversation {
    pub fn new(session: Session) -> Self {
        let mut transcript = Transcript::default();
        transcript.push(TranscriptEntry::assistant(format::GREETING));
        Self {
            session,
            transcript,
            busy: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn begin(&mut self, text: &str) -> Result<Job, Rejected> {
        if self.busy {
            return Err(Rejected::Busy);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(Rejected::Empty);
        }
        self.transcript.push(TranscriptEntry::user(text));
        self.busy = true;
        Ok(Job {
            session: self.session.clone(),
            intent: intent::classify(text),
        })
    }

    pub fn finish(&mut self, turn: Turn) {
        debug!("turn produced {} entries", turn.entries.len());
        self.session = turn.session;
        self.transcript.extend(turn.entries);
        self.busy = false;
    }

    /// The job never came back: drop any staged action and release busy.
    pub fn abandon(&mut self) {
        if self.busy {
            self.session.pending.clear();
            self.transcript
                .push(TranscriptEntry::assistant(format::BACKEND_ERROR));
            self.busy = false;
        }
    }

    /// begin + run + finish on the calling thread.
    pub fn submit(&mut self, api: &dyn MailApi, text: &str) -> Result<&[TranscriptEntry], Rejected> {
        let before = self.transcript.len();
        let job = self.begin(text)?;
        let turn = job.run(&Router::new(api));
        self.finish(turn);
        Ok(self.transcript.since(before))
    }
}
