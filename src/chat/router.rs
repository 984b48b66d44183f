//! Command dispatch.
//!
//! [`Router::dispatch`] takes the current [`Session`] by value and hands back
//! the updated session together with the assistant entries produced for this
//! message. It never fails: every backend problem becomes a transcript entry.

use log::{debug, info, warn};

use crate::api::{ApiError, Feed, MailApi};
use crate::chat::format;
use crate::chat::intent::{self, Intent};
use crate::chat::pending::PendingAction;
use crate::chat::session::{MIN_DRAFT_BATCH, Session};
use crate::chat::transcript::TranscriptEntry;
use crate::domain::email::{DisplayIndex, SendEmailRequest, SendReplyRequest};

/// Result of dispatching one user message.
#[derive(Debug, Clone)]
pub struct Turn {
    pub session: Session,
    pub entries: Vec<TranscriptEntry>,
}

pub struct Router<'a> {
    api: &'a dyn MailApi,
}

impl<'a> Router<'a> {
    pub fn new(api: &'a dyn MailApi) -> Self {
        Self { api }
    }

    pub fn dispatch(&self, session: Session, text: &str) -> Turn {
        let intent = intent::classify(text);
        debug!("dispatch {}", intent_name(&intent));
        self.dispatch_intent(session, intent)
    }

    pub fn dispatch_intent(&self, mut session: Session, intent: Intent) -> Turn {
        let mut out = Vec::new();
        match intent {
            Intent::ShowLast(n) => {
                self.fetch(&mut session, &mut out, Feed::Raw, n);
            }
            Intent::SummarizeLast(n) => {
                self.fetch(&mut session, &mut out, Feed::Summaries, n);
            }
            Intent::DraftReplies(n) => {
                // The backend gets the literal N; MIN_DRAFT_BATCH only floors
                // the count we suggest when asking the user to re-run.
                session.draft_window = n.max(MIN_DRAFT_BATCH);
                if self.fetch(&mut session, &mut out, Feed::Replies, n) {
                    out.push(TranscriptEntry::assistant(format::REPLY_HINT));
                }
            }
            Intent::SendEmail(payload) => stage_email(&mut session, &mut out, payload),
            Intent::SendReply(index) => stage_reply(&mut session, &mut out, index),
            Intent::Confirm => match session.pending.take() {
                Some(action) => self.execute(&session, &mut out, action),
                None => out.push(TranscriptEntry::assistant(format::HELP)),
            },
            Intent::Cancel => match session.pending.take() {
                Some(PendingAction::SendNewEmail(_)) => {
                    info!("pending email cancelled");
                    out.push(TranscriptEntry::assistant(format::EMAIL_CANCELLED));
                }
                Some(PendingAction::SendReply { index, .. }) => {
                    info!("pending reply for #{index} cancelled");
                    out.push(TranscriptEntry::assistant(format::REPLY_CANCELLED));
                }
                None => out.push(TranscriptEntry::assistant(format::HELP)),
            },
            Intent::Help => out.push(TranscriptEntry::assistant(format::HELP)),
        }
        Turn {
            session,
            entries: out,
        }
    }

    /// Fetch a listing, replace the cache and render it. Returns false when
    /// the call failed and only an error entry was appended.
    fn fetch(
        &self,
        session: &mut Session,
        out: &mut Vec<TranscriptEntry>,
        feed: Feed,
        n: u64,
    ) -> bool {
        let batch = match self.api.fetch_last(&session.token, feed, n) {
            Ok(b) => b,
            Err(e) => {
                warn!("fetch {} failed: {e}", feed.path());
                out.push(TranscriptEntry::assistant(format::BACKEND_ERROR));
                return false;
            }
        };

        session.cache.replace(batch);
        info!("cached {} emails from {}", session.cache.len(), feed.path());

        let records = session.cache.records();
        let text = if records.is_empty() {
            format::NO_EMAILS.to_string()
        } else {
            match feed {
                Feed::Raw => format::format_raw(records),
                Feed::Summaries => format::format_summaries(records),
                Feed::Replies => format::format_replies(records),
            }
        };
        out.push(TranscriptEntry::assistant(text));
        true
    }

    fn execute(&self, session: &Session, out: &mut Vec<TranscriptEntry>, action: PendingAction) {
        match action {
            PendingAction::SendNewEmail(req) => {
                let text = match self.api.send_email(&session.token, &req) {
                    Ok(receipt) => {
                        info!("email sent, id={:?}", receipt.id);
                        format::send_email_done(&receipt)
                    }
                    Err(ApiError::Remote { status, body }) => {
                        warn!("send rejected with {status}");
                        format::send_email_failed(&body)
                    }
                    Err(e) => {
                        warn!("send failed: {e}");
                        format::BACKEND_ERROR.to_string()
                    }
                };
                out.push(TranscriptEntry::assistant(text));
            }
            PendingAction::SendReply {
                index,
                to_email,
                subject,
                body,
            } => {
                let req = SendReplyRequest {
                    to_email,
                    subject,
                    body,
                    confirm: true,
                };
                let text = match self.api.send_reply(&session.token, &req) {
                    Ok(receipt) => {
                        info!("reply for #{index} sent, id={:?}", receipt.id);
                        format::reply_done(&receipt)
                    }
                    Err(ApiError::Remote { status, body }) => {
                        warn!("reply for #{index} rejected with {status}");
                        format::reply_failed(&body)
                    }
                    Err(e) => {
                        warn!("reply for #{index} failed: {e}");
                        format::BACKEND_ERROR.to_string()
                    }
                };
                out.push(TranscriptEntry::assistant(text));
            }
        }
    }
}

fn stage_email(
    session: &mut Session,
    out: &mut Vec<TranscriptEntry>,
    payload: Option<SendEmailRequest>,
) {
    if session.pending.is_set() {
        out.push(TranscriptEntry::assistant(format::FINISH_PENDING_FIRST));
        return;
    }
    let Some(payload) = payload else {
        out.push(TranscriptEntry::assistant(format::SEND_EMAIL_USAGE));
        return;
    };
    out.push(TranscriptEntry::assistant(format::send_email_preview(&payload)));
    session.pending.set(PendingAction::SendNewEmail(payload));
}

fn stage_reply(
    session: &mut Session,
    out: &mut Vec<TranscriptEntry>,
    index: Option<DisplayIndex>,
) {
    if session.pending.is_set() {
        out.push(TranscriptEntry::assistant(format::FINISH_PENDING_FIRST));
        return;
    }
    let Some(index) = index else {
        out.push(TranscriptEntry::assistant(format::REPLY_USAGE));
        return;
    };
    if session.cache.is_empty() {
        out.push(TranscriptEntry::assistant(format::draft_first(MIN_DRAFT_BATCH)));
        return;
    }
    let Some(email) = session.cache.find_by_index(index) else {
        let suggested = u64::from(index).max(session.draft_window);
        out.push(TranscriptEntry::assistant(format::not_cached(index, suggested)));
        return;
    };
    let Some(draft) = email.ai_reply_draft.clone().filter(|d| !d.is_empty()) else {
        out.push(TranscriptEntry::assistant(format::no_draft(index)));
        return;
    };
    let Some(to_email) = email.reply_address() else {
        out.push(TranscriptEntry::assistant(format::no_reply_address(index)));
        return;
    };

    session.pending.set(PendingAction::SendReply {
        index,
        to_email,
        subject: email.subject.clone().unwrap_or_default(),
        body: draft,
    });
    out.push(TranscriptEntry::assistant(format::reply_confirm_prompt(index)));
}

fn intent_name(intent: &Intent) -> &'static str {
    match intent {
        Intent::ShowLast(_) => "show_last",
        Intent::SummarizeLast(_) => "summarize_last",
        Intent::DraftReplies(_) => "draft_replies",
        Intent::SendEmail(_) => "send_email",
        Intent::Confirm => "confirm",
        Intent::Cancel => "cancel",
        Intent::SendReply(_) => "send_reply",
        Intent::Help => "help",
    }
}
