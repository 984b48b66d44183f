#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use mail_chat::api::{ApiError, Feed, MailApi};
use mail_chat::domain::email::{
    Profile, ReplyReceipt, SendEmailRequest, SendReceipt, SendReplyRequest, WireEmail,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchLast { path: &'static str, n: u64 },
    SendEmail(SendEmailRequest),
    SendReply(SendReplyRequest),
    Profile,
    Logout,
}

/// Scripted backend: each call pops the next queued response of its kind.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    batches: Mutex<VecDeque<Result<Vec<WireEmail>, ApiError>>>,
    sends: Mutex<VecDeque<Result<SendReceipt, ApiError>>>,
    replies: Mutex<VecDeque<Result<ReplyReceipt, ApiError>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch(self, batch: Vec<WireEmail>) -> Self {
        self.batches.lock().unwrap().push_back(Ok(batch));
        self
    }

    pub fn with_batch_error(self, err: ApiError) -> Self {
        self.batches.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn with_send(self, res: Result<SendReceipt, ApiError>) -> Self {
        self.sends.lock().unwrap().push_back(res);
        self
    }

    pub fn with_reply(self, res: Result<ReplyReceipt, ApiError>) -> Self {
        self.replies.lock().unwrap().push_back(res);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unscripted() -> ApiError {
    ApiError::Transport("connection refused".into())
}

impl MailApi for FakeApi {
    fn fetch_last(&self, _token: &str, feed: Feed, n: u64) -> Result<Vec<WireEmail>, ApiError> {
        self.record(Call::FetchLast {
            path: feed.path(),
            n,
        });
        self.batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }

    fn send_email(&self, _token: &str, req: &SendEmailRequest) -> Result<SendReceipt, ApiError> {
        self.record(Call::SendEmail(req.clone()));
        self.sends
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }

    fn send_reply(&self, _token: &str, req: &SendReplyRequest) -> Result<ReplyReceipt, ApiError> {
        self.record(Call::SendReply(req.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }

    fn profile(&self, _token: &str) -> Result<Profile, ApiError> {
        self.record(Call::Profile);
        Ok(Profile {
            email_address: "me@example.com".into(),
        })
    }

    fn logout(&self, _token: &str) -> Result<(), ApiError> {
        self.record(Call::Logout);
        Ok(())
    }
}

pub fn email(from: &str, subject: &str, snippet: &str) -> WireEmail {
    WireEmail {
        from: Some(from.into()),
        subject: Some(subject.into()),
        snippet: Some(snippet.into()),
        ..Default::default()
    }
}

pub fn drafted(index: u32, from: &str, subject: &str, draft: Option<&str>) -> WireEmail {
    WireEmail {
        index: Some(index),
        from: Some(from.into()),
        subject: Some(subject.into()),
        ai_summary: Some(format!("summary of {subject}")),
        ai_reply_draft: draft.map(String::from),
        ..Default::default()
    }
}
