//! Backend HTTP contract.
//!
//! The chat core only talks to the backend through [`MailApi`], so the router
//! can be driven by an in-memory fake in tests and by [`http::HttpMailApi`] in
//! the binary.

pub mod http;

use thiserror::Error;

use crate::domain::email::{
    Profile, ReplyReceipt, SendEmailRequest, SendReceipt, SendReplyRequest, WireEmail,
};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend answered with a non-2xx status; `body` is the raw response text
    #[error("backend returned {status}: {body}")]
    Remote { status: u16, body: String },
    /// Connection refused, timeout, broken pipe
    #[error("transport error: {0}")]
    Transport(String),
    /// 2xx response whose body could not be decoded
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Which `/gmail/last*` listing to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Raw,
    Summaries,
    Replies,
}

impl Feed {
    pub fn path(self) -> &'static str {
        match self {
            Feed::Raw => "/gmail/last",
            Feed::Summaries => "/gmail/last_with_summaries",
            Feed::Replies => "/gmail/last_with_replies",
        }
    }
}

pub trait MailApi: Send + Sync {
    fn fetch_last(&self, token: &str, feed: Feed, n: u64) -> Result<Vec<WireEmail>, ApiError>;
    fn send_email(&self, token: &str, req: &SendEmailRequest) -> Result<SendReceipt, ApiError>;
    fn send_reply(&self, token: &str, req: &SendReplyRequest) -> Result<ReplyReceipt, ApiError>;
    fn profile(&self, token: &str) -> Result<Profile, ApiError>;
    fn logout(&self, token: &str) -> Result<(), ApiError>;
}
