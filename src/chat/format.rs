//! Assistant response texts.

use crate::domain::email::{
    DisplayIndex, EmailRecord, ReplyReceipt, SendEmailRequest, SendReceipt,
};

pub const SEPARATOR: &str = "\n---\n\n";

pub const GREETING: &str = "Hi! I can read your last emails, summarize them, draft replies, and send replies if you confirm.\n\nTry typing: show last 5 emails";
pub const HELP: &str =
    "Try:\nshow last 5 emails\nsummarize last 5 emails\ndraft replies for last 5 emails";
pub const SEND_EMAIL_USAGE: &str =
    "Use this format:\n\nsend email to someone@gmail.com \nsubject: Hello \nbody: Hi there";
pub const REPLY_USAGE: &str = "Say: \"send reply 9\"";
pub const REPLY_HINT: &str = "Type: send reply 2";
pub const BACKEND_ERROR: &str = "Backend error. Is server running?";
pub const EMAIL_CANCELLED: &str = "Cancelled.";
pub const REPLY_CANCELLED: &str = "Okay, not sending.";
pub const FINISH_PENDING_FIRST: &str = "Finish confirming or cancel first. Type: yes / no";
pub const NO_EMAILS: &str = "No emails found.";

fn field(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or_default()
}

fn or_default<'a>(v: &'a Option<String>, default: &'a str) -> &'a str {
    match v.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => default,
    }
}

fn join_blocks(emails: &[EmailRecord], block: impl Fn(&EmailRecord) -> String) -> String {
    emails.iter().map(block).collect::<Vec<_>>().join(SEPARATOR)
}

pub fn format_raw(emails: &[EmailRecord]) -> String {
    join_blocks(emails, |e| {
        format!(
            "Email #{}\nFrom: {}\nSubject: {}\n\n{}\n",
            e.index,
            field(&e.from),
            field(&e.subject),
            field(&e.snippet),
        )
    })
}

pub fn format_summaries(emails: &[EmailRecord]) -> String {
    join_blocks(emails, |e| {
        format!(
            "Email #{}\nFrom: {}\nSubject: {}\nSummary: {}\n",
            e.index,
            field(&e.from),
            field(&e.subject),
            or_default(&e.ai_summary, "(no summary)"),
        )
    })
}

pub fn format_replies(emails: &[EmailRecord]) -> String {
    join_blocks(emails, |e| {
        format!(
            "Email #{}\nFrom: {}\nSubject: {}\n\nDraft Reply:\n{}\n",
            e.index,
            or_default(&e.from, "Unknown"),
            or_default(&e.subject, "(no subject)"),
            or_default(&e.ai_reply_draft, "(no reply)"),
        )
    })
}

pub fn send_email_preview(p: &SendEmailRequest) -> String {
    format!(
        "You're about to send an email:\n\nTo: {}\nSubject: {}\nBody:\n{}\n\nConfirm? Type: yes / no",
        p.to, p.subject, p.body
    )
}

pub fn send_email_done(r: &SendReceipt) -> String {
    format!(
        "Sent!\n\nStatus: {}\nId: {}\nThread: {}",
        field(&r.status),
        field(&r.id),
        field(&r.thread_id),
    )
}

pub fn send_email_failed(body: &str) -> String {
    format!("Failed to send email.\n\n{body}")
}

pub fn reply_confirm_prompt(index: DisplayIndex) -> String {
    format!("Confirm sending reply for Email #{index}?\nType: yes / no")
}

pub fn reply_done(r: &ReplyReceipt) -> String {
    format!(
        "Reply sent!\n\nTo: {}\nSubject: {}\nId: {}\nThread: {}",
        field(&r.to),
        field(&r.subject),
        field(&r.id),
        field(&r.thread_id),
    )
}

pub fn reply_failed(body: &str) -> String {
    format!("Failed to send reply.\n\n{body}")
}

pub fn draft_first(window: u64) -> String {
    format!("First run: draft replies for last {window} emails\nThen: send reply 9")
}

pub fn not_cached(index: DisplayIndex, suggested: u64) -> String {
    format!(
        "I don't have Email #{index} cached.\nRun: draft replies for last {suggested} emails (or more) first."
    )
}

pub fn no_draft(index: DisplayIndex) -> String {
    format!("No draft reply found for Email #{index}.")
}

pub fn no_reply_address(index: DisplayIndex) -> String {
    format!("Could not find a reply address for Email #{index}.")
}
