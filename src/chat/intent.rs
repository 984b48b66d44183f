//! Free-text command parsing.
//!
//! Extractors are total: they return `None` when the pattern is absent and
//! leave the decision of what to tell the user to the router. Keyword matching
//! runs on a lowercased copy; embedded content (addresses, subjects, bodies)
//! is taken from the original text so its casing survives.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::email::{DisplayIndex, SendEmailRequest};

fn re_count() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)last\s+(\d+)").unwrap())
}

fn re_reply_index() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(?:send\s+reply|reply)\s+(\d+)\b").unwrap())
}

fn re_to() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)to\s+([^\s]+@[^\s]+)").unwrap())
}

fn re_subject() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // subject runs up to the `body:` marker, or to the end when there is none;
    // it may be empty so a blank subject never swallows the marker
    RE.get_or_init(|| Regex::new(r"(?is)subject\s*:\s*?(.*?)(?:\s+body\s*:|$)").unwrap())
}

fn re_body() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)body\s*:\s*(.+)$").unwrap())
}

fn first_number<T: FromStr>(re: &Regex, text: &str) -> Option<T> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// `last <N>` anywhere in the text.
pub fn extract_count(text: &str) -> Option<u64> {
    first_number(re_count(), text)
}

/// `reply <N>` or `send reply <N>`.
pub fn extract_reply_index(text: &str) -> Option<DisplayIndex> {
    first_number(re_reply_index(), text)
}

/// `to <address> subject: <...> body: <...>`; all three parts are required.
pub fn extract_send_email(text: &str) -> Option<SendEmailRequest> {
    let to = re_to().captures(text)?.get(1)?.as_str();
    let subject = re_subject().captures(text)?.get(1)?.as_str();
    let body = re_body().captures(text)?.get(1)?.as_str();

    Some(SendEmailRequest {
        to: to.trim().to_string(),
        subject: subject.trim().to_string(),
        body: body.trim().to_string(),
    })
}

/// One submitted line, trimmed, with a lowercased copy for keyword checks.
#[derive(Debug, Clone)]
pub struct Command<'a> {
    pub raw: &'a str,
    pub normalized: String,
}

impl<'a> Command<'a> {
    pub fn new(text: &'a str) -> Self {
        let raw = text.trim();
        Self {
            raw,
            normalized: raw.to_lowercase(),
        }
    }

    fn count(&self) -> Option<u64> {
        extract_count(self.raw).filter(|n| *n > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ShowLast(u64),
    SummarizeLast(u64),
    DraftReplies(u64),
    /// `None` when the send-email payload could not be extracted
    SendEmail(Option<SendEmailRequest>),
    Confirm,
    Cancel,
    /// `None` when no index was given
    SendReply(Option<DisplayIndex>),
    Help,
}

impl Intent {
    /// Status line text while the intent's network call is in flight.
    pub fn progress_label(&self) -> Option<String> {
        match self {
            Intent::ShowLast(n) => Some(format!("Fetching last {n} emails...")),
            Intent::SummarizeLast(n) => Some(format!("Summarizing last {n} emails...")),
            Intent::DraftReplies(n) => Some(format!("Drafting replies for last {n} emails...")),
            Intent::Confirm => Some("Sending...".to_string()),
            _ => None,
        }
    }
}

pub type Matcher = fn(&Command) -> Option<Intent>;

fn match_show(cmd: &Command) -> Option<Intent> {
    if !cmd.normalized.starts_with("show last") {
        return None;
    }
    cmd.count().map(Intent::ShowLast)
}

fn match_summarize(cmd: &Command) -> Option<Intent> {
    if !cmd.normalized.starts_with("summarize last") {
        return None;
    }
    cmd.count().map(Intent::SummarizeLast)
}

fn match_draft(cmd: &Command) -> Option<Intent> {
    if !cmd.normalized.starts_with("draft replies") {
        return None;
    }
    cmd.count().map(Intent::DraftReplies)
}

fn match_send_email(cmd: &Command) -> Option<Intent> {
    cmd.normalized
        .starts_with("send email")
        .then(|| Intent::SendEmail(extract_send_email(cmd.raw)))
}

fn match_confirm(cmd: &Command) -> Option<Intent> {
    (cmd.normalized == "yes").then_some(Intent::Confirm)
}

fn match_cancel(cmd: &Command) -> Option<Intent> {
    (cmd.normalized == "no").then_some(Intent::Cancel)
}

fn match_send_reply(cmd: &Command) -> Option<Intent> {
    if !(cmd.normalized.starts_with("send reply") || cmd.normalized.starts_with("reply")) {
        return None;
    }
    let index = extract_reply_index(cmd.raw).filter(|i| *i > 0);
    Some(Intent::SendReply(index))
}

/// Ordered; the first matcher that accepts the command wins.
pub const MATCHERS: &[Matcher] = &[
    match_show,
    match_summarize,
    match_draft,
    match_send_email,
    match_confirm,
    match_cancel,
    match_send_reply,
];

pub fn classify(text: &str) -> Intent {
    classify_with(MATCHERS, &Command::new(text))
}

pub fn classify_with(matchers: &[Matcher], cmd: &Command) -> Intent {
    matchers
        .iter()
        .find_map(|m| m(cmd))
        .unwrap_or(Intent::Help)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_first_number_after_last() {
        assert_eq!(extract_count("show last 3 emails"), Some(3));
        assert_eq!(extract_count("SHOW LAST   12"), Some(12));
        assert_eq!(extract_count("last 4 then last 9"), Some(4));
        assert_eq!(extract_count("show me everything"), None);
        assert_eq!(extract_count("last five"), None);
    }

    #[test]
    fn count_has_no_upper_bound() {
        assert_eq!(extract_count("summarize last 5000"), Some(5000));
    }

    #[test]
    fn count_beyond_u32_is_kept() {
        assert_eq!(extract_count("show last 5000000000 emails"), Some(5_000_000_000));
        assert_eq!(classify("show last 5000000000 emails"), Intent::ShowLast(5_000_000_000));
    }

    #[test]
    fn reply_index_variants() {
        assert_eq!(extract_reply_index("send reply 2"), Some(2));
        assert_eq!(extract_reply_index("Reply 9"), Some(9));
        assert_eq!(extract_reply_index("reply please"), None);
        assert_eq!(extract_reply_index("replying 3"), None);
    }

    #[test]
    fn send_email_payload_is_extracted() {
        let p = extract_send_email("send email to a@b.com subject: Hi body: Hello")
            .expect("complete payload");
        assert_eq!(
            p,
            SendEmailRequest {
                to: "a@b.com".into(),
                subject: "Hi".into(),
                body: "Hello".into(),
            }
        );
    }

    #[test]
    fn send_email_keeps_original_casing_and_multiline_body() {
        let p = extract_send_email(
            "Send Email TO Bob@Example.com Subject: Quarterly Plan body: Hi Bob,\nSee ATTACHED.",
        )
        .expect("complete payload");
        assert_eq!(p.to, "Bob@Example.com");
        assert_eq!(p.subject, "Quarterly Plan");
        assert_eq!(p.body, "Hi Bob,\nSee ATTACHED.");
    }

    #[test]
    fn blank_subject_or_body_is_accepted_empty() {
        let p = extract_send_email("send email to a@b.com subject:   body: hi")
            .expect("blank subject accepted");
        assert_eq!(p.subject, "");
        assert_eq!(p.body, "hi");

        let p = extract_send_email("send email to a@b.com subject: Hi body:   ")
            .expect("blank body accepted");
        assert_eq!(p.subject, "Hi");
        assert_eq!(p.body, "");
    }

    #[test]
    fn send_email_requires_all_parts() {
        assert!(extract_send_email("send email to a@b.com subject: Hi").is_none());
        assert!(extract_send_email("send email to a@b.com body: Hello").is_none());
        assert!(extract_send_email("send email subject: Hi body: Hello").is_none());
        assert!(extract_send_email("send email to bob subject: Hi body: Hello").is_none());
    }

    #[test]
    fn classify_follows_rule_order() {
        assert_eq!(classify("show last 3 emails"), Intent::ShowLast(3));
        assert_eq!(classify("Summarize last 4"), Intent::SummarizeLast(4));
        assert_eq!(classify("draft replies for last 5 emails"), Intent::DraftReplies(5));
        assert_eq!(classify("  yes "), Intent::Confirm);
        assert_eq!(classify("NO"), Intent::Cancel);
        assert_eq!(classify("send reply 2"), Intent::SendReply(Some(2)));
        assert_eq!(classify("reply"), Intent::SendReply(None));
        assert!(matches!(classify("send email to a@b.com"), Intent::SendEmail(None)));
    }

    #[test]
    fn missing_or_zero_count_falls_back_to_help() {
        assert_eq!(classify("show last emails"), Intent::Help);
        assert_eq!(classify("show last 0 emails"), Intent::Help);
        assert_eq!(classify("yes please"), Intent::Help);
        assert_eq!(classify("hello"), Intent::Help);
    }

    #[test]
    fn matcher_list_is_extensible() {
        fn match_ping(cmd: &Command) -> Option<Intent> {
            (cmd.normalized == "ping").then_some(Intent::ShowLast(1))
        }
        let mut matchers = MATCHERS.to_vec();
        matchers.push(match_ping);
        assert_eq!(classify_with(&matchers, &Command::new("ping")), Intent::ShowLast(1));
        assert_eq!(classify_with(MATCHERS, &Command::new("ping")), Intent::Help);
    }
}
