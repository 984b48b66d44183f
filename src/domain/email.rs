use serde::{Deserialize, Serialize};

/// 1-based position of an email in the most recent batch.
pub type DisplayIndex = u32;

/// One email as returned by the `/gmail/last*` endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireEmail {
    pub index: Option<DisplayIndex>,
    pub from: Option<String>,
    pub subject: Option<String>,
    pub snippet: Option<String>,
    pub ai_summary: Option<String>,
    pub ai_reply_draft: Option<String>,
    pub to_email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailBatch {
    #[serde(default)]
    pub emails: Vec<WireEmail>,
}

/// A fetched email with its display index resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRecord {
    pub index: DisplayIndex,
    pub from: Option<String>,
    pub subject: Option<String>,
    pub snippet: Option<String>,
    pub ai_summary: Option<String>,
    pub ai_reply_draft: Option<String>,
    pub to_email: Option<String>,
}

impl EmailRecord {
    pub fn from_wire(wire: WireEmail, index: DisplayIndex) -> Self {
        Self {
            index,
            from: wire.from,
            subject: wire.subject,
            snippet: wire.snippet,
            ai_summary: wire.ai_summary,
            ai_reply_draft: wire.ai_reply_draft,
            to_email: wire.to_email,
        }
    }

    /// Address a reply goes to: explicit `to_email`, else the `<addr>` part of
    /// `from`, else `from` itself if it looks like an address.
    pub fn reply_address(&self) -> Option<String> {
        if let Some(to) = self.to_email.as_deref().map(str::trim)
            && !to.is_empty()
        {
            return Some(to.to_string());
        }
        let from = self.from.as_deref()?.trim();
        if let (Some(start), Some(end)) = (from.find('<'), from.rfind('>'))
            && start < end
        {
            let inner = from[start + 1..end].trim();
            if inner.contains('@') {
                return Some(inner.to_string());
            }
        }
        from.contains('@').then(|| from.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendReplyRequest {
    pub to_email: String,
    pub subject: String,
    pub body: String,
    pub confirm: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendReceipt {
    pub status: Option<String>,
    pub id: Option<String>,
    #[serde(rename = "threadId")]
    pub thread_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplyReceipt {
    pub to: Option<String>,
    pub subject: Option<String>,
    pub id: Option<String>,
    #[serde(rename = "threadId")]
    pub thread_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    #[serde(rename = "emailAddress")]
    pub email_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: Option<&str>, to_email: Option<&str>) -> EmailRecord {
        EmailRecord::from_wire(
            WireEmail {
                from: from.map(String::from),
                to_email: to_email.map(String::from),
                ..Default::default()
            },
            1,
        )
    }

    #[test]
    fn explicit_to_email_wins() {
        let r = record(Some("Ann <ann@x.org>"), Some("reply@x.org"));
        assert_eq!(r.reply_address().as_deref(), Some("reply@x.org"));
    }

    #[test]
    fn address_is_taken_from_angle_brackets() {
        let r = record(Some("Ann Smith <ann@x.org>"), None);
        assert_eq!(r.reply_address().as_deref(), Some("ann@x.org"));
    }

    #[test]
    fn bare_from_without_at_has_no_address() {
        assert_eq!(record(Some("Mailer Daemon"), None).reply_address(), None);
        assert_eq!(record(None, None).reply_address(), None);
    }

    #[test]
    fn batch_tolerates_missing_fields() {
        let batch: EmailBatch =
            serde_json::from_str(r#"{"emails":[{"from":"x","subject":"y","snippet":"z"}]}"#)
                .expect("valid batch");
        assert_eq!(batch.emails.len(), 1);
        assert!(batch.emails[0].index.is_none());

        let empty: EmailBatch = serde_json::from_str("{}").expect("valid batch");
        assert!(empty.emails.is_empty());
    }
}
