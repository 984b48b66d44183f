use anyhow::{Result, anyhow};
use log::{debug, warn};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::api::{ApiError, Feed, MailApi};
use crate::config::Config;
use crate::domain::email::{
    EmailBatch, Profile, ReplyReceipt, SendEmailRequest, SendReceipt, SendReplyRequest, WireEmail,
};

#[derive(Clone)]
pub struct HttpMailApi {
    base: Url,
    client: Client,
}

impl HttpMailApi {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(api_base).map_err(|e| anyhow!("Invalid api_base '{api_base}': {e}"))?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("api_base is not a base URL: {api_base}"));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base, client })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(&cfg.api_base, cfg.request_timeout())
    }

    fn endpoint(&self, path: &str) -> Url {
        // keep any path prefix on the base (e.g. https://host/api)
        let mut url = self.base.clone();
        let joined = format!("{}{}", url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url
    }

    fn execute(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            warn!("backend returned {status}");
            return Err(remote_error(status.as_u16(), resp.text()));
        }
        Ok(resp)
    }

    fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>().map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Error for a non-2xx answer; an unreadable body counts as a transport failure.
fn remote_error<E: std::fmt::Display>(status: u16, body: Result<String, E>) -> ApiError {
    match body {
        Ok(body) => ApiError::Remote { status, body },
        Err(e) => ApiError::Transport(format!("reading {status} response body: {e}")),
    }
}

impl MailApi for HttpMailApi {
    fn fetch_last(&self, token: &str, feed: Feed, n: u64) -> Result<Vec<WireEmail>, ApiError> {
        let url = self.endpoint(feed.path());
        debug!("GET {} n={n}", url.path());
        let resp = self.execute(self.client.get(url).bearer_auth(token).query(&[("n", n)]))?;
        let batch: EmailBatch = Self::decode(resp)?;
        debug!("received {} emails", batch.emails.len());
        Ok(batch.emails)
    }

    fn send_email(&self, token: &str, req: &SendEmailRequest) -> Result<SendReceipt, ApiError> {
        let url = self.endpoint("/gmail/send");
        debug!("POST {}", url.path());
        let resp = self.execute(self.client.post(url).bearer_auth(token).json(req))?;
        Self::decode(resp)
    }

    fn send_reply(&self, token: &str, req: &SendReplyRequest) -> Result<ReplyReceipt, ApiError> {
        let url = self.endpoint("/gmail/send_reply");
        debug!("POST {}", url.path());
        let resp = self.execute(self.client.post(url).bearer_auth(token).json(req))?;
        Self::decode(resp)
    }

    fn profile(&self, token: &str) -> Result<Profile, ApiError> {
        let url = self.endpoint("/gmail/profile");
        let resp = self.execute(self.client.get(url).bearer_auth(token))?;
        Self::decode(resp)
    }

    fn logout(&self, token: &str) -> Result<(), ApiError> {
        let url = self.endpoint("/auth/logout");
        self.execute(self.client.post(url).bearer_auth(token))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_keep_base_prefix() {
        let api = HttpMailApi::new("http://localhost:8000/api/", Duration::from_secs(1))
            .expect("valid base");
        let url = api.endpoint(Feed::Replies.path());
        assert_eq!(url.as_str(), "http://localhost:8000/api/gmail/last_with_replies");
    }

    #[test]
    fn endpoints_on_bare_host() {
        let api =
            HttpMailApi::new("http://localhost:8000", Duration::from_secs(1)).expect("valid base");
        let url = api.endpoint("/gmail/send");
        assert_eq!(url.as_str(), "http://localhost:8000/gmail/send");
    }

    #[test]
    fn error_body_is_kept_verbatim() {
        let err = remote_error::<String>(422, Ok(r#"{"detail":"bad"}"#.into()));
        assert!(matches!(
            err,
            ApiError::Remote { status: 422, ref body } if body == r#"{"detail":"bad"}"#
        ));
    }

    #[test]
    fn unreadable_error_body_is_a_transport_failure() {
        let err = remote_error(500, Err("connection reset"));
        assert!(matches!(err, ApiError::Transport(ref msg) if msg.contains("connection reset")));
    }

    #[test]
    fn rejects_non_url_base() {
        assert!(HttpMailApi::new("not a url", Duration::from_secs(1)).is_err());
    }
}
