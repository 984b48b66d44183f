use anyhow::{Result, anyhow};
use keyring::{Entry, Error as KeyringError};

const SERVICE: &str = "mail_chat";
const TOKEN_ENV: &str = "MAIL_CHAT_TOKEN";

/// Save the backend bearer token into the OS keyring, keyed by api base URL
pub fn save_token(api_base: &str, token: &str) -> Result<()> {
    let entry = Entry::new(SERVICE, api_base);
    entry?
        .set_password(token)
        .map_err(|e| anyhow!(e.to_string()))?;
    Ok(())
}

/// Load the bearer token for the given api base URL
pub fn load_token(api_base: &str) -> Result<Option<String>> {
    let entry = Entry::new(SERVICE, api_base);
    match entry?.get_password() {
        Ok(v) => Ok(Some(v)),
        Err(KeyringError::NoEntry) => Ok(None),
        Err(e) => Err(anyhow!(e.to_string())),
    }
}

/// Remove the stored token; a missing entry is not an error
pub fn delete_token(api_base: &str) -> Result<()> {
    let entry = Entry::new(SERVICE, api_base);
    match entry?.delete_credential() {
        Ok(()) | Err(KeyringError::NoEntry) => Ok(()),
        Err(e) => Err(anyhow!(e.to_string())),
    }
}

/// Keyring first, then the `MAIL_CHAT_TOKEN` environment variable.
pub fn resolve_token(api_base: &str) -> Result<String> {
    if let Some(t) = load_token(api_base)? {
        return Ok(t);
    }
    std::env::var(TOKEN_ENV)
        .ok()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| anyhow!("no token stored for {api_base}; run `mail_chat login` or set {TOKEN_ENV}"))
}
