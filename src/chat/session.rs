use crate::chat::cache::EmailCache;
use crate::chat::pending::PendingSlot;
use crate::domain::email::Profile;

/// Never request fewer than this many drafts when suggesting a re-run.
pub const MIN_DRAFT_BATCH: u64 = 20;

/// Per-chat state threaded through the router.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub profile: Option<Profile>,
    pub cache: EmailCache,
    pub pending: PendingSlot,
    /// `max(N, MIN_DRAFT_BATCH)` of the last draft-replies request
    pub draft_window: u64,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            profile: None,
            cache: EmailCache::default(),
            pending: PendingSlot::default(),
            draft_window: MIN_DRAFT_BATCH,
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }
}
