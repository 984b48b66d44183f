use crate::domain::email::{DisplayIndex, SendEmailRequest};

/// An irreversible action waiting for `yes` / `no`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    SendNewEmail(SendEmailRequest),
    SendReply {
        /// shown in prompts only, never sent
        index: DisplayIndex,
        to_email: String,
        subject: String,
        body: String,
    },
}

/// Holds at most one [`PendingAction`].
#[derive(Debug, Clone, Default)]
pub struct PendingSlot {
    action: Option<PendingAction>,
}

impl PendingSlot {
    /// Last write wins; callers decide whether overwriting is allowed.
    pub fn set(&mut self, action: PendingAction) {
        self.action = Some(action);
    }

    pub fn clear(&mut self) {
        self.action = None;
    }

    pub fn get(&self) -> Option<&PendingAction> {
        self.action.as_ref()
    }

    pub fn take(&mut self) -> Option<PendingAction> {
        self.action.take()
    }

    pub fn is_set(&self) -> bool {
        self.action.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_email() -> PendingAction {
        PendingAction::SendNewEmail(SendEmailRequest {
            to: "a@b.com".into(),
            subject: "Hi".into(),
            body: "Hello".into(),
        })
    }

    #[test]
    fn set_overwrites_and_take_empties() {
        let mut slot = PendingSlot::default();
        slot.set(new_email());
        slot.set(PendingAction::SendReply {
            index: 2,
            to_email: "c@d.com".into(),
            subject: "Re: x".into(),
            body: "ok".into(),
        });
        assert!(matches!(slot.get(), Some(PendingAction::SendReply { index: 2, .. })));

        assert!(slot.take().is_some());
        assert!(!slot.is_set());
        assert!(slot.take().is_none());
    }
}
