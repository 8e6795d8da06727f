use mpdcore::interface::{MotionUpdate, ScanMessage};
use std::sync::{Arc, Mutex, PoisonError};

/// Single-slot mailbox: a new message replaces any unread one.
#[derive(Debug)]
pub struct Mailbox<T> {
    slot: Mutex<Option<T>>,
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Stores `message`; returns true when an unread message was dropped.
    pub fn post(&self, message: T) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(message)
            .is_some()
    }

    pub fn take(&self) -> Option<T> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Inbound mailboxes drained by the detector loop once per tick.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    pub scans: Arc<Mailbox<ScanMessage>>,
    pub motion: Arc<Mailbox<MotionUpdate>>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_message_wins() {
        let mailbox = Mailbox::new();
        assert!(!mailbox.post(1));
        assert!(mailbox.post(2));
        assert_eq!(mailbox.take(), Some(2));
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn inbox_clones_share_slots() {
        let inbox = Inbox::new();
        let producer = inbox.clone();
        producer.motion.post(MotionUpdate::new(false));
        assert_eq!(inbox.motion.take(), Some(MotionUpdate::new(false)));
    }
}
