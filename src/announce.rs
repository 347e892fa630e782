//! Announcement channel owned by one application instance.
//!
//! Screen-reader style status messages ("You're #12 on the waitlist") are
//! published here. The announcer is created with the application state and
//! passed around explicitly, so announcements from one app never reach
//! listeners registered on another.

use crate::i18n::Locale;
use serde::Serialize;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Announcement {
    pub locale: Locale,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Announcer {
    sender: broadcast::Sender<Announcement>,
}

impl Announcer {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Register a listener. Receives announcements published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Announcement> {
        self.sender.subscribe()
    }

    /// Publish to every current listener. Returns how many received it.
    pub fn announce(&self, locale: Locale, message: impl Into<String>) -> usize {
        self.sender
            .send(Announcement {
                locale,
                message: message.into(),
            })
            .unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for Announcer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> Locale {
        Locale::from_code("en").unwrap()
    }

    #[tokio::test]
    async fn test_subscriber_receives_announcement() {
        let announcer = Announcer::default();
        let mut rx = announcer.subscribe();

        assert_eq!(announcer.announce(english(), "Joined"), 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.message, "Joined");
        assert_eq!(received.locale, english());
    }

    #[test]
    fn test_announce_without_listeners_is_not_an_error() {
        let announcer = Announcer::default();
        assert_eq!(announcer.announce(english(), "nobody hears this"), 0);
    }

    #[tokio::test]
    async fn test_separate_announcers_are_isolated() {
        let first = Announcer::default();
        let second = Announcer::default();
        let mut first_rx = first.subscribe();
        let mut second_rx = second.subscribe();

        first.announce(english(), "only for first");

        assert_eq!(first_rx.recv().await.unwrap().message, "only for first");
        assert!(second_rx.try_recv().is_err());
    }

    #[test]
    fn test_clones_share_the_channel() {
        let announcer = Announcer::default();
        let clone = announcer.clone();
        let _rx = announcer.subscribe();

        assert_eq!(clone.subscriber_count(), 1);
        assert_eq!(clone.announce(english(), "shared"), 1);
    }
}
