use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    expires_at: Instant,
}

impl Notification {
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }
}

/// Toast stack. Each notification shows for a fixed window and expires on its own;
/// the stack keeps arrival order.
#[derive(Debug)]
pub struct Notifier {
    display: Duration,
    next_id: u64,
    stack: Vec<Notification>,
}

impl Notifier {
    pub fn new(display: Duration) -> Self {
        Self {
            display,
            next_id: 1,
            stack: Vec::new(),
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.stack.push(Notification {
            id,
            message: message.into(),
            kind,
            expires_at: Instant::now() + self.display,
        });
        id
    }

    /// Notifications still inside their display window, oldest first.
    pub fn active(&mut self) -> &[Notification] {
        let now = Instant::now();
        self.stack.retain(|n| n.expires_at > now);
        &self.stack
    }

    pub fn dismiss(&mut self, id: u64) {
        self.stack.retain(|n| n.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_notifications_expire_independently() {
        let mut notifier = Notifier::new(Duration::from_millis(3000));
        notifier.push("Dune added to watchlist", NotificationKind::Success);
        tokio::time::advance(Duration::from_millis(1000)).await;
        notifier.push("Alien removed from watchlist", NotificationKind::Error);

        let messages: Vec<&str> = notifier.active().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["Dune added to watchlist", "Alien removed from watchlist"]);

        tokio::time::advance(Duration::from_millis(2500)).await;
        let active = notifier.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].kind, NotificationKind::Error);

        tokio::time::advance(Duration::from_millis(1000)).await;
        assert!(notifier.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ids_are_unique_and_dismissable() {
        let mut notifier = Notifier::new(Duration::from_millis(3000));
        let a = notifier.push("a", NotificationKind::Success);
        let b = notifier.push("b", NotificationKind::Success);
        assert_ne!(a, b);

        notifier.dismiss(a);
        let active = notifier.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, b);
    }
}
