use std::time::{Duration, Instant};

/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Validation,
    Error,
}

/// Short-lived message shown in the status line of a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    expires_at: Instant,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            expires_at: Instant::now() + NOTICE_TTL,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Validation, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Drops `notice` once it has expired.
pub fn expire(notice: &mut Option<Notice>, now: Instant) {
    if notice.as_ref().is_some_and(|n| n.is_expired(now)) {
        *notice = None;
    }
}
