//! Player-facing notices.

/// Audio cue for a thief being caught.
pub const AUDIO_ALARM: &str = "alarm";
/// Audio cue for a finished investigation.
pub const AUDIO_GAVEL: &str = "gavel";

/// Anything that can show the player a message.
pub trait NoticeSink {
    /// Show `message`, optionally with an audio cue.
    fn display(&mut self, message: &str, audio: Option<&str>);
}

/// A single message shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// The text.
    pub message: String,
    /// Audio cue, if any.
    pub audio: Option<String>,
}

/// Collects notices in memory.
#[derive(Debug, Clone)]
pub struct NoticeLog {
    notices: Vec<Notice>,
    max_notices: usize,
}

impl NoticeLog {
    /// Create a log that keeps at most `max_notices` entries.
    pub fn new(max_notices: usize) -> Self {
        Self {
            notices: Vec::new(),
            max_notices,
        }
    }

    /// All retained notices, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// The most recent `n` notices.
    pub fn recent(&self, n: usize) -> &[Notice] {
        let start = self.notices.len().saturating_sub(n);
        &self.notices[start..]
    }

    /// Drain everything, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Number of retained notices.
    pub fn len(&self) -> usize {
        self.notices.len()
    }

    /// Returns true if nothing has been shown.
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self::new(1_000)
    }
}

impl NoticeSink for NoticeLog {
    fn display(&mut self, message: &str, audio: Option<&str>) {
        tracing::debug!(text = message, ?audio, "notice");
        self.notices.push(Notice {
            message: message.to_string(),
            audio: audio.map(str::to_string),
        });
        if self.notices.len() > self.max_notices {
            let excess = self.notices.len() - self.max_notices;
            self.notices.drain(..excess);
        }
    }
}
