//! Chat transcript

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Maximum transcript entries to keep
const MAX_ENTRIES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub speaker: Speaker,
    pub text: String,
    pub time: DateTime<Utc>,
}

/// Newest-first list of chat messages
#[derive(Debug, Default)]
pub struct Transcript {
    messages: VecDeque<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: VecDeque::with_capacity(MAX_ENTRIES),
        }
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        if self.messages.len() >= MAX_ENTRIES {
            self.messages.pop_back();
        }
        self.messages.push_front(Message {
            speaker,
            text: text.into(),
            time: Utc::now(),
        });
    }

    /// Messages, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn latest(&self) -> Option<&Message> {
        self.messages.front()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
