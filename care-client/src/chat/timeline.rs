//! Scroll anchoring for an open conversation

use std::collections::HashSet;

use shared::models::Message;

/// What the view should do after the timeline changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    /// Nothing new
    None,
    ScrollToBottom,
    /// Viewport is away from the bottom; show "N new messages"
    ShowNewBadge(usize),
}

/// Messages of one conversation plus the viewport's bottom anchor
#[derive(Debug, Clone)]
pub struct MessageTimeline {
    self_id: i64,
    messages: Vec<Message>,
    seen: HashSet<i64>,
    at_bottom: bool,
    unseen: usize,
}

impl MessageTimeline {
    /// `self_id` is the signed-in user; their own messages always scroll
    pub fn new(self_id: i64) -> Self {
        Self {
            self_id,
            messages: Vec::new(),
            seen: HashSet::new(),
            at_bottom: true,
            unseen: 0,
        }
    }

    /// Initial load or refresh: replace everything and jump to the bottom
    pub fn replace(&mut self, messages: Vec<Message>) -> ScrollAction {
        self.seen = messages.iter().map(|m| m.id).collect();
        self.messages = messages;
        self.unseen = 0;
        self.at_bottom = true;
        ScrollAction::ScrollToBottom
    }

    /// Merge polled or sent messages, skipping ids already shown
    pub fn append(&mut self, incoming: impl IntoIterator<Item = Message>) -> ScrollAction {
        let mut from_others = 0;
        let mut from_self = false;

        for message in incoming {
            if !self.seen.insert(message.id) {
                continue;
            }
            if message.sender_id == self.self_id {
                from_self = true;
            } else {
                from_others += 1;
            }
            self.messages.push(message);
        }

        if from_others == 0 && !from_self {
            return ScrollAction::None;
        }
        if self.at_bottom || from_self {
            self.unseen = 0;
            self.at_bottom = true;
            return ScrollAction::ScrollToBottom;
        }
        self.unseen += from_others;
        ScrollAction::ShowNewBadge(self.unseen)
    }

    /// Viewport bottom sentinel entered or left the visible area
    pub fn set_at_bottom(&mut self, at_bottom: bool) {
        self.at_bottom = at_bottom;
        if at_bottom {
            self.unseen = 0;
        }
    }

    pub fn is_at_bottom(&self) -> bool {
        self.at_bottom
    }

    pub fn unseen(&self) -> usize {
        self.unseen
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
