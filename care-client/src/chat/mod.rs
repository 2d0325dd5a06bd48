//! Conversation messaging
//!
//! - [`feed`]: polling subscription to one conversation
//! - [`timeline`]: scroll anchoring and the "N new messages" counter
//! - [`attachment`]: filename markers carried in message text

pub mod attachment;
pub mod feed;
pub mod timeline;

pub use attachment::{split_attachment, with_attachment};
pub use feed::{ConversationFeed, FeedEvent, FeedSubscription};
pub use timeline::{MessageTimeline, ScrollAction};
