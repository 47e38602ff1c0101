mod conversation;
mod reply;
mod scheduler;
mod types;
mod widget;

pub use conversation::{Conversation, Observer};
pub use reply::{keyword_reply, ReplySelector, FALLBACK_REPLIES};
pub use scheduler::{ReplyScheduler, DEFAULT_REPLY_DELAY};
pub use types::*;
pub use widget::ChatWidget;
