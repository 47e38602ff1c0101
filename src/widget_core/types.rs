use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Bot",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// One entry of the chat log. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Message {
        Message {
            sender,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Message {
        Message::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Message {
        Message::new(Sender::Bot, text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    pub is_open: bool,
    pub messages: Vec<Message>,
    pub draft: String,
}

impl ConversationState {
    pub fn to_json(&self) -> Value {
        let messages: Vec<Value> = self
            .messages
            .iter()
            .map(|msg| json!({ "sender": msg.sender.as_str(), "text": msg.text }))
            .collect();
        json!({
            "is_open": self.is_open,
            "messages": messages,
            "draft": self.draft,
        })
    }
}

/// Which part of the state a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Visibility,
    Messages,
    Draft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    Empty,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReplyTicket(pub u64);

/// Posted by a fired reply timer. Carries the text as it was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub ticket: ReplyTicket,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Sender::User.label(), "You");
        assert_eq!(Sender::Bot.label(), "Bot");
    }

    #[test]
    fn test_snapshot_json() {
        let state = ConversationState {
            is_open: true,
            messages: vec![Message::bot("hey"), Message::user("yo")],
            draft: "typing".into(),
        };
        let snapshot = state.to_json();
        assert_eq!(snapshot["is_open"], true);
        assert_eq!(snapshot["draft"], "typing");
        assert_eq!(snapshot["messages"][0]["sender"], "bot");
        assert_eq!(snapshot["messages"][1]["text"], "yo");
    }
}
