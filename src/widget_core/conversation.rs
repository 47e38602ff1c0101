//! The widget's state machine: visibility, the message log and the draft.
//!
//! Nothing here knows about timers or the DOM. `submit` hands back the text
//! that needs a reply and whoever owns the conversation decides when to call
//! [`Conversation::on_reply_timer`].

use super::reply::ReplySelector;
use super::types::*;

pub type Observer = Box<dyn FnMut(&ConversationState, Change)>;

pub struct Conversation {
    state: ConversationState,
    selector: ReplySelector,
    observers: Vec<Observer>,
    has_history: bool,
    scroll_seq: u64,
}

impl Conversation {
    pub fn new(greeting: impl Into<String>) -> Conversation {
        Conversation::with_selector(greeting, ReplySelector::new())
    }

    pub fn with_selector(greeting: impl Into<String>, selector: ReplySelector) -> Conversation {
        Conversation {
            state: ConversationState {
                is_open: false,
                messages: vec![Message::bot(greeting)],
                draft: String::new(),
            },
            selector,
            observers: Vec::new(),
            has_history: false,
            scroll_seq: 0,
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    pub fn draft(&self) -> &str {
        &self.state.draft
    }

    /// Bumped on every append. The view scrolls to the newest message
    /// whenever this changes.
    pub fn scroll_seq(&self) -> u64 {
        self.scroll_seq
    }

    /// `Empty` only while the greeting is the sole message. Latches to
    /// `List` the first time anything else is appended.
    pub fn panel_mode(&self) -> PanelMode {
        if self.has_history {
            PanelMode::List
        } else {
            PanelMode::Empty
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&ConversationState, Change) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn toggle(&mut self) {
        self.state.is_open = !self.state.is_open;
        tracing::debug!(is_open = self.state.is_open, "chat panel toggled");
        self.notify(Change::Visibility);
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.state.draft = text.into();
        self.notify(Change::Draft);
    }

    /// Moves the draft into the log. Returns the submitted text, or `None`
    /// when the draft is blank and nothing happened.
    pub fn submit(&mut self) -> Option<String> {
        if self.state.draft.trim().is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.state.draft);
        tracing::debug!(len = text.len(), "user message submitted");
        self.append(Message::user(text.clone()));
        Some(text)
    }

    pub fn on_key_event(&mut self, key: &str) -> Option<String> {
        match key {
            "Enter" => self.submit(),
            _ => None,
        }
    }

    pub fn on_reply_timer(&mut self, original_text: &str) {
        let reply = self.selector.select(original_text);
        tracing::debug!(%reply, "bot reply ready");
        self.append(Message::bot(reply));
    }

    fn append(&mut self, msg: Message) {
        self.state.messages.push(msg);
        if self.state.messages.len() > 1 {
            self.has_history = true;
        }
        self.scroll_seq += 1;
        self.notify(Change::Messages);
    }

    fn notify(&mut self, change: Change) {
        tracing::trace!(?change, state = %self.state.to_json(), "render requested");
        for observer in self.observers.iter_mut() {
            observer(&self.state, change);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;

    const GREETING: &str = "Hi there! How can I help you today?";

    fn conversation() -> Conversation {
        Conversation::with_selector(GREETING, ReplySelector::with_seed(3))
    }

    #[test]
    fn test_initial_state() {
        let conv = conversation();
        assert!(!conv.is_open());
        assert_eq!(conv.messages(), &[Message::bot(GREETING)]);
        assert_eq!(conv.draft(), "");
        assert_eq!(conv.panel_mode(), PanelMode::Empty);
    }

    #[test]
    fn test_toggle_twice() {
        let mut conv = conversation();
        conv.update_draft("half typed");
        conv.toggle();
        assert!(conv.is_open());
        conv.toggle();
        assert!(!conv.is_open());
        assert_eq!(conv.messages().len(), 1);
        assert_eq!(conv.draft(), "half typed");
    }

    #[test]
    fn test_submit_clears_draft() {
        let mut conv = conversation();
        conv.update_draft("  hello  ");
        assert_eq!(conv.submit().as_deref(), Some("  hello  "));
        assert_eq!(conv.draft(), "");
        assert_eq!(conv.messages().last(), Some(&Message::user("  hello  ")));
        // reply has not arrived yet
        assert_eq!(conv.messages().len(), 2);
    }

    #[test]
    fn test_reply_uses_given_text() {
        let mut conv = conversation();
        conv.update_draft("what about weather today");
        let submitted = conv.submit().unwrap();
        conv.update_draft("hello");
        conv.on_reply_timer(&submitted);
        let last = conv.messages().last().unwrap();
        assert_eq!(last.sender, Sender::Bot);
        assert!(last.text.contains("umbrella"));
    }

    #[test]
    fn test_enter_submits() {
        let mut conv = conversation();
        conv.update_draft("hi");
        assert_eq!(conv.on_key_event("a"), None);
        assert_eq!(conv.messages().len(), 1);
        assert_eq!(conv.on_key_event("Enter").as_deref(), Some("hi"));
        assert_eq!(conv.messages().len(), 2);
    }

    #[test]
    fn test_panel_mode_latches() {
        let mut conv = conversation();
        conv.update_draft("hi");
        conv.submit();
        assert_eq!(conv.panel_mode(), PanelMode::List);
        conv.on_reply_timer("hi");
        assert_eq!(conv.panel_mode(), PanelMode::List);
    }

    #[test]
    fn test_scroll_seq_follows_appends() {
        let mut conv = conversation();
        assert_eq!(conv.scroll_seq(), 0);
        conv.update_draft("hi");
        conv.submit();
        conv.on_reply_timer("hi");
        conv.toggle();
        assert_eq!(conv.scroll_seq(), 2);
    }

    #[test]
    fn test_observers() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let mut conv = conversation();
        {
            let changes = changes.clone();
            conv.subscribe(move |state, change| {
                changes.borrow_mut().push((change, state.messages.len()));
            });
        }

        conv.toggle();
        conv.submit();
        conv.update_draft("hey");
        conv.submit();
        conv.on_reply_timer("hey");

        assert_eq!(
            *changes.borrow(),
            vec![
                (Change::Visibility, 1),
                (Change::Draft, 1),
                (Change::Messages, 2),
                (Change::Messages, 3),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_submit_appends_non_blank(text in ".*[^\\s].*") {
            let mut conv = conversation();
            conv.update_draft(text.clone());
            prop_assert_eq!(conv.submit(), Some(text.clone()));
            prop_assert_eq!(conv.messages().len(), 2);
            prop_assert_eq!(conv.messages().last(), Some(&Message::user(text)));
            prop_assert_eq!(conv.draft(), "");
        }

        #[test]
        fn prop_submit_ignores_blank(text in "\\s*") {
            let mut conv = conversation();
            conv.update_draft(text.clone());
            prop_assert_eq!(conv.submit(), None);
            prop_assert_eq!(conv.messages().len(), 1);
            prop_assert_eq!(conv.draft(), text.as_str());
        }
    }
}
