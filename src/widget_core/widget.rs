use tokio::sync::mpsc;

use super::conversation::Conversation;
use super::reply::ReplySelector;
use super::scheduler::ReplyScheduler;
use super::types::*;
use crate::config::WidgetConfig;

/// One widget instance: the conversation plus the timers feeding it replies.
///
/// Fired timers arrive on the receiving end of `tx`; pass each one to
/// [`ChatWidget::deliver`]. Dropping the widget aborts replies still pending.
pub struct ChatWidget {
    conversation: Conversation,
    scheduler: ReplyScheduler,
}

impl ChatWidget {
    pub fn new(config: &WidgetConfig, tx: mpsc::Sender<PendingReply>) -> ChatWidget {
        ChatWidget::with_selector(config, tx, ReplySelector::new())
    }

    pub fn with_selector(
        config: &WidgetConfig,
        tx: mpsc::Sender<PendingReply>,
        selector: ReplySelector,
    ) -> ChatWidget {
        ChatWidget {
            conversation: Conversation::with_selector(config.greeting.clone(), selector),
            scheduler: ReplyScheduler::new(tx, config.reply_delay),
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&ConversationState, Change) + 'static) {
        self.conversation.subscribe(observer);
    }

    pub fn toggle(&mut self) {
        self.conversation.toggle();
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.conversation.update_draft(text);
    }

    /// No-op once the widget is shut down: a user message is only logged
    /// when its reply can still be scheduled.
    pub fn submit(&mut self) -> Option<ReplyTicket> {
        if self.scheduler.is_closed() {
            return None;
        }
        let text = self.conversation.submit()?;
        self.schedule(text)
    }

    pub fn on_key_event(&mut self, key: &str) -> Option<ReplyTicket> {
        if self.scheduler.is_closed() {
            return None;
        }
        let text = self.conversation.on_key_event(key)?;
        self.schedule(text)
    }

    /// Appends the bot reply for a fired timer. Replies for tickets this
    /// widget did not issue, already answered, or cancelled are dropped.
    pub fn deliver(&mut self, reply: PendingReply) -> bool {
        if !self.scheduler.settle(reply.ticket) {
            tracing::debug!(ticket = reply.ticket.0, "stale reply ignored");
            return false;
        }
        self.conversation.on_reply_timer(&reply.text);
        true
    }

    pub fn pending_replies(&self) -> usize {
        self.scheduler.in_flight()
    }

    pub fn shutdown(&mut self) {
        self.scheduler.close();
    }

    fn schedule(&mut self, text: String) -> Option<ReplyTicket> {
        let ticket = self.scheduler.schedule(text)?;
        tracing::debug!(ticket = ticket.0, "reply scheduled");
        Some(ticket)
    }
}
