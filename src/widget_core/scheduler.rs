use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

use super::types::{PendingReply, ReplyTicket};

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(600);

/// Delays bot replies. One tokio task per submission; every task still
/// running is aborted when the scheduler goes away.
///
/// A ticket stays live from `schedule` until it is claimed with `settle`
/// or dropped by `cancel_all`. Replies for tickets that are no longer live
/// must be ignored by the receiver.
pub struct ReplyScheduler {
    tx: Sender<PendingReply>,
    delay: Duration,
    next_ticket: u64,
    live: HashMap<ReplyTicket, JoinHandle<()>>,
    closed: bool,
}

impl ReplyScheduler {
    pub fn new(tx: Sender<PendingReply>, delay: Duration) -> ReplyScheduler {
        ReplyScheduler {
            tx,
            delay,
            next_ticket: 0,
            live: HashMap::new(),
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Must be called from within a tokio runtime. Returns `None` once the
    /// scheduler has been closed.
    pub fn schedule(&mut self, text: String) -> Option<ReplyTicket> {
        if self.closed {
            return None;
        }

        let ticket = ReplyTicket(self.next_ticket);
        self.next_ticket += 1;

        let tx = self.tx.clone();
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!(ticket = ticket.0, "reply timer fired");
            if tx.send(PendingReply { ticket, text }).await.is_err() {
                tracing::debug!(ticket = ticket.0, "reply dropped, widget is gone");
            }
        });
        self.live.insert(ticket, task);
        Some(ticket)
    }

    /// Claims a fired reply. `false` when the ticket was never issued here,
    /// was already claimed, or was cancelled.
    pub fn settle(&mut self, ticket: ReplyTicket) -> bool {
        self.live.remove(&ticket).is_some()
    }

    /// Replies whose timer has not fired yet.
    pub fn in_flight(&self) -> usize {
        self.live.values().filter(|task| !task.is_finished()).count()
    }

    pub fn cancel_all(&mut self) {
        for (_, task) in self.live.drain() {
            task.abort();
        }
    }

    /// Cancels everything and refuses further work.
    pub fn close(&mut self) {
        self.closed = true;
        self.cancel_all();
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.close();
    }
}
