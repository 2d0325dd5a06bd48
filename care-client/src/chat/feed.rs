//! Conversation feed
//!
//! A subscription to one conversation. A background task polls the
//! messages endpoint on an interval while the view is visible and pushes
//! [`FeedEvent`]s to the subscriber. The task stops when the subscription
//! is cancelled or dropped, when the subscriber stops listening, or when
//! the session is gone.

use std::collections::HashSet;
use std::time::Duration;

use shared::models::Message;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::CareClient;

const EVENT_BUFFER: usize = 32;

/// Update pushed to the subscriber
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// First successful fetch: the whole conversation
    Loaded(Vec<Message>),
    /// Messages not seen in any earlier fetch, oldest first
    Appended(Vec<Message>),
    /// A fetch failed; polling continues unless the session is gone
    Failed(String),
}

/// Factory for conversation subscriptions
pub struct ConversationFeed;

impl ConversationFeed {
    /// Subscribe using the client's configured poll interval
    pub fn subscribe(client: CareClient, conversation_id: i64) -> FeedSubscription {
        let interval = client.config().poll_interval;
        Self::subscribe_with_interval(client, conversation_id, interval)
    }

    pub fn subscribe_with_interval(
        client: CareClient,
        conversation_id: i64,
        interval: Duration,
    ) -> FeedSubscription {
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let (visible_tx, visible_rx) = watch::channel(true);
        let cancel = CancellationToken::new();

        let task = tokio::spawn(
            Poller {
                client,
                conversation_id,
                interval,
                events: events_tx,
                visible: visible_rx,
                cancel: cancel.clone(),
                seen: HashSet::new(),
                loaded: false,
            }
            .run(),
        );

        FeedSubscription {
            events: events_rx,
            visible: visible_tx,
            cancel,
            task: Some(task),
        }
    }
}

/// Handle to a running feed; dropping it stops the poller
#[derive(Debug)]
pub struct FeedSubscription {
    events: mpsc::Receiver<FeedEvent>,
    visible: watch::Sender<bool>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl FeedSubscription {
    /// Next event; `None` once the poller has stopped
    pub async fn next(&mut self) -> Option<FeedEvent> {
        self.events.recv().await
    }

    /// Pause polling while hidden; becoming visible polls right away
    pub fn set_visible(&self, visible: bool) {
        self.visible.send_replace(visible);
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Cancel and wait for the poller to exit
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        // Unblocks a poller waiting on a full buffer
        self.events.close();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            tracing::warn!("Conversation feed task ended abnormally: {}", e);
        }
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Poller {
    client: CareClient,
    conversation_id: i64,
    interval: Duration,
    events: mpsc::Sender<FeedEvent>,
    visible: watch::Receiver<bool>,
    cancel: CancellationToken,
    seen: HashSet<i64>,
    loaded: bool,
}

impl Poller {
    async fn run(mut self) {
        tracing::debug!(conversation_id = self.conversation_id, "Conversation feed started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => break,

                changed = self.visible.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    if *self.visible.borrow_and_update() {
                        ticker.reset_immediately();
                    }
                }

                _ = ticker.tick() => {
                    if !*self.visible.borrow() {
                        continue;
                    }
                    if !self.poll().await {
                        break;
                    }
                }
            }
        }

        tracing::debug!(conversation_id = self.conversation_id, "Conversation feed stopped");
    }

    /// One fetch; `false` means stop
    async fn poll(&mut self) -> bool {
        let chats = self.client.chats();
        let fetched = tokio::select! {
            _ = self.cancel.cancelled() => return false,
            result = chats.messages(self.conversation_id) => result,
        };

        let event = match fetched {
            Ok(messages) if !self.loaded => {
                self.loaded = true;
                self.seen = messages.iter().map(|m| m.id).collect();
                FeedEvent::Loaded(messages)
            }
            Ok(messages) => {
                let fresh: Vec<Message> = messages
                    .into_iter()
                    .filter(|m| self.seen.insert(m.id))
                    .collect();
                if fresh.is_empty() {
                    return true;
                }
                FeedEvent::Appended(fresh)
            }
            Err(e) if e.is_auth() => {
                tracing::warn!("Conversation feed stopping: {}", e);
                self.emit(FeedEvent::Failed(e.user_message("Sessão encerrada")))
                    .await;
                return false;
            }
            Err(e) => {
                tracing::error!(conversation_id = self.conversation_id, "Failed to poll messages: {}", e);
                FeedEvent::Failed(e.user_message("Erro ao carregar mensagens"))
            }
        };

        self.emit(event).await
    }

    /// Deliver one event; `false` once cancelled or the subscriber is gone
    async fn emit(&self, event: FeedEvent) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            sent = self.events.send(event) => sent.is_ok(),
        }
    }
}
