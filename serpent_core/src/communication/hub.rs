use crate::core::node::{LogSummary, NodeInfo};
use crate::error::{SerpentError, SerpentResult};
use crossbeam::queue::ArrayQueue;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub const DEFAULT_CAPACITY: usize = 1024;

type AnyTopic = Arc<dyn Any + Send + Sync>;

/// Process-wide topic registry: topic name -> shared queue
static TOPICS: Lazy<Mutex<HashMap<String, AnyTopic>>> = Lazy::new(|| Mutex::new(HashMap::new()));

struct Topic<T> {
    queue: ArrayQueue<T>,
    metrics: AtomicHubMetrics,
}

#[derive(Debug, Default)]
struct AtomicHubMetrics {
    messages_sent: AtomicU64,
    messages_received: AtomicU64,
    send_failures: AtomicU64,
}

impl AtomicHubMetrics {
    fn snapshot(&self) -> HubMetrics {
        HubMetrics {
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            messages_received: self.messages_received.load(Ordering::Relaxed),
            send_failures: self.send_failures.load(Ordering::Relaxed),
        }
    }
}

/// Per-topic counters, shared by every Hub on the topic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubMetrics {
    pub messages_sent: u64,
    pub messages_received: u64,
    pub send_failures: u64,
}

/// Handle to a named topic for publishing and receiving messages
pub struct Hub<T> {
    topic: Arc<Topic<T>>,
    topic_name: String,
}

impl<T> Clone for Hub<T> {
    fn clone(&self) -> Self {
        Self {
            topic: self.topic.clone(),
            topic_name: self.topic_name.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Hub<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("topic_name", &self.topic_name)
            .field("pending", &self.topic.queue.len())
            .finish_non_exhaustive()
    }
}

impl<T: Send + Sync + 'static> Hub<T> {
    /// Attach to `topic_name`, creating it with [`DEFAULT_CAPACITY`] on first use
    pub fn new(topic_name: &str) -> SerpentResult<Self> {
        Self::attach(topic_name, None)
    }

    /// Attach to a topic that must hold exactly `capacity` messages
    ///
    /// Fails when the topic already exists with a different capacity, so
    /// creation order between publishers and subscribers cannot silently
    /// change queue semantics.
    pub fn new_with_capacity(topic_name: &str, capacity: usize) -> SerpentResult<Self> {
        if capacity == 0 {
            return Err(SerpentError::communication(format!(
                "topic '{}' needs a capacity of at least 1",
                topic_name
            )));
        }
        Self::attach(topic_name, Some(capacity))
    }

    fn attach(topic_name: &str, capacity: Option<usize>) -> SerpentResult<Self> {
        if topic_name.is_empty() {
            return Err(SerpentError::communication("topic name must not be empty"));
        }

        let mut topics = TOPICS.lock();
        let entry = topics
            .entry(topic_name.to_string())
            .or_insert_with(|| {
                Arc::new(Topic::<T> {
                    queue: ArrayQueue::new(capacity.unwrap_or(DEFAULT_CAPACITY)),
                    metrics: AtomicHubMetrics::default(),
                }) as AnyTopic
            })
            .clone();
        drop(topics);

        let topic = entry.downcast::<Topic<T>>().map_err(|_| {
            SerpentError::communication(format!(
                "topic '{}' is already bound to a different message type than {}",
                topic_name,
                std::any::type_name::<T>()
            ))
        })?;

        if let Some(requested) = capacity {
            let existing = topic.queue.capacity();
            if existing != requested {
                return Err(SerpentError::communication(format!(
                    "topic '{}' already exists with capacity {}, requested {}",
                    topic_name, existing, requested
                )));
            }
        }

        Ok(Hub {
            topic,
            topic_name: topic_name.to_string(),
        })
    }

    /// Publish a message; hands the message back when the queue is full
    pub fn send(&self, msg: T, ctx: Option<&mut NodeInfo>) -> Result<(), T>
    where
        T: LogSummary,
    {
        // Summary is taken before the message moves into the queue
        let summary = ctx.as_ref().map(|_| msg.log_summary());

        match self.topic.queue.push(msg) {
            Ok(()) => {
                self.topic.metrics.messages_sent.fetch_add(1, Ordering::Relaxed);
                if let (Some(ctx), Some(summary)) = (ctx, summary) {
                    ctx.log_pub_summary(&self.topic_name, &summary);
                }
                Ok(())
            }
            Err(msg) => {
                self.topic.metrics.send_failures.fetch_add(1, Ordering::Relaxed);
                if let Some(ctx) = ctx {
                    ctx.log_warning(&format!("topic '{}' is full, message dropped", self.topic_name));
                }
                Err(msg)
            }
        }
    }

    /// Publish a message, evicting the oldest pending one when the queue is full
    ///
    /// For latest-value topics such as rendered frames, where a slow
    /// subscriber should see the newest message rather than a backlog.
    pub fn send_overwrite(&self, msg: T, ctx: Option<&mut NodeInfo>) -> Option<T>
    where
        T: LogSummary,
    {
        if let Some(ctx) = ctx {
            ctx.log_pub_summary(&self.topic_name, &msg.log_summary());
        }
        self.topic.metrics.messages_sent.fetch_add(1, Ordering::Relaxed);
        self.topic.queue.force_push(msg)
    }

    /// Receive the oldest pending message, if any
    pub fn recv(&self, ctx: Option<&mut NodeInfo>) -> Option<T>
    where
        T: LogSummary,
    {
        let msg = self.topic.queue.pop()?;
        self.topic.metrics.messages_received.fetch_add(1, Ordering::Relaxed);
        if let Some(ctx) = ctx {
            ctx.log_sub_summary(&self.topic_name, &msg.log_summary());
        }
        Some(msg)
    }

    /// Drain every pending message and keep only the newest
    pub fn recv_latest(&self, mut ctx: Option<&mut NodeInfo>) -> Option<T>
    where
        T: LogSummary,
    {
        let mut latest = None;
        while let Some(msg) = self.recv(ctx.as_deref_mut()) {
            latest = Some(msg);
        }
        latest
    }

    pub fn pending(&self) -> usize {
        self.topic.queue.len()
    }

    pub fn capacity(&self) -> usize {
        self.topic.queue.capacity()
    }

    pub fn get_metrics(&self) -> HubMetrics {
        self.topic.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_topic_shares_queue() {
        let publisher: Hub<u32> = Hub::new("hub_test/shared").unwrap();
        let subscriber: Hub<u32> = Hub::new("hub_test/shared").unwrap();

        publisher.send(7, None).unwrap();
        publisher.send(8, None).unwrap();

        assert_eq!(subscriber.recv(None), Some(7));
        assert_eq!(subscriber.recv(None), Some(8));
        assert_eq!(subscriber.recv(None), None);
    }

    #[test]
    fn test_type_mismatch_is_rejected() {
        let _first: Hub<u32> = Hub::new("hub_test/typed").unwrap();
        let second = Hub::<String>::new("hub_test/typed");
        assert!(matches!(second, Err(SerpentError::Communication(_))));
    }

    #[test]
    fn test_full_queue_returns_message() {
        let hub: Hub<u64> = Hub::new_with_capacity("hub_test/full", 2).unwrap();
        hub.send(1, None).unwrap();
        hub.send(2, None).unwrap();

        assert_eq!(hub.send(3, None), Err(3));
        assert_eq!(hub.get_metrics().send_failures, 1);
        assert_eq!(hub.pending(), 2);
    }

    #[test]
    fn test_overwrite_keeps_newest() {
        let hub: Hub<u64> = Hub::new_with_capacity("hub_test/overwrite", 2).unwrap();
        assert_eq!(hub.send_overwrite(1, None), None);
        assert_eq!(hub.send_overwrite(2, None), None);
        assert_eq!(hub.send_overwrite(3, None), Some(1));

        assert_eq!(hub.recv(None), Some(2));
        assert_eq!(hub.recv(None), Some(3));
        assert_eq!(hub.get_metrics().send_failures, 0);
    }

    #[test]
    fn test_capacity_conflict_is_rejected() {
        let subscriber: Hub<u64> = Hub::new("hub_test/conflict").unwrap();
        assert_eq!(subscriber.capacity(), DEFAULT_CAPACITY);

        let err = Hub::<u64>::new_with_capacity("hub_test/conflict", 4).unwrap_err();
        assert!(matches!(err, SerpentError::Communication(_)));
    }

    #[test]
    fn test_plain_attach_keeps_requested_capacity() {
        let publisher: Hub<u64> = Hub::new_with_capacity("hub_test/sized", 4).unwrap();
        let subscriber: Hub<u64> = Hub::new("hub_test/sized").unwrap();
        let again: Hub<u64> = Hub::new_with_capacity("hub_test/sized", 4).unwrap();

        assert_eq!(publisher.capacity(), 4);
        assert_eq!(subscriber.capacity(), 4);
        assert_eq!(again.capacity(), 4);
    }

    #[test]
    fn test_recv_latest_drains() {
        let hub: Hub<u64> = Hub::new("hub_test/latest").unwrap();
        for i in 0..5 {
            hub.send(i, None).unwrap();
        }

        assert_eq!(hub.recv_latest(None), Some(4));
        assert_eq!(hub.pending(), 0);
        assert_eq!(hub.get_metrics().messages_received, 5);
    }

    #[test]
    fn test_context_counts_messages() {
        let hub: Hub<String> = Hub::new("hub_test/ctx").unwrap();
        let mut ctx = NodeInfo::new("hub_test_node".to_string(), false);

        hub.send("hello".to_string(), Some(&mut ctx)).unwrap();
        let got = hub.recv(Some(&mut ctx));

        assert_eq!(got.as_deref(), Some("hello"));
        assert_eq!(ctx.metrics().messages_sent, 1);
        assert_eq!(ctx.metrics().messages_received, 1);
    }

    #[test]
    fn test_invalid_topic_arguments() {
        assert!(Hub::<u32>::new("").is_err());
        assert!(Hub::<u32>::new_with_capacity("hub_test/zero", 0).is_err());
    }
}
