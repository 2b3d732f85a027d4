use futures::stream::BoxStream;
use futures::StreamExt;
use std::any::TypeId;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

type Spawner<Msg> = Box<dyn FnOnce(mpsc::UnboundedSender<Msg>) -> AbortHandle + Send>;

/// A long-lived event source owned by the runtime.
///
/// Models declare the subscriptions they want on every update; the runtime
/// starts the new ones and aborts the ones that disappeared, matching them by
/// [`SubscriptionId`].
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) spawn: Spawner<Msg>,
}

/// Identity used to diff subscriptions between update cycles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    type_id: TypeId,
    discriminant: u64,
}

impl SubscriptionId {
    pub fn new<T: 'static>(discriminant: u64) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant,
        }
    }

    /// Singleton id for a source type.
    pub fn of<T: 'static>() -> Self {
        Self::new::<T>(0)
    }
}

/// Pump `stream` into the update queue until either side goes away.
pub(crate) async fn forward<Msg: Send + 'static>(
    mut stream: BoxStream<'static, Msg>,
    tx: mpsc::UnboundedSender<Msg>,
) {
    while let Some(msg) = stream.next().await {
        if tx.send(msg).is_err() {
            break;
        }
    }
}

/// Starts, keeps, and aborts subscriptions between update cycles.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    active: HashMap<SubscriptionId, AbortHandle>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            active: HashMap::new(),
            msg_tx,
        }
    }

    pub fn reconcile(&mut self, wanted: Vec<Subscription<Msg>>) {
        let mut wanted: HashMap<SubscriptionId, Subscription<Msg>> =
            wanted.into_iter().map(|sub| (sub.id.clone(), sub)).collect();

        self.active.retain(|id, handle| {
            let keep = wanted.contains_key(id);
            if !keep {
                log::debug!("stopping subscription {id:?}");
                handle.abort();
            }
            keep
        });

        for (id, sub) in wanted.drain() {
            if !self.active.contains_key(&id) {
                log::debug!("starting subscription {id:?}");
                let handle = (sub.spawn)(self.msg_tx.clone());
                self.active.insert(id, handle);
            }
        }
    }

    pub fn shutdown(&mut self) {
        for (_, handle) in self.active.drain() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Keys;
    struct Ticks;

    fn pending(id: SubscriptionId) -> Subscription<i32> {
        Subscription {
            id,
            spawn: Box::new(|tx: mpsc::UnboundedSender<i32>| {
                tokio::spawn(forward(Box::pin(futures::stream::pending()), tx)).abort_handle()
            }),
        }
    }

    #[test]
    fn ids_compare_by_type_and_discriminant() {
        assert_eq!(SubscriptionId::of::<Keys>(), SubscriptionId::of::<Keys>());
        assert_ne!(SubscriptionId::of::<Keys>(), SubscriptionId::of::<Ticks>());
        assert_ne!(SubscriptionId::new::<Keys>(1), SubscriptionId::new::<Keys>(2));
    }

    #[tokio::test]
    async fn reconcile_starts_keeps_and_stops() {
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut manager = SubscriptionManager::new(tx);

        manager.reconcile(vec![pending(SubscriptionId::of::<Keys>())]);
        assert_eq!(manager.active_count(), 1);

        manager.reconcile(vec![
            pending(SubscriptionId::of::<Keys>()),
            pending(SubscriptionId::of::<Ticks>()),
        ]);
        assert_eq!(manager.active_count(), 2);

        manager.reconcile(vec![pending(SubscriptionId::of::<Ticks>())]);
        assert_eq!(manager.active_count(), 1);

        manager.shutdown();
        assert_eq!(manager.active_count(), 0);
    }

    #[tokio::test]
    async fn forward_delivers_items_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel::<&'static str>();
        forward(Box::pin(futures::stream::iter(["CA", "DE"])), tx).await;

        assert_eq!(rx.recv().await, Some("CA"));
        assert_eq!(rx.recv().await, Some("DE"));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn forward_stops_when_the_queue_closes() {
        let (tx, rx) = mpsc::unbounded_channel::<i32>();
        drop(rx);
        forward(Box::pin(futures::stream::iter(0..)), tx).await;
    }
}
