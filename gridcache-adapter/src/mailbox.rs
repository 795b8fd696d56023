use alloc::collections::VecDeque;
use alloc::vec::Vec;

use gridcache::{RemoteSource, Sorter};

use crate::Outbound;

/// A [`RemoteSource`] that queues outbound messages instead of sending them.
///
/// The host drains the queue after each call into the cache and hands the messages to its own
/// transport, in order.
#[derive(Clone, Debug)]
pub struct Mailbox<K> {
    queue: VecDeque<Outbound<K>>,
}

impl<K> Default for Mailbox<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Mailbox<K> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Outbound<K>> + '_ {
        self.queue.iter()
    }

    pub fn pop(&mut self) -> Option<Outbound<K>> {
        self.queue.pop_front()
    }

    /// Takes every queued message, oldest first.
    pub fn drain(&mut self) -> Vec<Outbound<K>> {
        self.queue.drain(..).collect()
    }

    fn push(&mut self, message: Outbound<K>) {
        self.queue.push_back(message);
    }
}

impl<K: Clone> RemoteSource<K> for Mailbox<K> {
    fn request_range(&mut self, offset: usize, count: usize) {
        self.push(Outbound::RequestRange { offset, count });
    }

    fn request_child_range(&mut self, page: usize, offset: usize, count: usize, parent: &K) {
        self.push(Outbound::RequestChildRange {
            page,
            offset,
            count,
            parent: parent.clone(),
        });
    }

    fn notify_select(&mut self, key: &K) {
        self.push(Outbound::Select { key: key.clone() });
    }

    fn notify_deselect(&mut self, key: &K) {
        self.push(Outbound::Deselect { key: key.clone() });
    }

    fn notify_details_visible(&mut self, key: Option<&K>) {
        self.push(Outbound::DetailsVisible { key: key.cloned() });
    }

    fn notify_sorters_changed(&mut self, sorters: &[Sorter]) {
        self.push(Outbound::SortersChanged {
            sorters: sorters.to_vec(),
        });
    }

    fn notify_expanded_state(&mut self, key: &K, expanded: bool) {
        self.push(Outbound::ExpandedState {
            key: key.clone(),
            expanded,
        });
    }

    fn acknowledge_batch(&mut self, id: u64) {
        self.push(Outbound::AcknowledgeBatch { id });
    }

    fn acknowledge_child_batch(&mut self, id: u64, parent: &K) {
        self.push(Outbound::AcknowledgeChildBatch {
            id,
            parent: parent.clone(),
        });
    }
}
