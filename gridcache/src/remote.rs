use crate::Sorter;

/// Outbound half of the wire: everything the cache tells the remote data source.
///
/// Calls are fire-and-forget. Answers come back later through the cache's inbound entry points
/// (`apply_page`, `confirm_batch`, ...), never from inside these methods.
pub trait RemoteSource<K> {
    /// Asks for root rows `[offset, offset + count)`.
    fn request_range(&mut self, offset: usize, count: usize);

    /// Asks for rows `[offset, offset + count)` of the children of `parent`.
    ///
    /// `page` is the page the viewport originally asked for.
    fn request_child_range(&mut self, page: usize, offset: usize, count: usize, parent: &K);

    fn notify_select(&mut self, key: &K);

    fn notify_deselect(&mut self, key: &K);

    /// Which row should show its details panel (`None` closes it).
    fn notify_details_visible(&mut self, key: Option<&K>);

    fn notify_sorters_changed(&mut self, sorters: &[Sorter]);

    fn notify_expanded_state(&mut self, key: &K, expanded: bool);

    fn acknowledge_batch(&mut self, id: u64);

    fn acknowledge_child_batch(&mut self, id: u64, parent: &K);
}
