// Example: expanding a row, loading its children and collapsing it again.
use gridcache::{
    CacheOptions, DataRequest, GridCache, LevelKey, PageData, RemoteSource, RowLocation, Sorter,
    Viewport, ViewportWindow,
};

/// Three root rows; row 1 is expanded and shows five children.
struct TreeViewport {
    rows: Vec<RowLocation<&'static str>>,
}

impl Viewport<&'static str, String> for TreeViewport {
    fn window(&self) -> ViewportWindow {
        ViewportWindow::new(0, self.rows.len(), 0, self.rows.len())
    }

    fn locate(&self, index: usize) -> Option<RowLocation<&'static str>> {
        self.rows.get(index).cloned()
    }

    fn set_size(&mut self, _size: usize) {}

    fn revalidate(&mut self) {}

    fn expand(&mut self, key: &&'static str) {
        println!("viewport expand {key}");
    }

    fn collapse(&mut self, key: &&'static str) {
        println!("viewport collapse {key}");
    }
}

struct LogRemote;

impl RemoteSource<&'static str> for LogRemote {
    fn request_range(&mut self, offset: usize, count: usize) {
        println!("-> request_range {offset} {count}");
    }

    fn request_child_range(&mut self, page: usize, offset: usize, count: usize, parent: &&'static str) {
        println!("-> request_child_range page={page} offset={offset} count={count} parent={parent}");
    }

    fn notify_select(&mut self, _key: &&'static str) {}

    fn notify_deselect(&mut self, _key: &&'static str) {}

    fn notify_details_visible(&mut self, _key: Option<&&'static str>) {}

    fn notify_sorters_changed(&mut self, _sorters: &[Sorter]) {}

    fn notify_expanded_state(&mut self, key: &&'static str, expanded: bool) {
        println!("-> expanded {key}={expanded}");
    }

    fn acknowledge_batch(&mut self, _id: u64) {}

    fn acknowledge_child_batch(&mut self, id: u64, parent: &&'static str) {
        println!("-> ack child batch {id} of {parent}");
    }
}

fn main() -> gridcache::Result<()> {
    let root = |i| RowLocation {
        level: LevelKey::Root,
        local_index: i,
    };
    let child = |i| RowLocation {
        level: LevelKey::Parent("b"),
        local_index: i,
    };
    let mut rows = vec![root(0), root(1)];
    rows.extend((0..5).map(child));
    rows.push(root(2));

    let mut cache = GridCache::new(CacheOptions::new(50), TreeViewport { rows }, LogRemote);
    cache.set_total_size(3);
    cache.set_row_expanded(&"b", true);

    cache.provide_data(DataRequest::child(0, 50, "b"), |data, size| match data {
        PageData::Placeholder(len) => println!("children of b: {len} blank rows, size={size:?}"),
        other => println!("children of b: {other:?}"),
    })?;
    // The source has no rows yet; closing the batch fills the page with placeholders.
    cache.confirm_child_batch(1, "b", 5);

    cache.set_row_expanded(&"b", false);
    println!(
        "level kept after collapse: {}",
        cache.has_level(&LevelKey::Parent("b"))
    );
    Ok(())
}
