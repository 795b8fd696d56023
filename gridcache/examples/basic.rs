// Example: a flat list served page by page from a fake remote source.
use gridcache::{
    CacheOptions, DataRequest, GridCache, Item, PageData, RemoteSource, Sorter, Viewport,
    ViewportWindow,
};

struct PrintViewport {
    window: ViewportWindow,
}

impl Viewport<u32, String> for PrintViewport {
    fn window(&self) -> ViewportWindow {
        self.window
    }

    fn set_size(&mut self, size: usize) {
        self.window.virtual_count = size;
        println!("viewport size={size}");
    }

    fn revalidate(&mut self) {
        println!("viewport revalidate");
    }
}

#[derive(Default)]
struct PrintRemote {
    requested: Vec<(usize, usize)>,
}

impl RemoteSource<u32> for PrintRemote {
    fn request_range(&mut self, offset: usize, count: usize) {
        println!("-> request_range offset={offset} count={count}");
        self.requested.push((offset, count));
    }

    fn request_child_range(&mut self, _page: usize, _offset: usize, _count: usize, _parent: &u32) {}

    fn notify_select(&mut self, key: &u32) {
        println!("-> select {key}");
    }

    fn notify_deselect(&mut self, key: &u32) {
        println!("-> deselect {key}");
    }

    fn notify_details_visible(&mut self, key: Option<&u32>) {
        println!("-> details {key:?}");
    }

    fn notify_sorters_changed(&mut self, _sorters: &[Sorter]) {}

    fn notify_expanded_state(&mut self, _key: &u32, _expanded: bool) {}

    fn acknowledge_batch(&mut self, id: u64) {
        println!("-> ack {id}");
    }

    fn acknowledge_child_batch(&mut self, _id: u64, _parent: &u32) {}
}

fn page_printer(
    label: &'static str,
) -> impl FnOnce(PageData<'_, u32, String>, Option<usize>) + 'static {
    move |data: PageData<'_, u32, String>, _size: Option<usize>| match data {
        PageData::Loaded(items) => println!(
            "{label}: {} rows, first={:?}",
            items.len(),
            items.first().map(|i| &i.data)
        ),
        other => println!("{label}: {other:?}"),
    }
}

fn main() -> gridcache::Result<()> {
    let viewport = PrintViewport {
        window: ViewportWindow::new(0, 50, 0, 0),
    };
    let mut cache = GridCache::new(CacheOptions::new(50), viewport, PrintRemote::default());
    cache.set_total_size(120);

    cache.provide_data(DataRequest::root(0, 50), page_printer("page 0"))?;

    // The source answers the buffered range.
    let (offset, count) = cache.remote().requested[0];
    let rows = (offset..offset + count)
        .map(|i| Item::new(i as u32, format!("row {i}")))
        .collect();
    cache.apply_page(offset, rows, None)?;
    cache.confirm_batch(1);

    // Page 1 came with the same range: served from cache, no new request.
    cache.provide_data(DataRequest::root(1, 50), page_printer("page 1"))?;

    cache.set_active_item(Some(Item::new(3, String::from("row 3"))));
    println!("stats={:?}", cache.stats());
    Ok(())
}
