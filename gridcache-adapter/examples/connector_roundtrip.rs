use gridcache::{CacheOptions, Item, LevelKey};
use gridcache_adapter::{Connector, Inbound, Outbound};

fn main() -> gridcache::Result<()> {
    // Example: a host loop with an in-process "server".
    //
    // A real host would:
    // - forward widget scroll/page requests to the connector
    // - send `take_outbound()` over its transport
    // - feed every frame coming back into `on_message`
    let mut c: Connector<u64, String> = Connector::new(CacheOptions::new(25));
    c.on_message(Inbound::SetTotalSize { size: 1_000 })?;
    c.scroll_to(100, 125);

    c.request_page(4, None, |data, _| println!("page 4 -> {} rows", data.len()))?;

    let mut batch = 0;
    loop {
        let outbound = c.take_outbound();
        if outbound.is_empty() {
            break;
        }
        for message in outbound {
            println!("outbound: {message:?}");
            let Outbound::RequestRange { offset, count } = message else {
                continue;
            };
            let items = (offset..offset + count)
                .map(|i| Item::new(i as u64, format!("row {i}")))
                .collect();
            c.on_message(Inbound::ApplyPage {
                offset,
                items,
                parent: None,
            })?;
            batch += 1;
            c.on_message(Inbound::ConfirmBatch { id: batch })?;
        }
    }

    c.viewport_mut()
        .render(LevelKey::Root, 100, &[Item::new(100, String::from("stale"))]);
    c.on_message(Inbound::ApplyUpdates {
        items: vec![Item::new(100, String::from("row 100, edited"))],
    })?;
    println!(
        "rendered row 100: {:?}",
        c.viewport().rendered(&LevelKey::Root, 100).map(|i| &i.data)
    );
    println!("stats: {:?}", c.cache().stats());
    Ok(())
}
