use crate::*;

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use gridcache::{
    CacheOptions, Item, LevelKey, PageCallback, PageData, RowLocation, SelectionEvent,
    SelectionMode,
};

fn rows(keys: core::ops::Range<u64>) -> Vec<Item<u64, String>> {
    keys.map(|k| Item::new(k, format!("row {k}"))).collect()
}

fn connector(page_size: usize, size: usize) -> Connector<u64, String> {
    let mut c = Connector::new(CacheOptions::new(page_size));
    c.on_message(Inbound::SetTotalSize { size }).unwrap();
    c
}

type Seen = Rc<RefCell<Vec<(Vec<u64>, Option<usize>)>>>;

fn record(seen: &Seen) -> PageCallback<u64, String> {
    let seen = Rc::clone(seen);
    Box::new(move |data: PageData<'_, u64, String>, size: Option<usize>| {
        let keys = match data {
            PageData::Loaded(items) => items.iter().map(|i| i.key).collect(),
            _ => Vec::new(),
        };
        seen.borrow_mut().push((keys, size));
    })
}

#[test]
fn connector_round_trips_a_page_request() {
    let mut c = connector(20, 100);
    c.scroll_to(0, 20);
    let seen: Seen = Rc::default();

    c.request_page(0, None, record(&seen)).unwrap();
    assert_eq!(
        c.take_outbound(),
        [Outbound::RequestRange {
            offset: 0,
            count: 40
        }]
    );
    assert!(c.take_outbound().is_empty());

    c.on_message(Inbound::ApplyPage {
        offset: 0,
        items: rows(0..40),
        parent: None,
    })
    .unwrap();
    c.on_message(Inbound::ConfirmBatch { id: 1 }).unwrap();

    assert_eq!(*seen.borrow(), [((0..20).collect::<Vec<u64>>(), None)]);
    assert_eq!(c.take_outbound(), [Outbound::AcknowledgeBatch { id: 1 }]);
    assert_eq!(c.cache().stats().cached_pages, 2);
}

#[test]
fn headless_viewport_only_refreshes_rendered_rows() {
    let mut c = connector(10, 30);
    c.on_message(Inbound::ApplyPage {
        offset: 0,
        items: rows(0..10),
        parent: None,
    })
    .unwrap();
    c.viewport_mut()
        .render(LevelKey::Root, 0, &rows(0..3));

    let mut fresh = rows(0..10);
    fresh[1].data = String::from("fresh");
    fresh[5].data = String::from("fresh");
    c.on_message(Inbound::ApplyPage {
        offset: 0,
        items: fresh,
        parent: None,
    })
    .unwrap();

    let vp = c.viewport();
    assert_eq!(vp.rendered_len(), 3);
    assert_eq!(vp.rendered(&LevelKey::Root, 1).map(|i| i.data.as_str()), Some("fresh"));
    assert!(vp.rendered(&LevelKey::Root, 5).is_none());
    assert_eq!(vp.revalidations(), 2);
}

#[test]
fn user_selection_is_queued_and_server_selection_is_not() {
    let mut c = connector(10, 30);
    c.on_message(Inbound::SetSelectionMode {
        mode: SelectionMode::Multi,
    })
    .unwrap();
    c.on_message(Inbound::ApplyPage {
        offset: 0,
        items: rows(0..10),
        parent: None,
    })
    .unwrap();

    c.select(Item::new(2, String::from("row 2")));
    c.on_message(Inbound::Select { items: rows(4..6) })
        .unwrap();
    assert_eq!(c.take_outbound(), [Outbound::Select { key: 2 }]);
    assert_eq!(c.viewport().selected_keys().len(), 3);
    assert_eq!(
        c.viewport_mut().take_events(),
        [SelectionEvent::Selected(4), SelectionEvent::Selected(5)]
    );

    c.viewport_mut().set_disabled(true);
    c.select(Item::new(3, String::from("row 3")));
    assert!(c.take_outbound().is_empty());
    assert!(!c.cache().is_selected(&3));

    c.deselect(Item::new(2, String::from("row 2")));
    assert_eq!(c.take_outbound(), [Outbound::Deselect { key: 2 }]);
    assert!(!c.cache().is_selected(&2));
}

#[test]
fn tree_layout_drives_child_fetches() {
    let mut c = connector(50, 5);
    let mut layout: Vec<_> = (0..=1)
        .map(|i| RowLocation {
            level: LevelKey::Root,
            local_index: i,
        })
        .collect();
    layout.extend((0..12).map(|i| RowLocation {
        level: LevelKey::Parent(1),
        local_index: i,
    }));
    layout.extend((2..5).map(|i| RowLocation {
        level: LevelKey::Root,
        local_index: i,
    }));
    c.viewport_mut().set_layout(Some(layout));
    c.scroll_to(0, 17);

    c.toggle_expanded(&1);
    assert_eq!(c.viewport().expanded_keys(), [1]);
    let seen: Seen = Rc::default();
    c.request_page(0, Some(1), record(&seen)).unwrap();
    assert_eq!(
        c.take_outbound(),
        [
            Outbound::ExpandedState {
                key: 1,
                expanded: true
            },
            Outbound::RequestChildRange {
                page: 0,
                offset: 0,
                count: 50,
                parent: 1
            },
        ]
    );

    c.on_message(Inbound::ConfirmChildBatch {
        id: 4,
        parent: 1,
        level_size: 12,
    })
    .unwrap();
    assert_eq!(*seen.borrow(), [(Vec::<u64>::new(), Some(12))]);

    c.viewport_mut()
        .render(LevelKey::Parent(1), 0, &rows(100..103));
    c.toggle_expanded(&1);
    assert!(!c.cache().has_level(&LevelKey::Parent(1)));
    assert!(c.viewport().expanded_keys().is_empty());
    assert!(c.viewport().rendered(&LevelKey::Parent(1), 0).is_none());
}

#[test]
fn activation_requests_details() {
    let mut c = connector(10, 30);
    c.activate(Some(Item::new(7, String::from("row 7"))));
    assert_eq!(
        c.take_outbound(),
        [
            Outbound::Select { key: 7 },
            Outbound::DetailsVisible { key: Some(7) }
        ]
    );
    assert!(Outbound::<u64>::RequestRange { offset: 0, count: 1 }.is_fetch());
    assert!(!Outbound::<u64>::Select { key: 7 }.is_fetch());
}

#[test]
fn misaligned_push_surfaces_as_error() {
    let mut c = connector(10, 30);
    let err = c
        .on_message(Inbound::ClearRange {
            offset: 5,
            length: 10,
            parent: None,
        })
        .unwrap_err();
    assert_eq!(
        err,
        gridcache::Error::MisalignedOffset {
            offset: 5,
            page_size: 10
        }
    );
}

#[cfg(feature = "json")]
#[test]
fn json_frames_decode_into_inbound_messages() {
    let mut c = connector(10, 30);
    c.on_json(
        r#"{"type":"applyPage","offset":0,"items":[
            {"key":1,"data":"one","selected":true},
            {"key":2,"data":"two","detailsOpened":true}
        ]}"#,
    )
    .unwrap();
    assert!(c.cache().is_selected(&1));
    assert_eq!(c.viewport().details_opened_keys(), [2]);

    c.on_json(r#"{"type":"setSelectionMode","mode":"MULTI"}"#)
        .unwrap();
    assert_eq!(c.cache().selection_mode(), SelectionMode::Multi);

    c.on_json(r#"{"type":"confirmChildBatch","id":3,"parent":1,"levelSize":0}"#)
        .unwrap();
    assert_eq!(
        c.take_outbound().last(),
        Some(&Outbound::AcknowledgeChildBatch { id: 3, parent: 1 })
    );
}

#[cfg(feature = "json")]
#[test]
fn json_frames_may_omit_optional_fields() {
    let frame = decode_inbound::<u64, String>(r#"{"type":"clearRange","offset":10,"length":10}"#)
        .unwrap();
    assert_eq!(
        frame,
        Inbound::ClearRange {
            offset: 10,
            length: 10,
            parent: None
        }
    );

    let frame =
        decode_inbound::<u64, String>(r#"{"type":"applyUpdates","items":[{"key":4,"data":"four"}]}"#)
            .unwrap();
    assert_eq!(
        frame,
        Inbound::ApplyUpdates {
            items: Vec::from([Item::new(4, String::from("four"))])
        }
    );

    let frame = decode_inbound::<u64, String>(r#"{"type":"setIdentityPath"}"#).unwrap();
    assert_eq!(frame, Inbound::SetIdentityPath { path: None });
}

#[cfg(feature = "json")]
#[test]
fn json_items_that_are_not_an_array_are_malformed() {
    let mut c = connector(10, 30);
    let err = c
        .on_json(r#"{"type":"applyUpdates","items":{"key":1,"data":"x"}}"#)
        .unwrap_err();
    assert!(matches!(err, gridcache::Error::MalformedPayload(_)));
    assert_eq!(c.cache().stats().cached_items, 0);

    let err = decode_inbound::<u64, String>(r#"{"type":"bogus"}"#).unwrap_err();
    assert!(matches!(err, gridcache::Error::MalformedPayload(_)));
}

#[cfg(feature = "json")]
#[test]
fn outbound_messages_encode_as_tagged_json() {
    let json = encode_outbound(&Outbound::RequestChildRange {
        page: 1,
        offset: 50,
        count: 100,
        parent: 9u64,
    })
    .unwrap();
    assert_eq!(
        json,
        r#"{"type":"requestChildRange","page":1,"offset":50,"count":100,"parent":9}"#
    );
}
