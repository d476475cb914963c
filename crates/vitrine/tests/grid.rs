//! Integration tests for the card grid pipeline.

use std::sync::{Arc, Mutex};

use insta::assert_json_snapshot;

use vitrine::{
    CollaboratorError, Direction, FilterSpec, GridPipeline, Item, PipelineError, PipelineEvent,
    Record, SortSpec, Value,
};

fn products() -> Vec<Record> {
    vec![
        Record::new(1).with("name", "Desk Lamp").with("category", "Home").with("price", 35).with("featured", true),
        Record::new(2).with("name", "Cookbook").with("category", "Books").with("price", 25).with("featured", false),
        Record::new(3).with("name", "Headphones").with("category", "Electronics").with("price", 120).with("featured", true),
        Record::new(4).with("name", "Atlas").with("category", "Books").with("price", 45).with("featured", false),
    ]
}

fn category(name: &'static str) -> FilterSpec<Record> {
    FilterSpec::new(name, move |r: &Record| r.field("category") == Value::String(name))
}

fn grid() -> GridPipeline<Record> {
    GridPipeline::builder(products())
        .sort_option(SortSpec::by_field("Price: Low to High", "price"))
        .sort_option(SortSpec::by_field("Name", "name"))
        .filter_option(category("Books"))
        .filter_option(FilterSpec::new("Featured", |r: &Record| {
            r.field("featured").as_bool() == Some(true)
        }))
        .build()
}

fn ids(grid: &GridPipeline<Record>) -> Vec<String> {
    let frame = grid.render().unwrap();
    frame.items.iter().map(|r| r.item_id().into_owned()).collect()
}

#[test]
fn initial_state_uses_first_sort() {
    let grid = grid();
    let frame = grid.render().unwrap();
    assert_eq!(frame.heading, "All Items (4)");
    assert_eq!(frame.sort_button, "Sort: Price: Low to High");
    assert_eq!(frame.filter_button, "Filter");
    assert_eq!(frame.sort_direction, Some(Direction::Asc));
    assert!(frame.toolbar_visible);
    assert_eq!(frame.sort_options, ["Price: Low to High", "Name"]);
    assert_eq!(frame.filter_options, ["Books", "Featured"]);
    assert_eq!(ids(&grid), ["2", "1", "4", "3"]);
}

#[test]
fn reselecting_a_sort_flips_it() {
    let mut grid = grid();
    assert_eq!(grid.select_sort("Price: Low to High").unwrap(), Direction::Desc);
    assert_eq!(ids(&grid), ["3", "4", "1", "2"]);
    assert_eq!(grid.select_sort("Price: Low to High").unwrap(), Direction::Asc);
    assert_eq!(ids(&grid), ["2", "1", "4", "3"]);
}

#[test]
fn switching_sorts_uses_the_option_direction() {
    let mut grid = grid();
    grid.select_sort("Price: Low to High").unwrap();
    assert_eq!(grid.select_sort("Name").unwrap(), Direction::Asc);
    assert_eq!(ids(&grid), ["4", "2", "1", "3"]);
}

#[test]
fn filter_heading_counts_processed_items() {
    let mut grid = grid();
    assert!(grid.select_filter(Some("Books")).unwrap());
    let frame = grid.render().unwrap();
    assert_eq!(frame.heading, "Books (2)");
    assert_eq!(frame.filter_button, "Books");
    assert_eq!(frame.active_filter, Some("Books"));
    assert_eq!(frame.total_items, 4);
    assert_eq!(ids(&grid), ["2", "4"]);

    // the sort axis is untouched
    assert_eq!(grid.selection().sort_direction(), Some(Direction::Asc));

    assert!(grid.select_filter(None).unwrap());
    assert_eq!(grid.render().unwrap().heading, "All Items (4)");
}

#[test]
fn no_matches_is_the_empty_state() {
    let mut grid = GridPipeline::builder(products())
        .filter_option(category("Garden"))
        .build();
    grid.select_filter(Some("Garden")).unwrap();
    let frame = grid.render().unwrap();
    assert!(frame.is_empty());
    assert_eq!(frame.heading, "Garden (0)");
    assert_eq!(frame.sort_button, "Sort");
}

#[test]
fn toolbar_hidden_without_options() {
    let grid = GridPipeline::builder(products()).build();
    let frame = grid.render().unwrap();
    assert!(!frame.toolbar_visible);
    assert_eq!(frame.sort_direction, None);
    assert_eq!(ids(&grid), ["1", "2", "3", "4"]);
}

#[test]
fn unknown_labels_leave_state_alone() {
    let mut grid = grid();
    assert!(matches!(
        grid.select_sort("Rating"),
        Err(PipelineError::UnknownOption { kind: "sort", .. })
    ));
    assert!(matches!(
        grid.select_filter(Some("Toys")),
        Err(PipelineError::UnknownOption { kind: "filter", .. })
    ));
    assert_eq!(grid.render().unwrap().heading, "All Items (4)");
}

#[test]
fn selections_publish_events() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let mut grid = grid();
    grid.subscribe(move |e| sink.lock().unwrap().push(e.clone()));

    grid.select_sort("Name").unwrap();
    grid.select_filter(Some("Featured")).unwrap();
    grid.select_filter(Some("Featured")).unwrap();
    grid.set_items(Vec::new());

    assert_eq!(
        *events.lock().unwrap(),
        [
            PipelineEvent::SortChanged {
                key: "Name".to_string(),
                direction: Direction::Asc
            },
            PipelineEvent::FilterChanged {
                label: Some("Featured".to_string())
            },
            PipelineEvent::DataReplaced { len: 0 },
        ]
    );
    assert!(grid.render().unwrap().is_empty());
}

#[test]
fn card_click_reports_processed_item() {
    let clicked = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicked);
    let mut grid = GridPipeline::builder(products())
        .sort_option(SortSpec::by_field("Price", "price").descending())
        .on_card_click(move |item: &Record| sink.lock().unwrap().push(item.item_id().into_owned()))
        .build();

    assert!(grid.click_card(0).unwrap());
    assert!(!grid.click_card(4).unwrap());
    assert_eq!(*clicked.lock().unwrap(), ["3"]);
}

#[test]
fn failing_predicate_surfaces() {
    let mut grid = GridPipeline::builder(products())
        .filter_option(FilterSpec::try_new("Remote", |_: &Record| {
            Err(CollaboratorError::new("service unavailable"))
        }))
        .build();
    grid.select_filter(Some("Remote")).unwrap();
    assert!(matches!(
        grid.render(),
        Err(PipelineError::CollaboratorFailure(_))
    ));
}

#[test]
fn frame_serializes_toolbar_state() {
    let mut grid = grid();
    grid.select_filter(Some("Books")).unwrap();
    assert_json_snapshot!(grid.render().unwrap(), @r#"
    {
      "heading": "Books (2)",
      "toolbar_visible": true,
      "sort_button": "Sort: Price: Low to High",
      "filter_button": "Books",
      "sort_options": [
        "Price: Low to High",
        "Name"
      ],
      "filter_options": [
        "Books",
        "Featured"
      ],
      "active_sort": "Price: Low to High",
      "sort_direction": "asc",
      "active_filter": "Books",
      "total_items": 4
    }
    "#);
}
