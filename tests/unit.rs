//! Unit tests for list helpers, ids, clocks and the key info model.
mod common;
use slideflow::clock::{Clock, ManualClock};
use slideflow::id::{self, IdPrefix};
use slideflow::key_info::*;
use slideflow::list::{self, ListManager};
use std::borrow::Cow;

#[test]
fn test_move_up_at_start_is_reference_stable() {
    let items = vec!["a", "b", "c"];
    let moved = list::move_up(&items, 0);
    assert!(matches!(moved, Cow::Borrowed(_)));
    assert!(std::ptr::eq(moved.as_ref(), items.as_slice()));
}

#[test]
fn test_move_up_and_down_swap_neighbours() {
    let items = vec!["a", "b", "c"];
    assert_eq!(list::move_up(&items, 2).as_ref(), ["a", "c", "b"]);
    assert_eq!(list::move_down(&items, 0).as_ref(), ["b", "a", "c"]);
    assert!(matches!(list::move_down(&items, 2), Cow::Borrowed(_)));
}

#[test]
fn test_out_of_range_operations_borrow() {
    let items = vec![1, 2, 3];
    assert!(matches!(list::remove_at(&items, 3), Cow::Borrowed(_)));
    assert!(matches!(list::update_at(&items, 5, |v| v * 10), Cow::Borrowed(_)));
    assert!(matches!(list::reorder(&items, 0, 3), Cow::Borrowed(_)));
    assert!(matches!(list::remove_where(&items, |v| *v > 10), Cow::Borrowed(_)));
    assert!(matches!(list::move_down(&items, usize::MAX), Cow::Borrowed(_)));
    assert!(matches!(list::move_down(&items, 2), Cow::Borrowed(_)));
    assert!(matches!(list::move_up(&items, usize::MAX), Cow::Borrowed(_)));
    let empty: Vec<i32> = Vec::new();
    assert!(matches!(list::move_down(&empty, 0), Cow::Borrowed(_)));
}

#[test]
fn test_reorder_equal_indices_leaves_order() {
    let items = vec!['a', 'b', 'c', 'd'];
    let same = list::reorder(&items, 2, 2);
    assert!(matches!(same, Cow::Borrowed(_)));
    assert_eq!(list::reorder(&items, 0, 2).as_ref(), ['b', 'c', 'a', 'd']);
    assert_eq!(list::reorder(&items, 3, 1).as_ref(), ['a', 'd', 'b', 'c']);
}

#[test]
fn test_insert_at_clamps_index() {
    let items = vec![1, 2];
    assert_eq!(list::insert_at(&items, 10, 3), vec![1, 2, 3]);
    assert_eq!(list::prepend(&items, 0), vec![0, 1, 2]);
    assert_eq!(list::append(&items, 9), vec![1, 2, 9]);
}

#[test]
fn test_update_order_field_is_idempotent_after_reorder() {
    let steps = common::unified("CRRC");
    let reordered = list::reorder(&steps, 1, 2);
    let renumbered = list::update_order_field(&reordered).into_owned();
    let orders: Vec<usize> = renumbered.iter().map(|s| s.order()).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);

    let again = list::reorder(&renumbered, 1, 1);
    assert!(matches!(again, Cow::Borrowed(_)));
    assert!(matches!(list::update_order_field(&again), Cow::Borrowed(_)));
}

#[test]
fn test_id_helpers() {
    let items = common::unified("CRC");
    let middle = items[1].id().to_string();
    assert_eq!(list::find_index_by_id(&items, &middle), Some(1));
    assert!(list::find_by_id(&items, "missing").is_none());
    assert_eq!(list::remove_by_id(&items, &middle).len(), 2);
    assert!(matches!(list::remove_by_id(&items, "missing"), Cow::Borrowed(_)));
}

#[test]
fn test_list_manager_reports_changes() {
    let mut manager = ListManager::new(vec!["a", "b", "c"]);
    assert!(!manager.move_up(0));
    assert!(manager.move_up(1));
    assert_eq!(manager.items(), ["b", "a", "c"]);
    assert!(manager.reorder(0, 2));
    assert_eq!(manager.items(), ["a", "c", "b"]);
    assert!(!manager.remove(7));
    manager.insert(0, "z");
    assert_eq!(manager.into_items(), vec!["z", "a", "c", "b"]);
}

#[test]
fn test_generated_ids_carry_prefix_and_differ() {
    let a = id::unified_step();
    let b = id::unified_step();
    assert!(a.starts_with("us_"));
    assert_ne!(a, b);
    assert!(IdPrefix::Support.generate().starts_with("support_"));
    assert!(id::toast().starts_with("toast_"));
}

#[test]
fn test_manual_clock_only_moves_when_told() {
    let clock = ManualClock::new(1_000);
    assert_eq!(clock.now_millis(), 1_000);
    clock.advance(250);
    assert_eq!(clock.now_millis(), 1_250);
    clock.set(10);
    assert_eq!(clock.now_millis(), 10);
}

fn settings_with_one_category() -> KeyInfoSettings {
    let mut category = create_key_info_category("Symptoms", 0);
    category.items = vec![
        create_key_info_item("Where", "", 0),
        create_key_info_item("When", "", 1),
    ];
    KeyInfoSettings {
        categories: vec![category],
    }
}

#[test]
fn test_category_completion_requires_every_item() {
    let settings = settings_with_one_category();
    let category = &settings.categories[0];
    let mut first = create_key_info_instance(&category.id, &category.items[0].id, 0);
    first.text_value = Some("line 3".to_string());
    let mut second = create_key_info_instance(&category.id, &category.items[1].id, 1);
    second.text_value = Some("   ".to_string());

    let instances = vec![first, second.clone()];
    assert!(!is_category_complete(category, &instances));
    assert!(!are_all_categories_complete(&settings.categories, &instances));

    second.image_ids.push("img_1".to_string());
    let instances = vec![instances[0].clone(), second];
    assert!(is_category_complete(category, &instances));
    assert!(are_all_categories_complete(&settings.categories, &instances));
}

#[test]
fn test_category_without_items_is_complete() {
    let category = create_key_info_category("Empty", 0);
    assert!(is_category_complete(&category, &[]));
}

#[test]
fn test_legacy_instance_fields_move_into_arrays() {
    let region = CaptureRegion {
        slide_index: 2,
        x: 1.0,
        y: 2.0,
        width: 30.0,
        height: 40.0,
    };
    let mut instance = create_key_info_instance("cat", "item", 0);
    instance.capture_value = Some(create_key_info_capture(region, Some("legacy")));
    instance.image_id = Some("img_legacy".to_string());
    instance.image_caption = Some("old caption".to_string());

    let migrated = migrate_instance_to_arrays(&instance);
    assert_eq!(migrated.capture_values.len(), 1);
    assert!(migrated.capture_value.is_none());
    assert_eq!(migrated.image_ids, vec!["img_legacy".to_string()]);
    assert_eq!(
        migrated.image_captions.get("img_legacy").map(String::as_str),
        Some("old caption")
    );
    assert!(migrated.image_id.is_none());
    assert!(has_instance_value(&migrated));

    assert_eq!(migrate_instance_to_arrays(&migrated), migrated);
}

#[test]
fn test_group_instances_by_category() {
    let instances = vec![
        create_key_info_instance("a", "1", 0),
        create_key_info_instance("b", "1", 1),
        create_key_info_instance("a", "2", 2),
    ];
    let groups = group_instances_by_category(&instances);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups["a"].len(), 2);
    assert_eq!(groups["a"][1].item_id, "2");
    assert!(get_instance_by_item(&instances, "b", "1").is_some());
    assert!(get_instance_by_item(&instances, "b", "2").is_none());
}

#[test]
fn test_capture_overlays_use_item_title() {
    let settings = settings_with_one_category();
    let category = &settings.categories[0];
    let region = CaptureRegion {
        slide_index: 0,
        x: 0.0,
        y: 0.0,
        width: 10.0,
        height: 10.0,
    };
    let mut known = create_key_info_instance(&category.id, &category.items[0].id, 0);
    known.capture_values.push(create_key_info_capture(region, None));
    let mut unknown = create_key_info_instance("gone", "gone", 1);
    unknown.capture_value = Some(create_key_info_capture(region, None));

    let data = ProjectKeyInfoData {
        instances: vec![known, unknown],
        ..create_empty_key_info_data()
    };
    let overlays = capture_overlays(&data, &settings);
    assert_eq!(overlays.len(), 2);
    assert_eq!(overlays[0].label, "Where");
    assert_eq!(overlays[1].label, "Capture");
    assert!(overlays.iter().all(|o| o.color == CAPTURE_OVERLAY_COLOR));
}
