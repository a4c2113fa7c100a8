//! Tests for the observable stores.
mod common;
use slideflow::clock::ManualClock;
use slideflow::error::StepOrderError;
use slideflow::key_info::{CaptureRegion, KeyInfoSettings, create_key_info_category, create_key_info_item};
use slideflow::store::*;
use slideflow::workflow::{KeyStepLink, create_attachment, AttachmentKind, create_empty_workflow_data};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_subscribers_see_current_value_then_every_change() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut store = Writable::new(10);
    let sink = Rc::clone(&seen);
    store.subscribe(move |value| sink.borrow_mut().push(*value));

    store.set(11);
    store.update(|value| value * 2);
    store.modify(|value| *value += 1);
    assert_eq!(*seen.borrow(), vec![10, 11, 22, 23]);
    assert_eq!(*store.get(), 23);
    assert_eq!(store.subscriber_count(), 1);
}

#[test]
fn test_toasts_expire_after_their_duration() {
    let clock = Rc::new(ManualClock::new(0));
    let mut toasts = ToastStore::with_clock(Rc::clone(&clock));

    let error = toasts.error("Save failed", None);
    let success = toasts.success("Saved", None);
    let custom = toasts.show("Uploading", ToastKind::Info, Some(10_000));
    assert_eq!(toasts.toasts().len(), 3);
    assert_eq!(toasts.next_expiry(), Some(2_500));

    clock.advance(2_500);
    assert_eq!(toasts.expire_due(), 1);
    assert!(toasts.toasts().iter().all(|t| t.id != success));

    clock.advance(1_499);
    assert_eq!(toasts.expire_due(), 0);
    clock.advance(1);
    assert_eq!(toasts.expire_due(), 1);
    assert!(toasts.toasts().iter().all(|t| t.id != error));

    toasts.dismiss(&custom);
    assert!(toasts.toasts().is_empty());
    assert_eq!(toasts.next_expiry(), None);
}

#[test]
fn test_toast_default_durations() {
    let clock = Rc::new(ManualClock::new(0));
    let mut toasts = ToastStore::with_clock(Rc::clone(&clock));
    toasts.error("e", None);
    toasts.warning("w", None);
    toasts.info("i", None);
    toasts.success("s", None);
    toasts.show("plain", ToastKind::Warning, None);
    let durations: Vec<i64> = toasts.toasts().iter().map(|t| t.duration_ms).collect();
    assert_eq!(durations, vec![4000, 3000, 3000, 2500, 3000]);

    toasts.clear();
    assert!(toasts.toasts().is_empty());
}

#[test]
fn test_expiry_without_due_toasts_does_not_notify() {
    let clock = Rc::new(ManualClock::new(0));
    let mut toasts = ToastStore::with_clock(Rc::clone(&clock));
    toasts.info("hello", None);

    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    toasts.subscribe(move |_| *counter.borrow_mut() += 1);
    assert_eq!(*calls.borrow(), 1);

    toasts.expire_due();
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_drop_slot_from_hover_position() {
    let upper = DropHover::Item {
        index: 2,
        upper_half: true,
    };
    let lower = DropHover::Item {
        index: 2,
        upper_half: false,
    };
    assert_eq!(drop_slot(upper, 5), 2);
    assert_eq!(drop_slot(lower, 5), 3);
    assert_eq!(drop_slot(DropHover::Container, 5), 5);
    let far = DropHover::Item {
        index: usize::MAX,
        upper_half: false,
    };
    assert_eq!(drop_slot(far, 5), 5);
}

#[test]
fn test_drag_and_drop_resolves_a_reorder() {
    let mut ui = UiStore::new();
    ui.start_drag(0);
    assert!(ui.is_dragging());
    ui.set_drag_mode(Some(DragMode::Reorder));
    ui.hover_drop_target(DropHover::Container, 4);
    assert_eq!(ui.get().drag_drop.pending_move(), Some((0, 3)));

    assert_eq!(ui.end_drag(), Some((0, 3)));
    assert!(!ui.is_dragging());
    assert_eq!(ui.get().drag_drop, DragDropState::default());

    ui.start_drag(1);
    ui.hover_drop_target(
        DropHover::Item {
            index: 1,
            upper_half: false,
        },
        4,
    );
    assert_eq!(ui.end_drag(), None);
}

#[test]
fn test_selection_with_modifiers() {
    let ids: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
    let mut ui = UiStore::new();

    ui.toggle_selection("a", false);
    ui.toggle_selection("c", true);
    assert_eq!(ui.selected_count(), 2);
    ui.toggle_selection("a", true);
    assert_eq!(ui.selected_count(), 1);
    ui.toggle_selection("b", false);
    assert_eq!(ui.selected_count(), 1);
    assert_eq!(ui.get().selection.last_clicked_step_id.as_deref(), Some("b"));

    ui.select_range(&ids, "d", "b");
    assert_eq!(ui.selected_count(), 3);
    ui.select_range(&ids, "a", "missing");
    assert_eq!(ui.selected_count(), 3);

    ui.select_all(&ids);
    assert_eq!(ui.selected_count(), 4);
    ui.clear_selection();
    assert_eq!(ui.selected_count(), 0);
    assert!(!ui.get().selection.is_selection_mode_active);
}

#[test]
fn test_expanding_a_step_cancels_capture() {
    let mut ui = UiStore::new();
    ui.start_capture("step_1", Some("preset"), None);
    assert!(ui.is_capturing());
    ui.toggle_step_expand("step_1");
    assert!(!ui.is_capturing());
    assert_eq!(ui.get().expanded.expanded_step_id.as_deref(), Some("step_1"));
    ui.toggle_step_expand("step_1");
    assert!(ui.get().expanded.expanded_step_id.is_none());
}

#[test]
fn test_add_step_popup_and_core_selector_exclude_each_other() {
    let mut ui = UiStore::new();
    ui.toggle_add_step_popup();
    ui.toggle_core_step_selector();
    assert!(ui.get().popup.show_core_step_selector);
    assert!(!ui.get().popup.show_add_step_popup);

    ui.toggle_key_step_linking_wizard(Some(true));
    ui.toggle_key_step_linking_wizard(Some(true));
    assert!(ui.get().popup.show_key_step_linking_wizard);
    ui.close_all_popups();
    assert_eq!(ui.get().popup, PopupState::default());

    ui.set_view_mode(ViewMode::Graph);
    ui.reset();
    assert_eq!(ui.get().view_mode, ViewMode::List);
}

#[test]
fn test_modals_open_and_close() {
    let mut modals = ModalStore::new();
    assert!(!modals.is_any_modal_open());

    let attachment = create_attachment(AttachmentKind::Text, "note", Some("first"));
    modals.open_attachment_modal("step_1", attachment);
    assert_eq!(modals.get().attachment.caption, "first");
    modals.update_attachment_caption("edited");
    assert_eq!(modals.get().attachment.caption, "edited");
    assert!(modals.is_any_modal_open());

    modals.open_image_add_modal("step_1", "data:image/png;base64,AAAA");
    modals.set_image_uploading(true);
    assert!(modals.get().image_add.is_uploading);

    modals.open_phase_select_modal("step_2", "step_1");
    modals.close_attachment_modal();
    modals.close_image_add_modal();
    assert!(modals.is_any_modal_open());
    modals.close_all();
    assert!(!modals.is_any_modal_open());
}

fn workflow_store(pattern: &str) -> WorkflowStore {
    let mut store = WorkflowStore::new();
    store.set_data(common::unified_workflow(pattern));
    store
}

#[test]
fn test_rejected_reorder_leaves_state_untouched() {
    let mut store = workflow_store("CRC");
    let before = store.get().data.clone();

    let error = store.reorder_unified(2, 1).unwrap_err();
    assert!(matches!(error, StepOrderError::ReorderRejected { from: 2, to: 1, .. }));
    assert_eq!(store.get().data, before);

    assert!(matches!(
        store.reorder_unified(0, 7),
        Err(StepOrderError::IndexOutOfRange { index: 7, len: 3 })
    ));
}

#[test]
fn test_accepted_reorder_syncs_legacy_lists() {
    let mut store = workflow_store("CRRC");
    let moved = store.sorted_unified_steps()[1].id().to_string();
    store.reorder_unified(1, 2).unwrap();

    let steps = store.sorted_unified_steps();
    assert_eq!(steps[2].id(), moved);
    let data = &store.get().data;
    assert_eq!(data.steps.len(), 2);
    assert_eq!(data.steps[1].id, moved);
    assert_eq!(data.core_step_instances.len(), 2);
}

#[test]
fn test_delete_prunes_relations_and_links() {
    let mut store = workflow_store("CRRC");
    let steps = store.sorted_unified_steps();
    let (first_regular, second_regular) = (steps[1].id().to_string(), steps[2].id().to_string());
    let closing_core = steps[3].id().to_string();

    // Legacy lists are filled by any accepted structural edit.
    store.insert_unified(4, slideflow::workflow::create_unified_core_step("cs_extra", Vec::new(), 0));
    store.add_support(&second_regular, &first_regular, "phase_1");
    assert_eq!(store.get().data.support_relations.len(), 1);

    let links = vec![KeyStepLink {
        step_id: first_regular.clone(),
        priority: 1,
    }];
    assert!(store.save_key_step_links(&closing_core, links).is_valid);

    assert!(store.delete_unified(4).is_ok());
    store.delete_unified(1).unwrap();

    let data = &store.get().data;
    assert!(data.support_relations.is_empty());
    assert!(data.key_step_links[0].linked_steps.is_empty());
    assert_eq!(data.unified_steps.len(), 3);
}

#[test]
fn test_rejected_key_step_links_are_not_saved() {
    let mut store = workflow_store("CRC");
    let core = store.sorted_unified_steps()[0].id().to_string();
    let verdict = store.save_key_step_links(&core, Vec::new());
    assert!(!verdict.is_valid);
    assert!(store.get().data.key_step_links.is_empty());
}

#[test]
fn test_active_workflow_mirrors_edits() {
    let mut workflows = ahash::AHashMap::new();
    workflows.insert("wf_1".to_string(), common::legacy_workflow());
    workflows.insert("wf_2".to_string(), common::unified_workflow("CC"));

    let mut store = WorkflowStore::new();
    let summary = store.load(workflows, Some("wf_1"), Vec::new());
    assert_eq!(summary.migrated(), 1);
    assert_eq!(store.get().data.unified_steps.len(), 5);

    store.confirm();
    assert!(store.get().all_workflows_data["wf_1"].is_confirmed);

    store.set_active_workflow("wf_2");
    assert!(!store.get().data.is_confirmed);
    assert_eq!(store.get().data.unified_steps.len(), 2);

    store.set_active_workflow("wf_new");
    assert!(!store.has_workflow_data());
    store.reset();
    assert!(store.get().all_workflows_data.contains_key("wf_new"));
}

#[test]
fn test_update_steps_drops_orphaned_supports() {
    let mut store = WorkflowStore::new();
    store.init(common::legacy_workflow());
    let steps = store.get().data.steps.clone();
    store.add_support(&steps[1].id, &steps[0].id, "phase_1");
    assert_eq!(store.layout_rows().len(), 2);

    store.update_steps(steps[..1].to_vec());
    assert!(store.get().data.support_relations.is_empty());
    assert_eq!(store.sorted_core_step_instances().len(), 2);
}

#[test]
fn test_workflow_store_notifies_subscribers() {
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let mut store = WorkflowStore::new();
    let id = store.subscribe(move |_| *counter.borrow_mut() += 1);
    store.set_saving(true);
    assert_eq!(*calls.borrow(), 2);
    assert!(store.unsubscribe(id));
    store.set_data(create_empty_workflow_data());
    assert_eq!(*calls.borrow(), 2);
}

fn key_info_store() -> (KeyInfoStore, String, String) {
    let mut category = create_key_info_category("Symptoms", 0);
    category.items = vec![create_key_info_item("Where", "", 0)];
    let (category_id, item_id) = (category.id.clone(), category.items[0].id.clone());
    let mut store = KeyInfoStore::new();
    store.set_settings(KeyInfoSettings {
        categories: vec![category],
    });
    (store, category_id, item_id)
}

#[test]
fn test_key_info_upsert_reuses_instances() {
    let (mut store, category_id, item_id) = key_info_store();
    let first = store.upsert_instance(&category_id, &item_id);
    let again = store.upsert_instance(&category_id, &item_id);
    assert_eq!(first.id, again.id);
    assert_eq!(store.get().data.instances.len(), 1);
    assert!(!store.all_categories_complete());

    store.update_instance_text(&first.id, "line 3");
    assert!(store.all_categories_complete());
    assert_eq!(store.category_completion_status().get(category_id.as_str()), Some(&true));
}

#[test]
fn test_key_info_captures_and_images() {
    let (mut store, category_id, item_id) = key_info_store();
    let instance = store.upsert_instance(&category_id, &item_id);
    let region = CaptureRegion {
        slide_index: 1,
        x: 0.0,
        y: 0.0,
        width: 5.0,
        height: 5.0,
    };

    let capture = store.add_instance_capture(&instance.id, region, None).unwrap();
    assert!(store.add_instance_capture("missing", region, None).is_none());
    assert_eq!(store.capture_overlays().len(), 1);
    assert_eq!(store.capture_overlays()[0].label, "Where");

    store.add_instance_image(&instance.id, "img_1", Some("before"));
    store.update_image_caption(&instance.id, "img_1", "after");
    let stored = &store.get().data.instances[0];
    assert_eq!(stored.image_captions.get("img_1").map(String::as_str), Some("after"));

    store.remove_instance_capture(&instance.id, &capture);
    store.remove_instance_image(&instance.id, "img_1");
    assert!(!store.all_categories_complete());

    store.update_instance_text(&instance.id, "text");
    store.clear_instance_data(&instance.id);
    assert!(!store.all_categories_complete());
    assert_eq!(store.instances_by_category()[category_id.as_str()].len(), 1);

    store.start_capture_mode(&instance.id);
    assert!(store.get().capture_mode);
    store.end_capture_mode();
    assert!(store.get().capture_target_instance_id.is_none());

    store.remove_instance(&instance.id);
    assert!(store.get().data.instances.is_empty());
}
