//! Structured "key info" captured per project: settings define categories of
//! items, and each project fills in one instance per item.

pub mod types;

pub use types::*;

use crate::clock::now_iso;
use crate::error::{self, LoadError};
use crate::id;
use ahash::AHashMap;
use std::path::Path;

pub fn create_key_info_category(name: &str, order: usize) -> KeyInfoCategoryDefinition {
    KeyInfoCategoryDefinition {
        id: id::key_info_category(),
        name: name.to_string(),
        order,
        items: Vec::new(),
        created_at: now_iso(),
        system_prompt: None,
        user_prompt: None,
    }
}

pub fn create_key_info_item(title: &str, description: &str, order: usize) -> KeyInfoItemDefinition {
    KeyInfoItemDefinition {
        id: id::key_info_item(),
        title: title.to_string(),
        description: description.to_string(),
        order,
    }
}

pub fn create_key_info_instance(category_id: &str, item_id: &str, order: usize) -> KeyInfoInstance {
    KeyInfoInstance {
        id: id::key_info_instance(),
        category_id: category_id.to_string(),
        item_id: item_id.to_string(),
        text_value: None,
        capture_values: Vec::new(),
        image_ids: Vec::new(),
        image_captions: AHashMap::new(),
        capture_value: None,
        image_id: None,
        image_caption: None,
        order,
        created_at: now_iso(),
        updated_at: None,
    }
}

pub fn create_key_info_capture(region: CaptureRegion, label: Option<&str>) -> KeyInfoCaptureValue {
    KeyInfoCaptureValue {
        id: id::key_info_capture(),
        slide_index: region.slide_index,
        x: region.x,
        y: region.y,
        width: region.width,
        height: region.height,
        label: label.map(str::to_string),
        caption: None,
    }
}

pub fn create_empty_key_info_data() -> ProjectKeyInfoData {
    ProjectKeyInfoData {
        instances: Vec::new(),
        created_at: Some(now_iso()),
        updated_at: None,
    }
}

/// Instances grouped by category id, each group in input order.
pub fn group_instances_by_category(instances: &[KeyInfoInstance]) -> AHashMap<&str, Vec<&KeyInfoInstance>> {
    let mut groups: AHashMap<&str, Vec<&KeyInfoInstance>> = AHashMap::new();
    for instance in instances {
        groups.entry(instance.category_id.as_str()).or_default().push(instance);
    }
    groups
}

pub fn get_instance_by_item<'a>(
    instances: &'a [KeyInfoInstance],
    category_id: &str,
    item_id: &str,
) -> Option<&'a KeyInfoInstance> {
    instances
        .iter()
        .find(|instance| instance.category_id == category_id && instance.item_id == item_id)
}

/// True when the instance holds non-blank text, a capture or an image, in
/// either the array or the legacy single-value fields.
pub fn has_instance_value(instance: &KeyInfoInstance) -> bool {
    let has_text = instance.text_value.as_deref().is_some_and(|text| !text.trim().is_empty());
    let has_capture = !instance.capture_values.is_empty() || instance.capture_value.is_some();
    let has_image = !instance.image_ids.is_empty() || instance.image_id.is_some();
    has_text || has_capture || has_image
}

/// Every item of the category has an instance with a value. A category
/// without items is complete.
pub fn is_category_complete(category: &KeyInfoCategoryDefinition, instances: &[KeyInfoInstance]) -> bool {
    category.items.iter().all(|item| {
        get_instance_by_item(instances, &category.id, &item.id).is_some_and(has_instance_value)
    })
}

pub fn are_all_categories_complete(categories: &[KeyInfoCategoryDefinition], instances: &[KeyInfoInstance]) -> bool {
    categories
        .iter()
        .all(|category| is_category_complete(category, instances))
}

/// Moves the legacy single capture and image into the array fields.
///
/// A legacy value is only moved when the matching array is empty; otherwise
/// both are left as they are.
pub fn migrate_instance_to_arrays(instance: &KeyInfoInstance) -> KeyInfoInstance {
    let mut migrated = instance.clone();

    if migrated.capture_values.is_empty() {
        migrated.capture_values.extend(migrated.capture_value.take());
    }

    if migrated.image_ids.is_empty() {
        if let Some(image_id) = migrated.image_id.take() {
            if let Some(caption) = migrated.image_caption.take() {
                migrated.image_captions.insert(image_id.clone(), caption);
            }
            migrated.image_ids.push(image_id);
        }
    }

    migrated
}

pub fn migrate_key_info_data(data: &ProjectKeyInfoData) -> ProjectKeyInfoData {
    ProjectKeyInfoData {
        instances: data.instances.iter().map(migrate_instance_to_arrays).collect(),
        ..data.clone()
    }
}

/// A capture region drawn over the slide viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOverlay {
    pub instance_id: String,
    pub capture_id: String,
    pub label: String,
    pub slide_index: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
}

pub const CAPTURE_OVERLAY_COLOR: &str = "#3b82f6";
const DEFAULT_OVERLAY_LABEL: &str = "Capture";

/// One overlay per capture (array and legacy field), labelled with the item
/// title.
pub fn capture_overlays(data: &ProjectKeyInfoData, settings: &KeyInfoSettings) -> Vec<CaptureOverlay> {
    let mut overlays = Vec::new();
    for instance in &data.instances {
        let label = settings
            .categories
            .iter()
            .find(|category| category.id == instance.category_id)
            .and_then(|category| category.items.iter().find(|item| item.id == instance.item_id))
            .map_or(DEFAULT_OVERLAY_LABEL, |item| item.title.as_str());

        for capture in instance.capture_values.iter().chain(instance.capture_value.as_ref()) {
            overlays.push(CaptureOverlay {
                instance_id: instance.id.clone(),
                capture_id: capture.id.clone(),
                label: label.to_string(),
                slide_index: capture.slide_index,
                x: capture.x,
                y: capture.y,
                width: capture.width,
                height: capture.height,
                color: CAPTURE_OVERLAY_COLOR,
            });
        }
    }
    overlays
}

impl ProjectKeyInfoData {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        error::parse_json("key info", json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        error::read_json_file("key info", path.as_ref())
    }

    pub fn to_json(&self) -> Result<String, LoadError> {
        error::write_json("key info", self)
    }
}

impl KeyInfoSettings {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        error::parse_json("key info settings", json)
    }
}
