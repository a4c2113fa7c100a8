use crate::list::{self, Identified};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// An item of a key-info category, defined in the global settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyInfoItemDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyInfoCategoryDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub items: Vec<KeyInfoItemDefinition>,
    #[serde(default)]
    pub created_at: String,
    /// Prompt templates for generated summaries, stored verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_prompt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyInfoSettings {
    #[serde(default)]
    pub categories: Vec<KeyInfoCategoryDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyInfoCaptureValue {
    pub id: String,
    pub slide_index: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// A capture region before it has been given an id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureRegion {
    pub slide_index: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The project's value for one key-info item.
///
/// Text, captures and images may all be present at once. The single-value
/// `capture_value`, `image_id` and `image_caption` fields are the legacy
/// shape; [`migrate_instance_to_arrays`](super::migrate_instance_to_arrays)
/// moves them into the array fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyInfoInstance {
    pub id: String,
    pub category_id: String,
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capture_values: Vec<KeyInfoCaptureValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "no_captions")]
    pub image_captions: AHashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_value: Option<KeyInfoCaptureValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_caption: Option<String>,
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectKeyInfoData {
    #[serde(default)]
    pub instances: Vec<KeyInfoInstance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn no_captions(captions: &AHashMap<String, String>) -> bool {
    captions.is_empty()
}

list::impl_identified_ordered!(KeyInfoItemDefinition, KeyInfoCategoryDefinition, KeyInfoInstance);

impl Identified for KeyInfoCaptureValue {
    fn id(&self) -> &str {
        &self.id
    }
}
