use super::writable::{Writable, observable};
use crate::clock::now_iso;
use crate::key_info::{
    self, CaptureOverlay, CaptureRegion, KeyInfoInstance, KeyInfoSettings, ProjectKeyInfoData,
    create_empty_key_info_data, create_key_info_capture, create_key_info_instance, get_instance_by_item,
};
use ahash::AHashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct KeyInfoState {
    pub data: ProjectKeyInfoData,
    pub settings: KeyInfoSettings,
    pub saving: bool,
    pub capture_mode: bool,
    pub capture_target_instance_id: Option<String>,
}

impl Default for KeyInfoState {
    fn default() -> Self {
        Self {
            data: create_empty_key_info_data(),
            settings: KeyInfoSettings::default(),
            saving: false,
            capture_mode: false,
            capture_target_instance_id: None,
        }
    }
}

/// Key info of the open project together with the global settings that
/// define its categories.
#[derive(Debug, Default)]
pub struct KeyInfoStore {
    state: Writable<KeyInfoState>,
}

observable!(KeyInfoStore, KeyInfoState);

impl KeyInfoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads project data, moving legacy single-value fields into arrays.
    pub fn init(&mut self, data: ProjectKeyInfoData, settings: KeyInfoSettings) {
        let data = key_info::migrate_key_info_data(&data);
        self.state.modify(|s| {
            s.data = data;
            s.settings = settings;
        });
    }

    pub fn set_data(&mut self, data: ProjectKeyInfoData) {
        self.state.modify(|s| s.data = data);
    }

    pub fn set_settings(&mut self, settings: KeyInfoSettings) {
        self.state.modify(|s| s.settings = settings);
    }

    pub fn set_saving(&mut self, saving: bool) {
        self.state.modify(|s| s.saving = saving);
    }

    /// Returns the instance for `(category_id, item_id)`, creating it when
    /// missing. Subscribers are only notified on creation.
    pub fn upsert_instance(&mut self, category_id: &str, item_id: &str) -> KeyInfoInstance {
        if let Some(existing) = get_instance_by_item(&self.state.get().data.instances, category_id, item_id) {
            return existing.clone();
        }
        let instance = create_key_info_instance(category_id, item_id, self.state.get().data.instances.len());
        self.state.modify(|s| {
            s.data.instances.push(instance.clone());
            s.data.updated_at = Some(now_iso());
        });
        instance
    }

    /// Appends a capture to the instance and returns the new capture id, or
    /// `None` when the instance does not exist.
    pub fn add_instance_capture(
        &mut self,
        instance_id: &str,
        region: CaptureRegion,
        label: Option<&str>,
    ) -> Option<String> {
        let capture = create_key_info_capture(region, label);
        let capture_id = capture.id.clone();
        self.edit_instance(instance_id, |instance| instance.capture_values.push(capture))
            .then_some(capture_id)
    }

    /// Removes a capture from the array or the legacy field.
    pub fn remove_instance_capture(&mut self, instance_id: &str, capture_id: &str) {
        self.edit_instance(instance_id, |instance| {
            instance.capture_values.retain(|capture| capture.id != capture_id);
            if instance.capture_value.as_ref().is_some_and(|capture| capture.id == capture_id) {
                instance.capture_value = None;
            }
        });
    }

    pub fn update_instance_text(&mut self, instance_id: &str, text: &str) {
        self.edit_instance(instance_id, |instance| instance.text_value = Some(text.to_string()));
    }

    pub fn add_instance_image(&mut self, instance_id: &str, image_id: &str, caption: Option<&str>) {
        self.edit_instance(instance_id, |instance| {
            instance.image_ids.push(image_id.to_string());
            if let Some(caption) = caption {
                instance.image_captions.insert(image_id.to_string(), caption.to_string());
            }
        });
    }

    pub fn remove_instance_image(&mut self, instance_id: &str, image_id: &str) {
        self.edit_instance(instance_id, |instance| {
            instance.image_ids.retain(|id| id != image_id);
            instance.image_captions.remove(image_id);
            if instance.image_id.as_deref() == Some(image_id) {
                instance.image_id = None;
                instance.image_caption = None;
            }
        });
    }

    pub fn update_image_caption(&mut self, instance_id: &str, image_id: &str, caption: &str) {
        self.edit_instance(instance_id, |instance| {
            if instance.image_id.as_deref() == Some(image_id) {
                instance.image_caption = Some(caption.to_string());
            } else {
                instance.image_captions.insert(image_id.to_string(), caption.to_string());
            }
        });
    }

    pub fn remove_instance(&mut self, instance_id: &str) {
        self.state.modify(|s| {
            s.data.instances.retain(|instance| instance.id != instance_id);
            s.data.updated_at = Some(now_iso());
        });
    }

    /// Clears every value of the instance while keeping the instance itself.
    pub fn clear_instance_data(&mut self, instance_id: &str) {
        self.edit_instance(instance_id, |instance| {
            instance.text_value = None;
            instance.capture_values.clear();
            instance.image_ids.clear();
            instance.image_captions.clear();
            instance.capture_value = None;
            instance.image_id = None;
            instance.image_caption = None;
        });
    }

    pub fn start_capture_mode(&mut self, instance_id: &str) {
        self.state.modify(|s| {
            s.capture_mode = true;
            s.capture_target_instance_id = Some(instance_id.to_string());
        });
    }

    pub fn end_capture_mode(&mut self) {
        self.state.modify(|s| {
            s.capture_mode = false;
            s.capture_target_instance_id = None;
        });
    }

    pub fn reset(&mut self) {
        self.state.set(KeyInfoState::default());
    }

    pub fn instances_by_category(&self) -> AHashMap<&str, Vec<&KeyInfoInstance>> {
        key_info::group_instances_by_category(&self.state.get().data.instances)
    }

    pub fn category_completion_status(&self) -> AHashMap<&str, bool> {
        let state = self.state.get();
        state
            .settings
            .categories
            .iter()
            .map(|category| {
                (
                    category.id.as_str(),
                    key_info::is_category_complete(category, &state.data.instances),
                )
            })
            .collect()
    }

    pub fn all_categories_complete(&self) -> bool {
        let state = self.state.get();
        key_info::are_all_categories_complete(&state.settings.categories, &state.data.instances)
    }

    pub fn capture_overlays(&self) -> Vec<CaptureOverlay> {
        let state = self.state.get();
        key_info::capture_overlays(&state.data, &state.settings)
    }

    /// Applies `edit` to one instance and stamps it. Returns false, without
    /// notifying, when the instance does not exist.
    fn edit_instance(&mut self, instance_id: &str, edit: impl FnOnce(&mut KeyInfoInstance)) -> bool {
        if !self.state.get().data.instances.iter().any(|i| i.id == instance_id) {
            log::debug!("Ignoring edit of unknown key info instance '{}'", instance_id);
            return false;
        }
        self.state.modify(|s| {
            let now = now_iso();
            if let Some(instance) = s.data.instances.iter_mut().find(|i| i.id == instance_id) {
                edit(instance);
                instance.updated_at = Some(now.clone());
            }
            s.data.updated_at = Some(now);
        });
        true
    }
}
