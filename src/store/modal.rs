use super::writable::{Writable, observable};
use crate::workflow::StepAttachment;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachmentModalState {
    pub is_open: bool,
    pub attachment: Option<StepAttachment>,
    pub step_id: Option<String>,
    pub caption: String,
}

/// A pasted image waiting to be attached to a Regular Step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageAddModalState {
    pub is_open: bool,
    pub image_data: Option<String>,
    pub step_id: Option<String>,
    pub caption: String,
    pub is_uploading: bool,
}

/// A pasted image for an image preset of a Core Step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreStepImageModalState {
    pub is_open: bool,
    pub preset_id: Option<String>,
    pub instance_id: Option<String>,
    pub image_data: Option<String>,
    pub caption: String,
    pub is_editing: bool,
    pub is_uploading: bool,
}

/// Asks which phase a new support relation goes under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseSelectModalState {
    pub is_open: bool,
    pub supporter_step_id: Option<String>,
    pub target_step_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState {
    pub attachment: AttachmentModalState,
    pub image_add: ImageAddModalState,
    pub core_step_image: CoreStepImageModalState,
    pub phase_select: PhaseSelectModalState,
}

impl ModalState {
    pub fn is_any_open(&self) -> bool {
        self.attachment.is_open || self.image_add.is_open || self.core_step_image.is_open || self.phase_select.is_open
    }
}

#[derive(Debug, Default)]
pub struct ModalStore {
    state: Writable<ModalState>,
}

observable!(ModalStore, ModalState);

impl ModalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the viewer for `attachment`, seeding the caption editor with its
    /// current caption.
    pub fn open_attachment_modal(&mut self, step_id: &str, attachment: StepAttachment) {
        self.state.modify(|s| {
            s.attachment = AttachmentModalState {
                is_open: true,
                caption: attachment.caption.clone().unwrap_or_default(),
                attachment: Some(attachment),
                step_id: Some(step_id.to_string()),
            }
        });
    }

    pub fn close_attachment_modal(&mut self) {
        self.state.modify(|s| s.attachment = AttachmentModalState::default());
    }

    pub fn update_attachment_caption(&mut self, caption: &str) {
        self.state.modify(|s| s.attachment.caption = caption.to_string());
    }

    pub fn open_image_add_modal(&mut self, step_id: &str, image_data: &str) {
        self.state.modify(|s| {
            s.image_add = ImageAddModalState {
                is_open: true,
                image_data: Some(image_data.to_string()),
                step_id: Some(step_id.to_string()),
                caption: String::new(),
                is_uploading: false,
            }
        });
    }

    pub fn close_image_add_modal(&mut self) {
        self.state.modify(|s| s.image_add = ImageAddModalState::default());
    }

    pub fn set_image_uploading(&mut self, is_uploading: bool) {
        self.state.modify(|s| s.image_add.is_uploading = is_uploading);
    }

    pub fn update_image_caption(&mut self, caption: &str) {
        self.state.modify(|s| s.image_add.caption = caption.to_string());
    }

    pub fn open_core_step_image_modal(
        &mut self,
        instance_id: &str,
        preset_id: &str,
        image_data: &str,
        caption: &str,
        is_editing: bool,
    ) {
        self.state.modify(|s| {
            s.core_step_image = CoreStepImageModalState {
                is_open: true,
                preset_id: Some(preset_id.to_string()),
                instance_id: Some(instance_id.to_string()),
                image_data: Some(image_data.to_string()),
                caption: caption.to_string(),
                is_editing,
                is_uploading: false,
            }
        });
    }

    pub fn close_core_step_image_modal(&mut self) {
        self.state.modify(|s| s.core_step_image = CoreStepImageModalState::default());
    }

    pub fn set_core_step_image_uploading(&mut self, is_uploading: bool) {
        self.state.modify(|s| s.core_step_image.is_uploading = is_uploading);
    }

    pub fn update_core_step_image_caption(&mut self, caption: &str) {
        self.state.modify(|s| s.core_step_image.caption = caption.to_string());
    }

    pub fn open_phase_select_modal(&mut self, supporter_step_id: &str, target_step_id: &str) {
        self.state.modify(|s| {
            s.phase_select = PhaseSelectModalState {
                is_open: true,
                supporter_step_id: Some(supporter_step_id.to_string()),
                target_step_id: Some(target_step_id.to_string()),
            }
        });
    }

    pub fn close_phase_select_modal(&mut self) {
        self.state.modify(|s| s.phase_select = PhaseSelectModalState::default());
    }

    pub fn close_all(&mut self) {
        self.state.set(ModalState::default());
    }

    pub fn is_any_modal_open(&self) -> bool {
        self.state.get().is_any_open()
    }
}
