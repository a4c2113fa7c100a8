//! Constructors that stamp fresh ids and creation timestamps.

use super::types::*;
use crate::clock::now_iso;
use crate::id;

pub fn create_core_step_definition(name: &str, requires_key_step_linking: bool) -> CoreStepDefinition {
    CoreStepDefinition {
        id: id::core_step(),
        name: name.to_string(),
        presets: Vec::new(),
        requires_key_step_linking,
        created_at: now_iso(),
    }
}

pub fn create_core_step_preset(
    name: &str,
    allowed_types: Vec<PresetInputType>,
    order: usize,
) -> CoreStepPreset {
    CoreStepPreset {
        id: id::core_step_preset(),
        name: name.to_string(),
        allowed_types,
        order,
    }
}

pub fn create_core_step_instance(
    core_step_id: &str,
    preset_values: Vec<CoreStepPresetValue>,
    order: usize,
) -> CoreStepInstance {
    CoreStepInstance {
        id: id::core_step_instance(),
        core_step_id: core_step_id.to_string(),
        preset_values,
        order,
        created_at: now_iso(),
    }
}

pub fn create_phase_type(name: &str, color: &str, order: usize) -> PhaseType {
    PhaseType {
        id: id::phase(),
        name: name.to_string(),
        color: color.to_string(),
        order,
    }
}

pub fn create_support_relation(supporter_step_id: &str, target_step_id: &str, phase_id: &str) -> SupportRelation {
    SupportRelation {
        id: id::support(),
        supporter_step_id: supporter_step_id.to_string(),
        target_step_id: target_step_id.to_string(),
        phase_id: phase_id.to_string(),
        created_at: now_iso(),
    }
}

pub fn create_workflow_definition(name: &str, order: usize) -> WorkflowDefinition {
    WorkflowDefinition {
        id: id::workflow(),
        name: name.to_string(),
        order,
        steps: WorkflowSteps {
            columns: DEFAULT_WORKFLOW_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        },
        created_at: now_iso(),
    }
}

pub fn create_workflow_step_row(values: Vec<String>) -> WorkflowStepRow {
    WorkflowStepRow {
        id: id::row(),
        values,
    }
}

pub fn create_empty_workflow_data() -> ProjectWorkflowData {
    let now = now_iso();
    ProjectWorkflowData {
        created_at: Some(now.clone()),
        updated_at: Some(now),
        ..ProjectWorkflowData::default()
    }
}

pub fn create_step_instance(step_id: &str, order: usize) -> WorkflowStepInstance {
    WorkflowStepInstance {
        id: id::step_instance(),
        step_id: step_id.to_string(),
        captures: Vec::new(),
        attachments: Vec::new(),
        order,
        created_at: now_iso(),
    }
}

pub fn create_step_capture(
    slide_index: u32,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    label: Option<&str>,
) -> StepCapture {
    StepCapture {
        id: id::step_capture(),
        slide_index,
        x,
        y,
        width,
        height,
        label: label.map(str::to_string),
    }
}

/// Creates a text attachment (`content` is the text) or an image attachment
/// (`content` is the stored image id).
pub fn create_attachment(kind: AttachmentKind, content: &str, caption: Option<&str>) -> StepAttachment {
    let content = match kind {
        AttachmentKind::Text => AttachmentContent::Text {
            data: content.to_string(),
        },
        AttachmentKind::Image => AttachmentContent::Image {
            image_id: content.to_string(),
        },
    };
    StepAttachment {
        id: id::attachment(),
        content,
        caption: caption.map(str::to_string),
        created_at: now_iso(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Text,
    Image,
}

pub fn create_unified_core_step(
    core_step_id: &str,
    preset_values: Vec<CoreStepPresetValue>,
    order: usize,
) -> UnifiedStepItem {
    UnifiedStepItem::Core(CoreStepInstance {
        id: id::unified_step(),
        core_step_id: core_step_id.to_string(),
        preset_values,
        order,
        created_at: now_iso(),
    })
}

pub fn create_unified_regular_step(step_id: &str, order: usize) -> UnifiedStepItem {
    UnifiedStepItem::Regular(WorkflowStepInstance {
        id: id::unified_step(),
        step_id: step_id.to_string(),
        captures: Vec::new(),
        attachments: Vec::new(),
        order,
        created_at: now_iso(),
    })
}

/// Empty preset values for every preset of `definition`, using each preset's
/// first allowed input type.
pub fn empty_preset_values(definition: &CoreStepDefinition) -> Vec<CoreStepPresetValue> {
    definition
        .presets
        .iter()
        .filter_map(|preset| {
            let value = match preset.allowed_types.first()? {
                PresetInputType::Capture => PresetValue::Capture { capture: None },
                PresetInputType::Text => PresetValue::Text { text: None },
                PresetInputType::ImageClipboard => PresetValue::ImageClipboard { image_id: None },
            };
            Some(CoreStepPresetValue {
                preset_id: preset.id.clone(),
                value,
            })
        })
        .collect()
}
