use crate::list::{self, Identified, Ordered};
use serde::{Deserialize, Serialize};

/// The implicit phase of every step that is not attached to another step as a
/// supporter.
pub const MAIN_PHASE_ID: &str = "main";

/// A rectangular region of a slide used as evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepCapture {
    pub id: String,
    pub slide_index: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The payload of a step attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AttachmentContent {
    Text {
        #[serde(alias = "content")]
        data: String,
    },
    Image {
        #[serde(rename = "imageId")]
        image_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepAttachment {
    pub id: String,
    #[serde(flatten)]
    pub content: AttachmentContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// A Regular Step placed in a project's workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStepInstance {
    pub id: String,
    /// Id of the step-definition row this instance was created from.
    #[serde(default)]
    pub step_id: String,
    #[serde(default)]
    pub captures: Vec<StepCapture>,
    #[serde(default)]
    pub attachments: Vec<StepAttachment>,
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub created_at: String,
}

/// The kinds of content a Core Step preset may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetInputType {
    Capture,
    Text,
    ImageClipboard,
}

impl PresetInputType {
    pub fn as_str(self) -> &'static str {
        match self {
            PresetInputType::Capture => "capture",
            PresetInputType::Text => "text",
            PresetInputType::ImageClipboard => "image_clipboard",
        }
    }

    /// The label shown in the editor.
    pub fn display_name(self) -> &'static str {
        match self {
            PresetInputType::Capture => "캡처",
            PresetInputType::Text => "텍스트",
            PresetInputType::ImageClipboard => "이미지 붙여넣기",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "capture" => Some(PresetInputType::Capture),
            "text" => Some(PresetInputType::Text),
            "image_clipboard" => Some(PresetInputType::ImageClipboard),
            _ => None,
        }
    }
}

/// Display name for a raw input-type string; unknown types are shown as-is.
pub fn input_type_display_name(raw: &str) -> &str {
    PresetInputType::parse(raw).map_or(raw, |input_type| input_type.display_name())
}

/// A named field of a Core Step definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreStepPreset {
    pub id: String,
    pub name: String,
    pub allowed_types: Vec<PresetInputType>,
    #[serde(default)]
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreStepDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub presets: Vec<CoreStepPreset>,
    #[serde(default)]
    pub requires_key_step_linking: bool,
    #[serde(default)]
    pub created_at: String,
}

/// The value filled into one preset of a Core Step instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "inputType", rename_all = "snake_case")]
pub enum PresetValue {
    Capture {
        #[serde(
            rename = "captureValue",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        capture: Option<StepCapture>,
    },
    Text {
        #[serde(rename = "textValue", default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    ImageClipboard {
        #[serde(rename = "imageId", default, skip_serializing_if = "Option::is_none")]
        image_id: Option<String>,
    },
}

impl PresetValue {
    pub fn input_type(&self) -> PresetInputType {
        match self {
            PresetValue::Capture { .. } => PresetInputType::Capture,
            PresetValue::Text { .. } => PresetInputType::Text,
            PresetValue::ImageClipboard { .. } => PresetInputType::ImageClipboard,
        }
    }

    /// Whether the user has actually filled something in.
    pub fn is_filled(&self) -> bool {
        match self {
            PresetValue::Capture { capture } => capture.is_some(),
            PresetValue::Text { text } => text.as_deref().is_some_and(|t| !t.trim().is_empty()),
            PresetValue::ImageClipboard { image_id } => image_id.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreStepPresetValue {
    pub preset_id: String,
    #[serde(flatten)]
    pub value: PresetValue,
}

/// A Core Step placed in a project's workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreStepInstance {
    pub id: String,
    #[serde(default)]
    pub core_step_id: String,
    #[serde(default)]
    pub preset_values: Vec<CoreStepPresetValue>,
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub created_at: String,
}

/// Discriminant of [`UnifiedStepItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Core,
    Regular,
}

/// One entry of the merged Core/Regular step sequence.
///
/// Persisted with an internal `"type": "core" | "regular"` tag next to the
/// fields of the wrapped instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum UnifiedStepItem {
    Core(CoreStepInstance),
    Regular(WorkflowStepInstance),
}

impl UnifiedStepItem {
    pub fn kind(&self) -> StepKind {
        match self {
            UnifiedStepItem::Core(_) => StepKind::Core,
            UnifiedStepItem::Regular(_) => StepKind::Regular,
        }
    }

    pub fn is_core(&self) -> bool {
        matches!(self, UnifiedStepItem::Core(_))
    }

    pub fn id(&self) -> &str {
        match self {
            UnifiedStepItem::Core(core) => &core.id,
            UnifiedStepItem::Regular(step) => &step.id,
        }
    }

    pub fn order(&self) -> usize {
        match self {
            UnifiedStepItem::Core(core) => core.order,
            UnifiedStepItem::Regular(step) => step.order,
        }
    }

    pub fn created_at(&self) -> &str {
        match self {
            UnifiedStepItem::Core(core) => &core.created_at,
            UnifiedStepItem::Regular(step) => &step.created_at,
        }
    }

    pub fn as_core(&self) -> Option<&CoreStepInstance> {
        match self {
            UnifiedStepItem::Core(core) => Some(core),
            UnifiedStepItem::Regular(_) => None,
        }
    }

    pub fn as_regular(&self) -> Option<&WorkflowStepInstance> {
        match self {
            UnifiedStepItem::Regular(step) => Some(step),
            UnifiedStepItem::Core(_) => None,
        }
    }

    /// The Core Step definition id, for core items.
    pub fn core_step_id(&self) -> Option<&str> {
        self.as_core().map(|core| core.core_step_id.as_str())
    }
}

/// A phase-scoped "supporting" link from one step to a main-flow step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportRelation {
    pub id: String,
    pub supporter_step_id: String,
    pub target_step_id: String,
    pub phase_id: String,
    #[serde(default)]
    pub created_at: String,
}

/// User-defined category for support relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseType {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub order: usize,
}

/// Partial update for [`PhaseType`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseTypeUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// The phase a step belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseAssignment {
    /// The step is part of the main flow.
    Main,
    /// The step supports another step under the given phase.
    Phase(String),
}

impl PhaseAssignment {
    pub fn phase_id(&self) -> &str {
        match self {
            PhaseAssignment::Main => MAIN_PHASE_ID,
            PhaseAssignment::Phase(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStepLink {
    pub step_id: String,
    pub priority: u32,
}

/// Priority-ranked steps contributing to a Core Step that requires linking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStepLinkingData {
    pub core_step_instance_id: String,
    #[serde(default)]
    pub linked_steps: Vec<KeyStepLink>,
    #[serde(default)]
    pub confirmed_at: String,
}

/// The persisted workflow of one project.
///
/// Every mutation in this crate takes an aggregate by reference and returns a
/// new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWorkflowData {
    #[serde(default)]
    pub steps: Vec<WorkflowStepInstance>,
    /// Legacy storage for Core Steps, superseded by `unified_steps`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub core_step_instances: Vec<CoreStepInstance>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unified_steps: Vec<UnifiedStepItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phase_types: Vec<PhaseType>,
    #[serde(default)]
    pub support_relations: Vec<SupportRelation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_step_links: Vec<KeyStepLinkingData>,
    #[serde(default)]
    pub is_confirmed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

pub const DEFAULT_WORKFLOW_COLUMNS: [&str; 2] = ["step", "description"];

/// A row of a step-definition table; Regular Steps reference it by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStepRow {
    pub id: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSteps {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<WorkflowStepRow>,
}

/// A named step-definition table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub order: usize,
    pub steps: WorkflowSteps,
    #[serde(default)]
    pub created_at: String,
}

list::impl_identified_ordered!(
    WorkflowStepInstance,
    CoreStepInstance,
    CoreStepPreset,
    PhaseType,
    WorkflowDefinition,
);

impl Identified for UnifiedStepItem {
    fn id(&self) -> &str {
        UnifiedStepItem::id(self)
    }
}

impl Ordered for UnifiedStepItem {
    fn order(&self) -> usize {
        UnifiedStepItem::order(self)
    }

    fn set_order(&mut self, order: usize) {
        match self {
            UnifiedStepItem::Core(core) => core.order = order,
            UnifiedStepItem::Regular(step) => step.order = order,
        }
    }
}

impl Identified for SupportRelation {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for CoreStepDefinition {
    fn id(&self) -> &str {
        &self.id
    }
}
