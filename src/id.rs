//! Prefixed, collision-resistant string identifiers.
//!
//! Every id has the shape `{prefix}_{epochMillis}_{suffix}` where the suffix is
//! seven random base36 characters. Ids are opaque keys once persisted; the
//! prefix only helps a human reading raw JSON.

use chrono::Utc;
use rand::Rng;

const SUFFIX_LEN: usize = 7;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates an id with an arbitrary prefix.
pub fn generate_id(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), suffix)
}

/// The prefixes used across the workflow, key-info and decision-graph models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdPrefix {
    Evidence,
    CauseImage,
    ActionCapture,
    CoreStep,
    CoreStepPreset,
    CoreStepInstance,
    Phase,
    Support,
    StepInstance,
    StepCapture,
    Attachment,
    Workflow,
    Row,
    UnifiedStep,
    KeyStepLink,
    Node,
    Toast,
    KeyInfoCategory,
    KeyInfoItem,
    KeyInfoInstance,
    KeyInfoCapture,
}

impl IdPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            IdPrefix::Evidence => "ev",
            IdPrefix::CauseImage => "img",
            IdPrefix::ActionCapture => "acap",
            IdPrefix::CoreStep => "cs",
            IdPrefix::CoreStepPreset => "csp",
            IdPrefix::CoreStepInstance => "csi",
            IdPrefix::Phase => "phase",
            IdPrefix::Support => "support",
            IdPrefix::StepInstance => "step",
            IdPrefix::StepCapture => "scap",
            IdPrefix::Attachment => "att",
            IdPrefix::Workflow => "wf",
            IdPrefix::Row => "row",
            IdPrefix::UnifiedStep => "us",
            IdPrefix::KeyStepLink => "ksl",
            IdPrefix::Node => "node",
            IdPrefix::Toast => "toast",
            IdPrefix::KeyInfoCategory => "kic",
            IdPrefix::KeyInfoItem => "kii",
            IdPrefix::KeyInfoInstance => "kiin",
            IdPrefix::KeyInfoCapture => "kicap",
        }
    }

    pub fn generate(self) -> String {
        generate_id(self.as_str())
    }
}

pub fn evidence() -> String {
    IdPrefix::Evidence.generate()
}

pub fn cause_image() -> String {
    IdPrefix::CauseImage.generate()
}

pub fn action_capture() -> String {
    IdPrefix::ActionCapture.generate()
}

pub fn core_step() -> String {
    IdPrefix::CoreStep.generate()
}

pub fn core_step_preset() -> String {
    IdPrefix::CoreStepPreset.generate()
}

pub fn core_step_instance() -> String {
    IdPrefix::CoreStepInstance.generate()
}

pub fn phase() -> String {
    IdPrefix::Phase.generate()
}

pub fn support() -> String {
    IdPrefix::Support.generate()
}

pub fn step_instance() -> String {
    IdPrefix::StepInstance.generate()
}

pub fn step_capture() -> String {
    IdPrefix::StepCapture.generate()
}

pub fn attachment() -> String {
    IdPrefix::Attachment.generate()
}

pub fn workflow() -> String {
    IdPrefix::Workflow.generate()
}

pub fn row() -> String {
    IdPrefix::Row.generate()
}

pub fn unified_step() -> String {
    IdPrefix::UnifiedStep.generate()
}

pub fn key_step_link() -> String {
    IdPrefix::KeyStepLink.generate()
}

pub fn node() -> String {
    IdPrefix::Node.generate()
}

pub fn toast() -> String {
    IdPrefix::Toast.generate()
}

pub fn key_info_category() -> String {
    IdPrefix::KeyInfoCategory.generate()
}

pub fn key_info_item() -> String {
    IdPrefix::KeyInfoItem.generate()
}

pub fn key_info_instance() -> String {
    IdPrefix::KeyInfoInstance.generate()
}

pub fn key_info_capture() -> String {
    IdPrefix::KeyInfoCapture.generate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_is_seven_base36_chars() {
        let id = generate_id("x");
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "x");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(
            parts[2]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }
}
