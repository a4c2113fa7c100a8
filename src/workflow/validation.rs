//! Structural rules for the unified step sequence and for support relations.
//!
//! Nothing here fails: every check reports a result and leaves the decision to
//! apply or discard a mutation to the caller.

use super::types::{CoreStepDefinition, SupportRelation, UnifiedStepItem, WorkflowStepInstance};
use crate::list;
use ahash::AHashSet;

pub const FIRST_NOT_CORE_MESSAGE: &str = "첫 번째 스텝은 반드시 코어 스텝이어야 합니다.";
pub const LAST_NOT_CORE_MESSAGE: &str = "마지막 스텝은 반드시 코어 스텝이어야 합니다.";
pub const SELF_SUPPORT_MESSAGE: &str = "스텝은 자기 자신을 지원할 수 없습니다.";
pub const STEP_NOT_FOUND_MESSAGE: &str = "스텝을 찾을 수 없습니다.";
pub const TARGET_IS_SUPPORTER_MESSAGE: &str =
    "지원 스텝은 다른 스텝의 지원 대상이 될 수 없습니다.";
pub const SUPPORTER_ALREADY_SUPPORTING_MESSAGE: &str = "이미 다른 스텝을 지원하고 있는 스텝입니다.";

/// Outcome of a structural check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error_message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message.into()),
        }
    }
}

/// The first and last entries of a non-empty sequence must be Core Steps.
///
/// `steps` must already be in display order.
pub fn validate_first_last_core(steps: &[UnifiedStepItem]) -> ValidationResult {
    let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
        return ValidationResult::valid();
    };
    if !first.is_core() {
        return ValidationResult::invalid(FIRST_NOT_CORE_MESSAGE);
    }
    if !last.is_core() {
        return ValidationResult::invalid(LAST_NOT_CORE_MESSAGE);
    }
    ValidationResult::valid()
}

/// Checks the sequence that moving `from` to `to` would produce.
pub fn validate_reorder(steps: &[UnifiedStepItem], from: usize, to: usize) -> ValidationResult {
    if from == to {
        return ValidationResult::valid();
    }
    let simulated = list::reorder(steps, from, to);
    validate_first_last_core(&simulated)
}

/// Checks the sequence that removing `index` would produce.
pub fn validate_deletion(steps: &[UnifiedStepItem], index: usize) -> ValidationResult {
    if steps.len() <= 1 {
        return ValidationResult::valid();
    }
    let simulated = list::remove_at(steps, index);
    if simulated.is_empty() {
        return ValidationResult::valid();
    }
    validate_first_last_core(&simulated)
}

/// Which Core Step definitions are present in the unified sequence.
#[derive(Debug, Clone)]
pub struct CoreStepCompletion<'a> {
    pub is_complete: bool,
    pub present_ids: AHashSet<String>,
    /// Definitions with no matching instance, in definition order.
    pub missing_definitions: Vec<&'a CoreStepDefinition>,
}

pub fn check_core_step_completion<'a>(
    unified_steps: &[UnifiedStepItem],
    definitions: &'a [CoreStepDefinition],
) -> CoreStepCompletion<'a> {
    let present_ids: AHashSet<String> = unified_steps
        .iter()
        .filter_map(UnifiedStepItem::core_step_id)
        .map(str::to_string)
        .collect();
    let missing_definitions: Vec<&CoreStepDefinition> = definitions
        .iter()
        .filter(|def| !present_ids.contains(&def.id))
        .collect();

    CoreStepCompletion {
        is_complete: !definitions.is_empty() && missing_definitions.is_empty(),
        present_ids,
        missing_definitions,
    }
}

/// Returns `None` when `supporter_id` may support `target_id`, otherwise the
/// message of the first violated rule.
///
/// Rules are checked in order: self-support, unknown steps, a target that is
/// itself a supporter, a supporter already supporting another step.
pub fn validate_support_creation(
    supporter_id: &str,
    target_id: &str,
    steps: &[WorkflowStepInstance],
    relations: &[SupportRelation],
) -> Option<String> {
    if supporter_id == target_id {
        return Some(SELF_SUPPORT_MESSAGE.to_string());
    }
    let exists = |id: &str| steps.iter().any(|s| s.id == id);
    if !exists(supporter_id) || !exists(target_id) {
        return Some(STEP_NOT_FOUND_MESSAGE.to_string());
    }
    if relations.iter().any(|r| r.supporter_step_id == target_id) {
        return Some(TARGET_IS_SUPPORTER_MESSAGE.to_string());
    }
    if relations.iter().any(|r| r.supporter_step_id == supporter_id) {
        return Some(SUPPORTER_ALREADY_SUPPORTING_MESSAGE.to_string());
    }
    None
}
