//! Key-step linking and workflow confirmation.

use super::support::touched;
use super::types::{CoreStepDefinition, KeyStepLink, KeyStepLinkingData, ProjectWorkflowData, UnifiedStepItem};
use crate::clock::now_iso;
use ahash::AHashSet;
use itertools::Itertools;

pub const EMPTY_LINKS_MESSAGE: &str = "최소 하나의 스텝을 연결해야 합니다.";
pub const DUPLICATE_LINK_MESSAGE: &str = "같은 스텝을 중복으로 연결할 수 없습니다.";
pub const UNAVAILABLE_LINK_MESSAGE: &str = "코어 스텝 이전의 스텝만 연결할 수 있습니다.";

#[derive(Debug, Clone, PartialEq)]
pub struct KeyStepLinkingStatus<'a> {
    pub is_complete: bool,
    /// Core items whose definition requires linking but that have no links.
    pub pending_core_steps: Vec<&'a UnifiedStepItem>,
}

pub fn check_key_step_linking_complete<'a>(
    unified_steps: &'a [UnifiedStepItem],
    definitions: &[CoreStepDefinition],
    links: &[KeyStepLinkingData],
) -> KeyStepLinkingStatus<'a> {
    let requiring: AHashSet<&str> = definitions
        .iter()
        .filter(|def| def.requires_key_step_linking)
        .map(|def| def.id.as_str())
        .collect();

    let pending_core_steps: Vec<&UnifiedStepItem> = unified_steps
        .iter()
        .filter(|item| item.core_step_id().is_some_and(|id| requiring.contains(id)))
        .filter(|item| {
            get_key_step_links_for_core_step(item.id(), links).is_none_or(|entry| entry.linked_steps.is_empty())
        })
        .sorted_by_key(|item| item.order())
        .collect();

    KeyStepLinkingStatus {
        is_complete: pending_core_steps.is_empty(),
        pending_core_steps,
    }
}

/// Steps strictly before `core_step_instance_id` in unified order; empty when
/// the id is unknown.
pub fn get_available_steps_for_linking<'a>(
    unified_steps: &'a [UnifiedStepItem],
    core_step_instance_id: &str,
) -> Vec<&'a UnifiedStepItem> {
    let sorted: Vec<&UnifiedStepItem> = unified_steps.iter().sorted_by_key(|item| item.order()).collect();
    match sorted.iter().position(|item| item.id() == core_step_instance_id) {
        Some(index) => sorted[..index].to_vec(),
        None => Vec::new(),
    }
}

pub fn get_key_step_links_for_core_step<'a>(
    core_step_instance_id: &str,
    links: &'a [KeyStepLinkingData],
) -> Option<&'a KeyStepLinkingData> {
    links
        .iter()
        .find(|entry| entry.core_step_instance_id == core_step_instance_id)
}

/// Replaces (or inserts) the links of one core instance.
///
/// Links are stored sorted by the caller's priority and re-ranked densely
/// from 1.
pub fn save_key_step_links(
    data: &ProjectWorkflowData,
    core_step_instance_id: &str,
    linked_steps: Vec<KeyStepLink>,
) -> ProjectWorkflowData {
    let linked_steps: Vec<KeyStepLink> = linked_steps
        .into_iter()
        .sorted_by_key(|link| link.priority)
        .zip(1u32..)
        .map(|(link, priority)| KeyStepLink { priority, ..link })
        .collect();
    let entry = KeyStepLinkingData {
        core_step_instance_id: core_step_instance_id.to_string(),
        linked_steps,
        confirmed_at: now_iso(),
    };

    let mut next = touched(data);
    match next
        .key_step_links
        .iter_mut()
        .find(|existing| existing.core_step_instance_id == core_step_instance_id)
    {
        Some(existing) => *existing = entry,
        None => next.key_step_links.push(entry),
    }
    next
}

/// Drops every link entry of a removed core instance and every link that
/// points at a removed step.
pub fn prune_key_step_links(data: &ProjectWorkflowData, removed_step_id: &str) -> ProjectWorkflowData {
    let mut next = touched(data);
    next.key_step_links = data
        .key_step_links
        .iter()
        .filter(|entry| entry.core_step_instance_id != removed_step_id)
        .map(|entry| KeyStepLinkingData {
            linked_steps: entry
                .linked_steps
                .iter()
                .filter(|link| link.step_id != removed_step_id)
                .cloned()
                .collect(),
            ..entry.clone()
        })
        .collect();
    next
}

/// Returns `None` when `linked_steps` may be saved for the core instance,
/// otherwise the first violated rule: no links, a duplicate step, a step not
/// strictly preceding the core instance.
pub fn validate_key_step_links(
    data: &ProjectWorkflowData,
    core_step_instance_id: &str,
    linked_steps: &[KeyStepLink],
) -> Option<String> {
    if linked_steps.is_empty() {
        return Some(EMPTY_LINKS_MESSAGE.to_string());
    }
    if !linked_steps.iter().map(|link| link.step_id.as_str()).all_unique() {
        return Some(DUPLICATE_LINK_MESSAGE.to_string());
    }
    let available: AHashSet<&str> = get_available_steps_for_linking(&data.unified_steps, core_step_instance_id)
        .into_iter()
        .map(UnifiedStepItem::id)
        .collect();
    if linked_steps.iter().any(|link| !available.contains(link.step_id.as_str())) {
        return Some(UNAVAILABLE_LINK_MESSAGE.to_string());
    }
    None
}

pub fn confirm_workflow(data: &ProjectWorkflowData) -> ProjectWorkflowData {
    let now = now_iso();
    ProjectWorkflowData {
        is_confirmed: true,
        confirmed_at: Some(now.clone()),
        updated_at: Some(now),
        ..data.clone()
    }
}

pub fn unconfirm_workflow(data: &ProjectWorkflowData) -> ProjectWorkflowData {
    ProjectWorkflowData {
        is_confirmed: false,
        confirmed_at: None,
        ..touched(data)
    }
}
