use super::writable::{Writable, observable};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// What a drag gesture will do when released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    Reorder,
    Support,
}

/// Where the pointer is while dragging over the step list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropHover {
    /// Over the step at `index`; `upper_half` when above its vertical centre.
    Item { index: usize, upper_half: bool },
    /// Over the list container, past the last step.
    Container,
}

/// The insertion slot for a hover position: before the hovered step when in
/// its upper half, after it otherwise, and past the end over the container.
///
/// Slots range over `0..=total`.
pub fn drop_slot(hover: DropHover, total: usize) -> usize {
    match hover {
        DropHover::Item { index, upper_half: true } => index.min(total),
        DropHover::Item { index, upper_half: false } => index.saturating_add(1).min(total),
        DropHover::Container => total,
    }
}

/// Converts an insertion slot into the `(from, to)` pair of a reorder, or
/// `None` when dropping there leaves the sequence unchanged.
///
/// A slot after the dragged step shifts down by one once the step has been
/// taken out of the list.
pub fn resolve_drop(dragged: usize, slot: usize) -> Option<(usize, usize)> {
    let to = if dragged < slot { slot - 1 } else { slot };
    (to != dragged).then_some((dragged, to))
}

/// Pointer state of one drag interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragDropState {
    pub dragged_index: Option<usize>,
    /// Insertion slot, see [`drop_slot`].
    pub drop_target_index: Option<usize>,
    pub mode: Option<DragMode>,
    pub support_guide_target_step_id: Option<String>,
}

impl DragDropState {
    /// The reorder a release would perform right now.
    pub fn pending_move(&self) -> Option<(usize, usize)> {
        match (self.dragged_index, self.drop_target_index) {
            (Some(dragged), Some(slot)) => resolve_drop(dragged, slot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_step_ids: AHashSet<String>,
    pub last_clicked_step_id: Option<String>,
    pub is_selection_mode_active: bool,
}

/// Slide-capture mode. Core step captures also carry the preset and instance
/// they fill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureState {
    pub is_active: bool,
    pub target_step_id: Option<String>,
    pub target_preset_id: Option<String>,
    pub target_instance_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedState {
    pub expanded_step_id: Option<String>,
    pub expanded_core_step_id: Option<String>,
    pub adding_attachment_to_step_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupState {
    pub show_add_step_popup: bool,
    pub show_core_step_selector: bool,
    pub show_phase_list_popup: bool,
    pub show_key_step_linking_wizard: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Graph,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub drag_drop: DragDropState,
    pub selection: SelectionState,
    pub capture: CaptureState,
    pub expanded: ExpandedState,
    pub popup: PopupState,
    pub view_mode: ViewMode,
}

/// Transient viewer state: drag and drop, selection, capture mode, expanded
/// panels and popups.
#[derive(Debug, Default)]
pub struct UiStore {
    state: Writable<UiState>,
}

observable!(UiStore, UiState);

fn toggled(current: &Option<String>, id: &str) -> Option<String> {
    match current.as_deref() {
        Some(open) if open == id => None,
        _ => Some(id.to_string()),
    }
}

impl UiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.state.modify(|s| s.view_mode = mode);
    }

    pub fn start_drag(&mut self, index: usize) {
        self.state.modify(|s| s.drag_drop.dragged_index = Some(index));
    }

    pub fn set_drop_target(&mut self, slot: Option<usize>) {
        self.state.modify(|s| s.drag_drop.drop_target_index = slot);
    }

    /// Records the slot for `hover` over a list of `total` steps.
    pub fn hover_drop_target(&mut self, hover: DropHover, total: usize) {
        self.set_drop_target(Some(drop_slot(hover, total)));
    }

    pub fn set_drag_mode(&mut self, mode: Option<DragMode>) {
        self.state.modify(|s| s.drag_drop.mode = mode);
    }

    pub fn set_support_guide_target(&mut self, step_id: Option<&str>) {
        self.state
            .modify(|s| s.drag_drop.support_guide_target_step_id = step_id.map(str::to_string));
    }

    /// Ends the interaction and returns the reorder to apply, if any.
    pub fn end_drag(&mut self) -> Option<(usize, usize)> {
        self.state.modify(|s| std::mem::take(&mut s.drag_drop).pending_move())
    }

    /// A plain click selects only `step_id`; with ctrl held it toggles
    /// `step_id` in the current selection.
    pub fn toggle_selection(&mut self, step_id: &str, ctrl_key: bool) {
        self.state.modify(|s| {
            let selected = &mut s.selection.selected_step_ids;
            if ctrl_key {
                if !selected.remove(step_id) {
                    selected.insert(step_id.to_string());
                }
            } else {
                selected.clear();
                selected.insert(step_id.to_string());
            }
            s.selection.last_clicked_step_id = Some(step_id.to_string());
            s.selection.is_selection_mode_active = !s.selection.selected_step_ids.is_empty();
        });
    }

    /// Adds every id between `from_id` and `to_id` (inclusive, either
    /// direction) to the selection. Unknown ids leave the state untouched.
    pub fn select_range(&mut self, step_ids: &[String], from_id: &str, to_id: &str) {
        let position = |id: &str| step_ids.iter().position(|s| s == id);
        let (Some(from), Some(to)) = (position(from_id), position(to_id)) else {
            return;
        };
        let (start, end) = (from.min(to), from.max(to));
        self.state.modify(|s| {
            s.selection
                .selected_step_ids
                .extend(step_ids[start..=end].iter().cloned());
            s.selection.is_selection_mode_active = true;
        });
    }

    pub fn select_all(&mut self, step_ids: &[String]) {
        self.state.modify(|s| {
            s.selection.selected_step_ids = step_ids.iter().cloned().collect();
            s.selection.is_selection_mode_active = true;
        });
    }

    pub fn clear_selection(&mut self) {
        self.state.modify(|s| s.selection = SelectionState::default());
    }

    pub fn start_capture(&mut self, step_id: &str, preset_id: Option<&str>, instance_id: Option<&str>) {
        self.state.modify(|s| {
            s.capture = CaptureState {
                is_active: true,
                target_step_id: Some(step_id.to_string()),
                target_preset_id: preset_id.map(str::to_string),
                target_instance_id: instance_id.map(str::to_string),
            }
        });
    }

    pub fn stop_capture(&mut self) {
        self.state.modify(|s| s.capture = CaptureState::default());
    }

    /// Expanding or collapsing a step closes its attachment section and
    /// cancels an active capture.
    pub fn toggle_step_expand(&mut self, step_id: &str) {
        self.state.modify(|s| {
            s.expanded.expanded_step_id = toggled(&s.expanded.expanded_step_id, step_id);
            s.expanded.adding_attachment_to_step_id = None;
            s.capture = CaptureState::default();
        });
    }

    pub fn toggle_core_step_expand(&mut self, instance_id: &str) {
        self.state.modify(|s| {
            s.expanded.expanded_core_step_id = toggled(&s.expanded.expanded_core_step_id, instance_id)
        });
    }

    pub fn toggle_attachment_section(&mut self, step_id: &str) {
        self.state.modify(|s| {
            s.expanded.adding_attachment_to_step_id = toggled(&s.expanded.adding_attachment_to_step_id, step_id);
            s.capture = CaptureState::default();
        });
    }

    /// The add-step popup and the core step selector exclude each other.
    pub fn toggle_add_step_popup(&mut self) {
        self.state.modify(|s| {
            s.popup.show_add_step_popup = !s.popup.show_add_step_popup;
            s.popup.show_core_step_selector = false;
        });
    }

    pub fn toggle_core_step_selector(&mut self) {
        self.state.modify(|s| {
            s.popup.show_core_step_selector = !s.popup.show_core_step_selector;
            s.popup.show_add_step_popup = false;
        });
    }

    pub fn toggle_phase_list_popup(&mut self) {
        self.state
            .modify(|s| s.popup.show_phase_list_popup = !s.popup.show_phase_list_popup);
    }

    /// Shows or hides the key step linking wizard; `None` flips it.
    pub fn toggle_key_step_linking_wizard(&mut self, show: Option<bool>) {
        self.state.modify(|s| {
            s.popup.show_key_step_linking_wizard = show.unwrap_or(!s.popup.show_key_step_linking_wizard)
        });
    }

    pub fn close_all_popups(&mut self) {
        self.state.modify(|s| s.popup = PopupState::default());
    }

    pub fn reset(&mut self) {
        self.state.set(UiState::default());
    }

    pub fn is_capturing(&self) -> bool {
        self.state.get().capture.is_active
    }

    pub fn selected_count(&self) -> usize {
        self.state.get().selection.selected_step_ids.len()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.get().drag_drop.dragged_index.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_in_place_is_not_a_move() {
        assert_eq!(resolve_drop(2, 2), None);
        assert_eq!(resolve_drop(2, 3), None);
        assert_eq!(resolve_drop(2, 4), Some((2, 3)));
        assert_eq!(resolve_drop(2, 0), Some((2, 0)));
    }
}
