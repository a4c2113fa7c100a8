//! Top-down tree layout over an arena of positioned nodes.
//!
//! A [`LayoutTree`] is rebuilt from the [`WorkflowData`] on every pass. Nodes
//! refer to their children and parent by index into the arena, so upward
//! lookups never need shared ownership.

use super::config::LayoutConfig;
use super::types::{WorkflowData, WorkflowNode};
use ahash::AHashSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode<'a> {
    pub id: &'a str,
    #[serde(skip)]
    pub node: &'a WorkflowNode,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip)]
    pub children: Vec<usize>,
    #[serde(skip)]
    pub parent: Option<usize>,
    pub is_core_node: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl TreeBounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    fn include(self, node: &LayoutNode<'_>) -> Self {
        Self {
            min_x: self.min_x.min(node.x),
            max_x: self.max_x.max(node.x + node.width),
            min_y: self.min_y.min(node.y),
            max_y: self.max_y.max(node.y + node.height),
        }
    }

    fn of(node: &LayoutNode<'_>) -> Self {
        Self {
            min_x: node.x,
            max_x: node.x + node.width,
            min_y: node.y,
            max_y: node.y + node.height,
        }
    }
}

/// Arena of layout nodes with one or more roots.
#[derive(Debug, Clone, Default)]
pub struct LayoutTree<'a> {
    nodes: Vec<LayoutNode<'a>>,
    roots: Vec<usize>,
    placed: AHashSet<&'a str>,
    /// Ids that only [`LayoutTree::add_root`] may place.
    reserved: AHashSet<&'a str>,
}

impl<'a> LayoutTree<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materializes the subtree under `root_id`.
    ///
    /// Returns `None` when `root_id` is not in the node table.
    pub fn build(workflow: &'a WorkflowData, root_id: &str, config: &LayoutConfig) -> Option<Self> {
        let mut tree = Self::new();
        let root = tree.add_subtree(workflow, root_id, None, config)?;
        tree.roots.push(root);
        Some(tree)
    }

    /// Keeps `node_id` out of every subtree so it can be added later as a
    /// root of its own.
    pub fn reserve(&mut self, node_id: &'a str) {
        self.reserved.insert(node_id);
    }

    /// Adds `node_id` and its descendants below `parent` and returns the new
    /// index.
    ///
    /// Dangling child ids are skipped, and a node already placed on this tree
    /// is never placed again, which also breaks cycles.
    pub fn add_subtree(
        &mut self,
        workflow: &'a WorkflowData,
        node_id: &str,
        parent: Option<usize>,
        config: &LayoutConfig,
    ) -> Option<usize> {
        let (id, node) = workflow.nodes.get_key_value(node_id)?;
        let height = config.node_height(node);
        let index = self.push(id, node, parent, config.node_width, height)?;
        self.add_children(workflow, index, config);
        Some(index)
    }

    /// Adds a root with explicit dimensions, then its descendants.
    pub fn add_root(
        &mut self,
        workflow: &'a WorkflowData,
        node_id: &str,
        width: f64,
        height: f64,
        config: &LayoutConfig,
    ) -> Option<usize> {
        let (id, node) = workflow.nodes.get_key_value(node_id)?;
        let index = self.push(id, node, None, width, height)?;
        self.roots.push(index);
        self.add_children(workflow, index, config);
        Some(index)
    }

    fn push(
        &mut self,
        id: &'a str,
        node: &'a WorkflowNode,
        parent: Option<usize>,
        width: f64,
        height: f64,
    ) -> Option<usize> {
        if !self.placed.insert(id) {
            log::warn!("Node '{}' is reachable more than once, laying it out only once", id);
            return None;
        }
        self.nodes.push(LayoutNode {
            id,
            node,
            x: 0.0,
            y: 0.0,
            width,
            height,
            children: Vec::new(),
            parent,
            is_core_node: false,
        });
        Some(self.nodes.len() - 1)
    }

    fn add_children(&mut self, workflow: &'a WorkflowData, index: usize, config: &LayoutConfig) {
        let node = self.nodes[index].node;
        for child_id in &node.children {
            if !workflow.nodes.contains_key(child_id) {
                log::debug!("Skipping dangling child '{}' of '{}'", child_id, self.nodes[index].id);
                continue;
            }
            if self.reserved.contains(child_id.as_str()) {
                log::debug!("Child '{}' of '{}' is laid out as a root", child_id, self.nodes[index].id);
                continue;
            }
            if let Some(child) = self.add_subtree(workflow, child_id, Some(index), config) {
                self.nodes[index].children.push(child);
            }
        }
    }

    pub fn node(&self, index: usize) -> &LayoutNode<'a> {
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: usize) -> &mut LayoutNode<'a> {
        &mut self.nodes[index]
    }

    pub fn nodes(&self) -> &[LayoutNode<'a>] {
        &self.nodes
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn root(&self) -> Option<&LayoutNode<'a>> {
        self.roots.first().map(|&index| &self.nodes[index])
    }

    pub fn find(&self, id: &str) -> Option<&LayoutNode<'a>> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn parent_of(&self, index: usize) -> Option<&LayoutNode<'a>> {
        self.nodes[index].parent.map(|parent| &self.nodes[parent])
    }

    /// Width reserved for the subtree at `index`: a leaf takes its own width,
    /// an internal node the sum of its children's subtree widths plus spacing,
    /// floored at the node width.
    pub fn subtree_width(&self, index: usize, config: &LayoutConfig) -> f64 {
        let node = &self.nodes[index];
        if node.children.is_empty() {
            return node.width;
        }
        let children = self.children_width(index, config);
        children.max(node.width)
    }

    fn children_width(&self, index: usize, config: &LayoutConfig) -> f64 {
        let children = &self.nodes[index].children;
        let widths: f64 = children.iter().map(|&child| self.subtree_width(child, config)).sum();
        widths + children.len().saturating_sub(1) as f64 * config.h_spacing
    }

    /// Places the node at `index` at `y`, centred in the band
    /// `[start_x, start_x + available_width)`, and its children in adjacent
    /// bands one level below.
    pub fn position_nodes(
        &mut self,
        index: usize,
        y: f64,
        available_width: f64,
        start_x: f64,
        config: &LayoutConfig,
    ) {
        let width = self.nodes[index].width;
        let node = &mut self.nodes[index];
        node.y = y;
        node.x = start_x + (available_width - width) / 2.0;
        if node.children.is_empty() {
            return;
        }

        let total = self.children_width(index, config);
        let next_y = y + self.nodes[index].height + config.v_spacing;
        self.position_children(index, next_y, start_x + (available_width - total) / 2.0, config);
    }

    /// Lays the children of `index` out left to right from `start_x` at `y`.
    pub fn position_children(&mut self, index: usize, y: f64, start_x: f64, config: &LayoutConfig) {
        let children = self.nodes[index].children.clone();
        let mut child_x = start_x;
        for child in children {
            let band = self.subtree_width(child, config);
            self.position_nodes(child, y, band, child_x, config);
            child_x += band + config.h_spacing;
        }
    }

    /// Pre-order indices of the subtree at `index`.
    pub fn flatten(&self, index: usize) -> Vec<usize> {
        let mut order = Vec::new();
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.nodes[current].children.iter().rev());
        }
        order
    }

    /// Pre-order indices of every root's subtree, roots in insertion order.
    pub fn flatten_all(&self) -> Vec<usize> {
        self.roots.iter().flat_map(|&root| self.flatten(root)).collect()
    }

    pub fn subtree_bounds(&self, index: usize) -> TreeBounds {
        self.flatten(index)
            .into_iter()
            .map(|i| &self.nodes[i])
            .fold(TreeBounds::of(&self.nodes[index]), TreeBounds::include)
    }

    /// Bounds over every placed node, `None` for an empty tree.
    pub fn bounds(&self) -> Option<TreeBounds> {
        let (first, rest) = self.nodes.split_first()?;
        Some(rest.iter().fold(TreeBounds::of(first), TreeBounds::include))
    }

    /// True when `ancestor` lies on the parent chain of `index`.
    pub fn is_ancestor(&self, ancestor: usize, index: usize) -> bool {
        let mut current = self.nodes[index].parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes[parent].parent;
        }
        false
    }
}

/// Positioned nodes of one layout pass.
#[derive(Debug, Clone, Default)]
pub struct TreeLayout<'a> {
    pub tree: LayoutTree<'a>,
    /// Render order: pre-order per root.
    pub order: Vec<usize>,
    pub bounds: Option<TreeBounds>,
}

impl<'a> TreeLayout<'a> {
    pub fn from_tree(tree: LayoutTree<'a>) -> Self {
        let order = tree.flatten_all();
        let bounds = tree.bounds();
        Self { tree, order, bounds }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Nodes in render order.
    pub fn nodes(&self) -> impl Iterator<Item = &LayoutNode<'a>> + '_ {
        self.order.iter().map(|&index| self.tree.node(index))
    }

    pub fn find(&self, id: &str) -> Option<&LayoutNode<'a>> {
        self.tree.find(id)
    }
}

/// Lays out the tree under `workflow.root_id`.
///
/// Empty when the graph has no root or the root id is unknown.
pub fn calculate_tree_layout<'a>(workflow: &'a WorkflowData, config: &LayoutConfig) -> TreeLayout<'a> {
    let Some(root_id) = workflow.root_id.as_deref() else {
        return TreeLayout::default();
    };
    let Some(mut tree) = LayoutTree::build(workflow, root_id, config) else {
        log::debug!("Root '{}' is not in the node table", root_id);
        return TreeLayout::default();
    };
    let root = tree.roots()[0];
    let width = tree.subtree_width(root, config);
    tree.position_nodes(root, config.origin_y, width, config.origin_x, config);
    TreeLayout::from_tree(tree)
}
