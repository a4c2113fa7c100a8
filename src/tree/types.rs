use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// The five node types of a decision graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeType {
    Phenomenon,
    Selector,
    Sequence,
    Condition,
    Action,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Phenomenon => "Phenomenon",
            NodeType::Selector => "Selector",
            NodeType::Sequence => "Sequence",
            NodeType::Condition => "Condition",
            NodeType::Action => "Action",
        }
    }

    /// Korean label shown for unnamed nodes.
    pub fn display_name(self) -> &'static str {
        match self {
            NodeType::Phenomenon => "발생 현상",
            NodeType::Selector => "원인 도출",
            NodeType::Sequence => "원인 후보 분석",
            NodeType::Condition => "분기",
            NodeType::Action => "액션",
        }
    }

    /// Accent colour as a hex string.
    pub fn color(self) -> &'static str {
        match self {
            NodeType::Phenomenon => "#ef4444",
            NodeType::Selector => "#a855f7",
            NodeType::Sequence => "#3b82f6",
            NodeType::Condition => "#eab308",
            NodeType::Action => "#22c55e",
        }
    }

    /// Only container types may own children in the editor.
    pub fn can_have_children(self) -> bool {
        matches!(self, NodeType::Phenomenon | NodeType::Selector | NodeType::Sequence)
    }
}

/// A slide region attached to a phenomenon node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlideCapture {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub slide_index: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Type-specific payload of a [`WorkflowNode`], tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    Phenomenon {
        #[serde(default)]
        captures: Vec<SlideCapture>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Selector,
    Sequence,
    Condition {
        #[serde(rename = "conditionId", default, skip_serializing_if = "Option::is_none")]
        condition_id: Option<String>,
        #[serde(default)]
        params: AHashMap<String, String>,
    },
    Action {
        #[serde(rename = "actionId", default, skip_serializing_if = "Option::is_none")]
        action_id: Option<String>,
        #[serde(default)]
        params: AHashMap<String, String>,
    },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Phenomenon { .. } => NodeType::Phenomenon,
            NodeKind::Selector => NodeType::Selector,
            NodeKind::Sequence => NodeType::Sequence,
            NodeKind::Condition { .. } => NodeType::Condition,
            NodeKind::Action { .. } => NodeType::Action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl WorkflowNode {
    pub fn new(id: &str, kind: NodeKind) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            children: Vec::new(),
            kind,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowMeta {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub core_nodes: Vec<String>,
}

/// A decision graph: a node table plus the id of its root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowData {
    #[serde(default)]
    pub nodes: AHashMap<String, WorkflowNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<WorkflowMeta>,
}

impl WorkflowData {
    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.get(id)
    }

    /// Inserts `node` under its own id.
    pub fn insert(&mut self, node: WorkflowNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// The declared core node ids, when there are any.
    pub fn core_nodes(&self) -> Option<&[String]> {
        self.meta
            .as_ref()
            .map(|meta| meta.core_nodes.as_slice())
            .filter(|ids| !ids.is_empty())
    }
}

/// A parameter of an action or condition catalogue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowActionParam {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub required: bool,
    /// `"selection"` or `"description"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_values: Option<Vec<String>>,
}

/// Catalogue entry referenced by `Action` nodes through `actionId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowAction {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub params: Vec<WorkflowActionParam>,
}
