use super::arena::{ArenaRecord, CallArena, RecordIndex};
use crate::render::{render_call, RenderedFragment};
use crate::settings::RenderSettings;
use crate::{Error, Result};
use recview_types::{CallRecordId, Recording, RecordingId};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Handle of a materialized tree node. Stable across [`CallTree::refresh`]
/// for every node whose call is still present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Expansion {
    Unexpanded,
    Expanded(Vec<NodeId>),
}

#[derive(Debug, Clone)]
struct ViewNode {
    record: RecordIndex,
    call_id: CallRecordId,
    expansion: Expansion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibleRow {
    pub node: NodeId,
    pub call_id: CallRecordId,
    pub depth: usize,
}

/// What a refresh kept, created and let go of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub retained: usize,
    pub added: usize,
    pub dropped: usize,
    pub selection_cleared: bool,
}

/// Lazily expanded view over a recording's call tree.
///
/// Nodes start unexpanded; `expand` materializes a node's children exactly
/// once and afterwards hands back the same child handles.
#[derive(Debug, Clone)]
pub struct CallTree {
    arena: CallArena,
    nodes: Vec<Option<ViewNode>>,
    by_call: HashMap<CallRecordId, NodeId>,
    root: NodeId,
    selected: Option<NodeId>,
}

impl CallTree {
    pub fn new(recording: Recording) -> Result<Self> {
        let arena = CallArena::from_recording(recording)?;
        let mut tree = Self {
            arena,
            nodes: Vec::new(),
            by_call: HashMap::new(),
            root: NodeId(0),
            selected: None,
        };
        tree.root = tree.push_node(tree.arena.root());
        Ok(tree)
    }

    pub fn recording_id(&self) -> RecordingId {
        self.arena.recording_id()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn arena(&self) -> &CallArena {
        &self.arena
    }

    pub fn record(&self, node: NodeId) -> Result<&ArenaRecord> {
        let view = self.node(node)?;
        Ok(&self.arena[view.record])
    }

    pub fn call_id(&self, node: NodeId) -> Result<CallRecordId> {
        Ok(self.node(node)?.call_id)
    }

    /// Materialized node for a call, if that call's node has been created.
    pub fn node_for(&self, call_id: CallRecordId) -> Option<NodeId> {
        self.by_call.get(&call_id).copied()
    }

    pub fn has_children(&self, node: NodeId) -> Result<bool> {
        Ok(self.record(node)?.has_children())
    }

    pub fn is_expanded(&self, node: NodeId) -> Result<bool> {
        Ok(matches!(self.node(node)?.expansion, Expansion::Expanded(_)))
    }

    /// Children of an expanded node, `None` while unexpanded.
    pub fn children(&self, node: NodeId) -> Result<Option<&[NodeId]>> {
        match &self.node(node)?.expansion {
            Expansion::Expanded(children) => Ok(Some(children.as_slice())),
            Expansion::Unexpanded => Ok(None),
        }
    }

    /// Expand a node, wrapping each child call in a new unexpanded node.
    /// Expanding again returns the already materialized children.
    pub fn expand(&mut self, node: NodeId) -> Result<&[NodeId]> {
        let (record, expanded) = {
            let view = self.node(node)?;
            (view.record, matches!(view.expansion, Expansion::Expanded(_)))
        };

        if !expanded {
            let child_records = self.arena[record].children().to_vec();
            let children: Vec<NodeId> = child_records
                .into_iter()
                .map(|child| self.push_node(child))
                .collect();
            tracing::debug!(%node, children = children.len(), "expanded call tree node");
            self.node_mut(node)?.expansion = Expansion::Expanded(children);
        }

        Ok(self.children(node)?.unwrap_or_default())
    }

    /// Expand every node down to `max_depth` levels below the root
    /// (`None` expands the whole tree). Returns the number of nodes expanded.
    pub fn expand_to_depth(&mut self, max_depth: Option<usize>) -> Result<usize> {
        let mut expanded = 0;
        let mut pending = vec![(self.root, 0usize)];
        while let Some((node, depth)) = pending.pop() {
            if max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            let children = self.expand(node)?.to_vec();
            expanded += 1;
            pending.extend(children.into_iter().map(|child| (child, depth + 1)));
        }
        Ok(expanded)
    }

    pub fn select(&mut self, node: Option<NodeId>) -> Result<()> {
        if let Some(node) = node {
            self.node(node)?;
        }
        self.selected = node;
        Ok(())
    }

    /// The selected node, or [`Error::NoSelection`] when nothing is selected.
    pub fn selected(&self) -> Result<NodeId> {
        self.selected.ok_or(Error::NoSelection)
    }

    pub fn selected_record(&self) -> Result<&ArenaRecord> {
        self.record(self.selected()?)
    }

    /// Rows currently on screen: the root plus the children of every expanded
    /// node, depth-first.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        let mut pending = vec![(self.root, 0usize)];
        while let Some((node, depth)) = pending.pop() {
            let Some(Some(view)) = self.nodes.get(node.0) else {
                continue;
            };
            rows.push(VisibleRow {
                node,
                call_id: view.call_id,
                depth,
            });
            if let Expansion::Expanded(children) = &view.expansion {
                pending.extend(children.iter().rev().map(|child| (*child, depth + 1)));
            }
        }
        rows
    }

    pub fn render_label(&self, node: NodeId, settings: &RenderSettings) -> Result<RenderedFragment> {
        render_call(self.record(node)?, settings)
    }

    /// Re-read a newer snapshot of the same recording.
    ///
    /// Nodes whose calls are still present keep their handle and expansion
    /// state; expanded nodes pick up newly recorded children as fresh
    /// unexpanded nodes. The selection survives when its call does.
    pub fn refresh(&mut self, recording: Recording) -> Result<RefreshSummary> {
        if recording.id != self.recording_id() {
            return Err(Error::RecordingMismatch {
                expected: self.recording_id(),
                actual: recording.id,
            });
        }

        let arena = CallArena::from_recording(recording)?;
        let new_root_call = arena[arena.root()].id;
        let old_root_call = self.node(self.root)?.call_id;
        let previous_len = self.nodes.len();
        self.arena = arena;
        self.by_call.clear();

        let mut summary = RefreshSummary::default();

        if new_root_call != old_root_call {
            summary.dropped = self.nodes.iter().flatten().count();
            summary.selection_cleared = self.selected.take().is_some();
            self.nodes.clear();
            self.root = self.push_node(self.arena.root());
            summary.added = 1;
            return Ok(summary);
        }

        let mut pending = vec![self.root];
        while let Some(node) = pending.pop() {
            let Some(call_id) = self.nodes.get(node.0).and_then(Option::as_ref).map(|v| v.call_id)
            else {
                continue;
            };
            let Some(record) = self.arena.find(call_id) else {
                continue;
            };
            self.by_call.insert(call_id, node);
            summary.retained += 1;

            let old_children = match self.nodes[node.0].as_mut() {
                Some(view) => {
                    view.record = record;
                    match &view.expansion {
                        Expansion::Expanded(children) => children.clone(),
                        Expansion::Unexpanded => continue,
                    }
                }
                None => continue,
            };

            let mut known: HashMap<CallRecordId, NodeId> = old_children
                .iter()
                .filter_map(|child| {
                    self.nodes
                        .get(child.0)
                        .and_then(Option::as_ref)
                        .map(|view| (view.call_id, *child))
                })
                .collect();

            let child_records = self.arena[record].children().to_vec();
            let mut children = Vec::with_capacity(child_records.len());
            for child_record in child_records {
                let child_call = self.arena[child_record].id;
                match known.remove(&child_call) {
                    Some(existing) => {
                        pending.push(existing);
                        children.push(existing);
                    }
                    None => {
                        children.push(self.push_node(child_record));
                        summary.added += 1;
                    }
                }
            }

            if let Some(view) = self.nodes[node.0].as_mut() {
                view.expansion = Expansion::Expanded(children);
            }
        }

        for index in 0..previous_len {
            let orphaned = match &self.nodes[index] {
                Some(view) => self.by_call.get(&view.call_id) != Some(&NodeId(index)),
                None => false,
            };
            if orphaned {
                self.nodes[index] = None;
                summary.dropped += 1;
            }
        }

        if let Some(selected) = self.selected
            && self.node(selected).is_err()
        {
            self.selected = None;
            summary.selection_cleared = true;
        }

        tracing::info!(
            recording = %self.recording_id(),
            retained = summary.retained,
            added = summary.added,
            dropped = summary.dropped,
            "refreshed call tree"
        );
        Ok(summary)
    }

    fn push_node(&mut self, record: RecordIndex) -> NodeId {
        let node = NodeId(self.nodes.len());
        let call_id = self.arena[record].id;
        self.nodes.push(Some(ViewNode {
            record,
            call_id,
            expansion: Expansion::Unexpanded,
        }));
        self.by_call.insert(call_id, node);
        node
    }

    fn node(&self, node: NodeId) -> Result<&ViewNode> {
        self.nodes
            .get(node.0)
            .and_then(Option::as_ref)
            .ok_or(Error::UnknownNode(node))
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut ViewNode> {
        self.nodes
            .get_mut(node.0)
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownNode(node))
    }
}
