use crate::presentation::formatters::fragment::paint;
use recview_engine::{CallTree, RenderSettings, RenderedFragment, VisibleRow};
use serde::ser::{Error as _, SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};
use std::io::Write;

/// Visible rows of a call tree. Labels are rendered one row at a time while
/// the model is written, so output size does not multiply memory use.
pub struct TreeViewModel<'a> {
    pub recording: String,
    pub call_count: usize,
    tree: &'a CallTree,
    settings: RenderSettings,
    visible: Vec<VisibleRow>,
}

pub struct CallRowViewModel {
    pub call_id: u64,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub label: RenderedFragment,
}

impl<'a> TreeViewModel<'a> {
    pub fn new(tree: &'a CallTree, settings: &RenderSettings) -> Self {
        Self {
            recording: tree.recording_id().to_string(),
            call_count: tree.arena().len(),
            tree,
            settings: settings.clone(),
            visible: tree.visible_rows(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.visible.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = recview_engine::Result<CallRowViewModel>> + '_ {
        self.visible.iter().map(|row| {
            Ok(CallRowViewModel {
                call_id: row.call_id.0,
                depth: row.depth,
                has_children: self.tree.has_children(row.node)?,
                expanded: self.tree.is_expanded(row.node)?,
                label: self.tree.render_label(row.node, &self.settings)?,
            })
        })
    }

    /// Header line then one line per row. `color` paints labels with ANSI styles.
    pub fn write_plain(&self, out: &mut impl Write, color: bool) -> anyhow::Result<()> {
        writeln!(out, "{} ({} calls)", self.recording, self.call_count)?;
        for row in self.rows() {
            row?.write_plain(out, color)?;
        }
        Ok(())
    }
}

impl CallRowViewModel {
    fn marker(&self) -> &'static str {
        match (self.has_children, self.expanded) {
            (false, _) => "  ",
            (true, true) => "▾ ",
            (true, false) => "▸ ",
        }
    }

    pub fn write_plain(&self, out: &mut impl Write, color: bool) -> std::io::Result<()> {
        let text = if color {
            paint(&self.label)
        } else {
            self.label.plain_text()
        };
        writeln!(
            out,
            "{}{}{}  #{}",
            "  ".repeat(self.depth),
            self.marker(),
            text,
            self.call_id
        )
    }
}

impl Serialize for CallRowViewModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("CallRowViewModel", 6)?;
        row.serialize_field("call_id", &self.call_id)?;
        row.serialize_field("depth", &self.depth)?;
        row.serialize_field("has_children", &self.has_children)?;
        row.serialize_field("expanded", &self.expanded)?;
        row.serialize_field("text", &self.label.plain_text())?;
        row.serialize_field("label", &self.label)?;
        row.end()
    }
}

struct Rows<'m, 'a>(&'m TreeViewModel<'a>);

impl Serialize for Rows<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.row_count()))?;
        for row in self.0.rows() {
            seq.serialize_element(&row.map_err(S::Error::custom)?)?;
        }
        seq.end()
    }
}

impl Serialize for TreeViewModel<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut model = serializer.serialize_struct("TreeViewModel", 3)?;
        model.serialize_field("recording", &self.recording)?;
        model.serialize_field("call_count", &self.call_count)?;
        model.serialize_field("rows", &Rows(self))?;
        model.end()
    }
}
