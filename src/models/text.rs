// src/models/text.rs

use serde::{Deserialize, Serialize};

use crate::models::properties::Typography;

/// Index of a run inside a [`TextRuns`] arena.
pub type RunId = usize;

/// A single styled span of text. A run either carries its own `text`, marks a line
/// break, or groups child runs that inherit its typography and hyperlink.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default)]
    pub typography: Typography,

    /// Hyperlink target, inherited by every descendant run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub line_break: bool,

    /// Child runs in document order. Every id is smaller than this run's own id.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RunId>,
}

/// A run after inheritance has been resolved: typography and link are fully merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRun {
    pub text: String,
    pub typography: Typography,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub line_break: bool,
}

/// An owned tree of text runs stored as an arena.
///
/// Runs are built bottom-up from a DOM subtree: children are pushed before the
/// parent that references them, so a parent can only point at smaller ids and the
/// tree is acyclic by construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRuns {
    nodes: Vec<TextRun>,
    roots: Vec<RunId>,
}

impl TextRuns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a leaf run holding `text` and returns its id. The run is not yet a root.
    pub fn push_text(
        &mut self,
        text: impl Into<String>,
        typography: Typography,
        href: Option<String>,
    ) -> RunId {
        self.nodes.push(TextRun {
            text: Some(text.into()),
            typography,
            href,
            ..Default::default()
        });
        self.nodes.len() - 1
    }

    /// Adds a line-break run and returns its id.
    pub fn push_line_break(&mut self) -> RunId {
        self.nodes.push(TextRun {
            line_break: true,
            ..Default::default()
        });
        self.nodes.len() - 1
    }

    /// Adds a grouping run over already-pushed `children`.
    /// Ids that do not refer to an existing run are dropped.
    pub fn push_group(
        &mut self,
        typography: Typography,
        href: Option<String>,
        children: Vec<RunId>,
    ) -> RunId {
        let next = self.nodes.len();
        let children = children.into_iter().filter(|id| *id < next).collect();
        self.nodes.push(TextRun {
            text: None,
            typography,
            href,
            line_break: false,
            children,
        });
        next
    }

    /// Marks an existing run as a top-level run.
    pub fn add_root(&mut self, id: RunId) {
        if id < self.nodes.len() {
            self.roots.push(id);
        }
    }

    pub fn get(&self, id: RunId) -> Option<&TextRun> {
        self.nodes.get(id)
    }

    /// Typography of every run in the arena, for in-place rewrites.
    pub fn typographies_mut(&mut self) -> impl Iterator<Item = &mut Typography> {
        self.nodes.iter_mut().map(|run| &mut run.typography)
    }

    pub fn roots(&self) -> &[RunId] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Flattens the tree into leaf runs in document order.
    /// Each leaf's typography is merged over its ancestors', the leaf winning on conflicts.
    pub fn flatten(&self) -> Vec<FlatRun> {
        let mut out = Vec::new();
        let base = Typography::default();
        for root in &self.roots {
            self.flatten_into(*root, &base, None, &mut out);
        }
        out
    }

    fn flatten_into(
        &self,
        id: RunId,
        inherited: &Typography,
        inherited_href: Option<&str>,
        out: &mut Vec<FlatRun>,
    ) {
        let Some(run) = self.nodes.get(id) else {
            return;
        };
        let typography = run.typography.merged_over(inherited);
        let href = run.href.as_deref().or(inherited_href);

        if run.line_break {
            out.push(FlatRun {
                text: String::new(),
                typography: typography.clone(),
                href: href.map(str::to_string),
                line_break: true,
            });
        }
        if let Some(text) = &run.text {
            out.push(FlatRun {
                text: text.clone(),
                typography: typography.clone(),
                href: href.map(str::to_string),
                line_break: false,
            });
        }
        for child in &run.children {
            // Children always precede their parent in the arena.
            if *child < id {
                self.flatten_into(*child, &typography, href, out);
            }
        }
    }

    /// Concatenated text of all runs, with line breaks rendered as `\n`.
    pub fn plain_text(&self) -> String {
        self.flatten()
            .iter()
            .map(|r| if r.line_break { "\n" } else { r.text.as_str() })
            .collect()
    }
}
