// File: crates/chartkit-core/src/surface.rs
// Summary: Retained drawing surface: a tree of styled shape nodes that charts append to,
// update in place and remove, and that the SVG/Skia writers walk.

use crate::geometry::{Rect, Transform};
use crate::join::Key;
use crate::theme::Color;
use crate::transition::Tween;
use crate::types::TextAnchor;

/// Handle to a node. Once the node is removed the id may be handed out again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(&self) -> usize { self.0 as usize }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Group,
    Rect(Rect),
    Circle { cx: f64, cy: f64, r: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// SVG path data.
    Path(String),
    /// `dy` is in em units, relative to the font size.
    Text { x: f64, y: f64, dy: f64, content: String },
}

/// Presentation attributes; `None` inherits from the parent (or the theme at the root).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
    pub font_size: Option<f64>,
    pub anchor: Option<TextAnchor>,
}

/// Everything needed to create a node; built fluently and handed to `Surface::append`.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub shape: Shape,
    pub style: Style,
    pub classes: Vec<String>,
    pub transform: Transform,
}

impl Element {
    pub fn new(shape: Shape) -> Self {
        Self { shape, style: Style::default(), classes: Vec::new(), transform: Transform::default() }
    }
    pub fn group() -> Self { Self::new(Shape::Group) }
    pub fn rect(rect: Rect) -> Self { Self::new(Shape::Rect(rect)) }
    pub fn circle(cx: f64, cy: f64, r: f64) -> Self { Self::new(Shape::Circle { cx, cy, r }) }
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self { Self::new(Shape::Line { x1, y1, x2, y2 }) }
    pub fn path(d: impl Into<String>) -> Self { Self::new(Shape::Path(d.into())) }
    pub fn text(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self::new(Shape::Text { x, y, dy: 0.0, content: content.into() })
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.extend(class.split_whitespace().map(str::to_string));
        self
    }
    pub fn fill(mut self, color: Color) -> Self { self.style.fill = Some(color); self }
    pub fn stroke(mut self, color: Color, width: f64) -> Self {
        self.style.stroke = Some(color);
        self.style.stroke_width = Some(width);
        self
    }
    pub fn opacity(mut self, opacity: f64) -> Self { self.style.opacity = Some(opacity); self }
    pub fn font_size(mut self, size: f64) -> Self { self.style.font_size = Some(size); self }
    pub fn anchor(mut self, anchor: TextAnchor) -> Self { self.style.anchor = Some(anchor); self }
    pub fn transform(mut self, transform: Transform) -> Self { self.transform = transform; self }
    pub fn translate(mut self, x: f64, y: f64) -> Self {
        self.transform.translate = (x, y);
        self
    }
    pub fn rotate(mut self, degrees: f64) -> Self { self.transform.rotate = degrees; self }
    /// Text only: vertical offset in em.
    pub fn dy(mut self, em: f64) -> Self {
        if let Shape::Text { dy, .. } = &mut self.shape { *dy = em; }
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub shape: Shape,
    pub style: Style,
    pub classes: Vec<String>,
    pub transform: Transform,
    /// Record this node was drawn from, when it takes part in a data join.
    pub key: Option<Key>,
    /// Pending geometry animation; the shape already holds the final state.
    pub tween: Option<Tween>,
}

impl Node {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Fixed-size drawing surface owning a tree of nodes rooted at `root()`.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    width: f64,
    height: f64,
    nodes: Vec<Option<Node>>,
    /// Slots of removed nodes, reused by `append`.
    free: Vec<NodeId>,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        let root = Node {
            id: NodeId(0),
            parent: None,
            children: Vec::new(),
            shape: Shape::Group,
            style: Style::default(),
            classes: Vec::new(),
            transform: Transform::default(),
            key: None,
            tween: None,
        };
        Self { width, height, nodes: vec![Some(root)], free: Vec::new() }
    }

    pub fn width(&self) -> f64 { self.width }
    pub fn height(&self) -> f64 { self.height }

    pub fn root(&self) -> NodeId { NodeId(0) }

    /// Number of node slots ever allocated; live nodes plus free slots.
    pub fn capacity(&self) -> usize { self.nodes.len() }

    /// Number of live nodes, the root included.
    pub fn len(&self) -> usize { self.nodes.iter().flatten().count() }

    pub fn is_empty(&self) -> bool { self.len() <= 1 }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Append `element` as the last child of `parent`. Returns `None` if `parent` is gone.
    /// Ids of removed nodes are handed out again, so storage tracks the live node count.
    pub fn append(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        self.node(parent)?;
        let id = match self.free.pop() {
            Some(id) => id,
            None => NodeId(u32::try_from(self.nodes.len()).ok()?),
        };
        let node = Some(Node {
            id,
            parent: Some(parent),
            children: Vec::new(),
            shape: element.shape,
            style: element.style,
            classes: element.classes,
            transform: element.transform,
            key: None,
            tween: None,
        });
        match self.nodes.get_mut(id.index()) {
            Some(slot) => *slot = node,
            None => self.nodes.push(node),
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        Some(id)
    }

    /// Remove a node and its subtree. Removing the root is a no-op.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root() {
            return;
        }
        let Some(node) = self.nodes.get_mut(id.index()).and_then(Option::take) else {
            return;
        };
        self.free.push(id);
        if let Some(parent) = node.parent.and_then(|p| self.node_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
        for child in node.children {
            self.remove(child);
        }
    }

    /// Remove every direct child of `parent` matching `pred`.
    pub fn remove_children_where(&mut self, parent: NodeId, pred: impl Fn(&Node) -> bool) {
        let doomed: Vec<NodeId> = self
            .children(parent)
            .iter()
            .copied()
            .filter(|c| self.node(*c).map(&pred).unwrap_or(false))
            .collect();
        for id in doomed {
            self.remove(id);
        }
    }

    pub fn clear_children(&mut self, parent: NodeId) {
        self.remove_children_where(parent, |_| true);
    }

    /// Descendants of `scope` carrying `class`, in document order.
    pub fn select_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.visit(scope, &mut |node| {
            if node.id != scope && node.has_class(class) {
                out.push(node.id);
            }
        });
        out
    }

    /// Depth-first, pre-order walk of `scope` and its descendants.
    pub fn visit<'a>(&'a self, scope: NodeId, f: &mut dyn FnMut(&'a Node)) {
        if let Some(node) = self.node(scope) {
            f(node);
            for child in &node.children {
                self.visit(*child, f);
            }
        }
    }

    /// Latest time, in ms, at which any pending tween settles.
    pub fn transition_end_ms(&self) -> f64 {
        self.nodes
            .iter()
            .flatten()
            .filter_map(|n| n.tween.map(|t| t.transition.end_ms()))
            .fold(0.0, f64::max)
    }

    /// Copy of the surface as it looks `elapsed_ms` into its pending transitions.
    pub fn frame_at(&self, elapsed_ms: f64) -> Surface {
        let mut frame = self.clone();
        for node in frame.nodes.iter_mut().flatten() {
            if let (Some(tween), Shape::Rect(rect)) = (node.tween.take(), &mut node.shape) {
                *rect = tween.sample(elapsed_ms);
            }
        }
        frame
    }

    /// Drop pending tweens, leaving every node at its final geometry.
    pub fn settle(&mut self) {
        for node in self.nodes.iter_mut().flatten() {
            node.tween = None;
        }
    }
}
