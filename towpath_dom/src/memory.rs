// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Dom`] for tests and headless hosts.
//!
//! `MemoryDom` keeps a generational slot arena of elements with *authored*
//! geometry: absolute positions, sizes, margins, borders, and padding are
//! whatever the builder set, never recomputed by layout. That makes drag
//! scenarios deterministic — a test states the page geometry it wants and
//! the drag core is exercised against exactly that.
//!
//! The selector subset understood by [`MemoryDom::query`] is `#id`,
//! `.class`, `tag`, and `tag.class`. Anything richer belongs to a real host.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::dom::{Dom, ElementId};
use crate::geometry::{CssPosition, Edges, Offset, Size};

#[derive(Clone, Debug, Default)]
struct Node {
    tag: String,
    id_attr: Option<String>,
    classes: Vec<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    css_position: CssPosition,
    left_style: Option<f64>,
    top_style: Option<f64>,
    origin: Offset,
    margins: Offset,
    size: Size,
    scroll_size: Size,
    scroll: Offset,
    border: Edges,
    padding: Edges,
    clips_overflow: bool,
    scroll_container: bool,
    opacity: Option<f64>,
    z_index: Option<i32>,
    cursor: Option<String>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// In-memory element tree with authored geometry.
///
/// Created with a viewport size; [`MemoryDom::root`] models the document
/// element (and holds the document scroll position), [`MemoryDom::body`]
/// is its only initial child. Elements are added through [`MemoryDom::build`].
#[derive(Debug)]
pub struct MemoryDom {
    slots: Vec<Slot>,
    free: Vec<u32>,
    viewport: Size,
    root: ElementId,
    body: ElementId,
}

impl MemoryDom {
    /// Creates an empty document with the given viewport size.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        let mut dom = Self {
            slots: Vec::new(),
            free: Vec::new(),
            viewport,
            root: ElementId::new(0, 0),
            body: ElementId::new(0, 0),
        };
        let root = dom.insert(Node {
            tag: "html".to_string(),
            scroll_container: true,
            scroll_size: viewport,
            size: viewport,
            ..Node::default()
        });
        let body = dom.insert(Node {
            tag: "body".to_string(),
            parent: Some(root),
            size: viewport,
            ..Node::default()
        });
        dom.node_mut(root).expect("root is live").children.push(body);
        dom.root = root;
        dom.body = body;
        dom
    }

    /// Starts building a new element with the given tag name.
    ///
    /// The element is finalized by [`ElementBuilder::child_of`] or
    /// [`ElementBuilder::detached`].
    pub fn build(&mut self, tag: &str) -> ElementBuilder<'_> {
        ElementBuilder {
            dom: self,
            node: Node {
                tag: tag.to_string(),
                ..Node::default()
            },
        }
    }

    /// Re-authors the absolute page position of an element.
    pub fn set_origin(&mut self, id: ElementId, origin: Offset) {
        if let Some(node) = self.node_mut(id) {
            node.origin = origin;
        }
    }

    /// Re-authors the border-box size of an element.
    pub fn set_outer_size(&mut self, id: ElementId, size: Size) {
        if let Some(node) = self.node_mut(id) {
            node.size = size;
        }
    }

    fn insert(&mut self, node: Node) -> ElementId {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.node = Some(node);
            ElementId::new(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).expect("slot count fits in u32");
            self.slots.push(Slot {
                generation: 1,
                node: Some(node),
            });
            ElementId::new(idx, 1)
        }
    }

    fn node(&self, id: ElementId) -> Option<&Node> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_mut()
    }

    fn detach(&mut self, id: ElementId) {
        let parent = self.node(id).and_then(|n| n.parent);
        if let Some(parent) = parent
            && let Some(p) = self.node_mut(parent)
        {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
    }

    fn free_subtree(&mut self, id: ElementId) {
        let children = match self.node(id) {
            Some(n) => n.children.clone(),
            None => return,
        };
        for child in children {
            self.free_subtree(child);
        }
        let slot = &mut self.slots[id.index() as usize];
        slot.node = None;
        self.free.push(id.index());
    }

    fn clone_subtree(&mut self, id: ElementId) -> Option<ElementId> {
        let mut node = self.node(id)?.clone();
        let children = core::mem::take(&mut node.children);
        node.parent = None;
        let clone = self.insert(node);
        for child in children {
            if let Some(child_clone) = self.clone_subtree(child) {
                if let Some(c) = self.node_mut(child_clone) {
                    c.parent = Some(clone);
                }
                self.node_mut(clone)
                    .expect("freshly inserted clone is live")
                    .children
                    .push(child_clone);
            }
        }
        Some(clone)
    }

    fn matches(&self, id: ElementId, selector: &str) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        if let Some(id_attr) = selector.strip_prefix('#') {
            return node.id_attr.as_deref() == Some(id_attr);
        }
        if let Some(class) = selector.strip_prefix('.') {
            return node.classes.iter().any(|c| c == class);
        }
        match selector.split_once('.') {
            Some((tag, class)) => {
                node.tag == tag && node.classes.iter().any(|c| c == class)
            }
            None => node.tag == selector,
        }
    }

    fn collect_matches(&self, id: ElementId, selector: &str, out: &mut Vec<ElementId>) {
        let Some(node) = self.node(id) else { return };
        if self.matches(id, selector) {
            out.push(id);
        }
        for child in &node.children {
            self.collect_matches(*child, selector, out);
        }
    }
}

impl Dom for MemoryDom {
    fn root(&self) -> ElementId {
        self.root
    }

    fn body(&self) -> ElementId {
        self.body
    }

    fn is_root(&self, id: ElementId) -> bool {
        id == self.root || id == self.body
    }

    fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node(id).and_then(|n| n.parent)
    }

    fn append_to(&mut self, id: ElementId, parent: ElementId) {
        if self.node(id).is_none() || self.node(parent).is_none() {
            return;
        }
        self.detach(id);
        if let Some(n) = self.node_mut(id) {
            n.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
    }

    fn clone_element(&mut self, id: ElementId) -> ElementId {
        self.clone_subtree(id)
            .unwrap_or_else(|| self.insert(Node::default()))
    }

    fn remove(&mut self, id: ElementId) {
        if self.node(id).is_none() {
            return;
        }
        self.detach(id);
        self.free_subtree(id);
    }

    fn is_attached(&self, id: ElementId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.node(current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn contains(&self, ancestor: ElementId, descendant: ElementId) -> bool {
        let mut current = Some(descendant);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    fn query(&self, selector: &str) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.collect_matches(self.root, selector, &mut out);
        out
    }

    fn query_within(&self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        let mut out = Vec::new();
        let Some(node) = self.node(scope) else {
            return out;
        };
        for child in &node.children {
            self.collect_matches(*child, selector, &mut out);
        }
        out
    }

    fn absolute_position(&self, id: ElementId) -> Offset {
        self.node(id).map(|n| n.origin).unwrap_or_default()
    }

    fn offset_in_parent(&self, id: ElementId) -> Offset {
        let origin = self.absolute_position(id);
        let reference = self.absolute_position(self.offset_parent(id));
        origin - reference
    }

    fn margins(&self, id: ElementId) -> Offset {
        self.node(id).map(|n| n.margins).unwrap_or_default()
    }

    fn outer_size(&self, id: ElementId) -> Size {
        self.node(id).map(|n| n.size).unwrap_or_default()
    }

    fn scroll_size(&self, id: ElementId) -> Size {
        self.node(id).map(|n| n.scroll_size).unwrap_or_default()
    }

    fn border(&self, id: ElementId) -> Edges {
        self.node(id).map(|n| n.border).unwrap_or_default()
    }

    fn padding(&self, id: ElementId) -> Edges {
        self.node(id).map(|n| n.padding).unwrap_or_default()
    }

    fn clips_overflow(&self, id: ElementId) -> bool {
        self.node(id).is_some_and(|n| n.clips_overflow)
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn scroll_parent(&self, id: ElementId) -> ElementId {
        let mut current = self.node(id).and_then(|n| n.parent);
        while let Some(ancestor) = current {
            if self.node(ancestor).is_some_and(|n| n.scroll_container) {
                return ancestor;
            }
            current = self.node(ancestor).and_then(|n| n.parent);
        }
        self.root
    }

    fn offset_parent(&self, id: ElementId) -> ElementId {
        let mut current = self.node(id).and_then(|n| n.parent);
        while let Some(ancestor) = current {
            if ancestor == self.body {
                break;
            }
            if self
                .node(ancestor)
                .is_some_and(|n| n.css_position.is_positioned())
            {
                return ancestor;
            }
            current = self.node(ancestor).and_then(|n| n.parent);
        }
        self.body
    }

    fn scroll_offset(&self, id: ElementId) -> Offset {
        self.node(id).map(|n| n.scroll).unwrap_or_default()
    }

    fn set_scroll_offset(&mut self, id: ElementId, offset: Offset) {
        if let Some(n) = self.node_mut(id) {
            n.scroll = offset;
        }
    }

    fn css_position(&self, id: ElementId) -> CssPosition {
        self.node(id).map(|n| n.css_position).unwrap_or_default()
    }

    fn set_css_position(&mut self, id: ElementId, position: CssPosition) {
        if let Some(n) = self.node_mut(id) {
            n.css_position = position;
        }
    }

    fn position_style(&self, id: ElementId) -> Offset {
        self.node(id)
            .map(|n| Offset::new(n.left_style.unwrap_or(0.0), n.top_style.unwrap_or(0.0)))
            .unwrap_or_default()
    }

    fn set_left(&mut self, id: ElementId, left: f64) {
        if let Some(n) = self.node_mut(id) {
            n.left_style = Some(left);
        }
    }

    fn set_top(&mut self, id: ElementId, top: f64) {
        if let Some(n) = self.node_mut(id) {
            n.top_style = Some(top);
        }
    }

    fn opacity(&self, id: ElementId) -> Option<f64> {
        self.node(id).and_then(|n| n.opacity)
    }

    fn set_opacity(&mut self, id: ElementId, opacity: Option<f64>) {
        if let Some(n) = self.node_mut(id) {
            n.opacity = opacity;
        }
    }

    fn z_index(&self, id: ElementId) -> Option<i32> {
        self.node(id).and_then(|n| n.z_index)
    }

    fn set_z_index(&mut self, id: ElementId, z_index: Option<i32>) {
        if let Some(n) = self.node_mut(id) {
            n.z_index = z_index;
        }
    }

    fn cursor(&self, id: ElementId) -> Option<String> {
        self.node(id).and_then(|n| n.cursor.clone())
    }

    fn set_cursor(&mut self, id: ElementId, cursor: Option<&str>) {
        if let Some(n) = self.node_mut(id) {
            n.cursor = cursor.map(ToString::to_string);
        }
    }

    fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(n) = self.node_mut(id)
            && !n.classes.iter().any(|c| c == class)
        {
            n.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(n) = self.node_mut(id) {
            n.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.node(id)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }
}

/// Builder for a [`MemoryDom`] element.
///
/// Obtained from [`MemoryDom::build`]; finalize with
/// [`ElementBuilder::child_of`] or [`ElementBuilder::detached`].
#[derive(Debug)]
pub struct ElementBuilder<'a> {
    dom: &'a mut MemoryDom,
    node: Node,
}

impl ElementBuilder<'_> {
    /// Sets the element's id attribute.
    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.node.id_attr = Some(id.to_string());
        self
    }

    /// Adds a CSS class.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.node.classes.push(class.to_string());
        self
    }

    /// Sets the positioning scheme.
    #[must_use]
    pub fn position(mut self, position: CssPosition) -> Self {
        self.node.css_position = position;
        self
    }

    /// Authors the absolute page position of the border box.
    #[must_use]
    pub fn at(mut self, origin: Offset) -> Self {
        self.node.origin = origin;
        self
    }

    /// Sets the border-box size. The scrollable extent defaults to match.
    #[must_use]
    pub fn size(mut self, size: Size) -> Self {
        self.node.size = size;
        if self.node.scroll_size == Size::ZERO {
            self.node.scroll_size = size;
        }
        self
    }

    /// Sets the scrollable content extent.
    #[must_use]
    pub fn scroll_size(mut self, size: Size) -> Self {
        self.node.scroll_size = size;
        self
    }

    /// Sets the left/top margins.
    #[must_use]
    pub fn margins(mut self, margins: Offset) -> Self {
        self.node.margins = margins;
        self
    }

    /// Sets border widths.
    #[must_use]
    pub fn border(mut self, border: Edges) -> Self {
        self.node.border = border;
        self
    }

    /// Sets padding widths.
    #[must_use]
    pub fn padding(mut self, padding: Edges) -> Self {
        self.node.padding = padding;
        self
    }

    /// Seeds the `left`/`top` style offsets.
    #[must_use]
    pub fn styled_at(mut self, left: f64, top: f64) -> Self {
        self.node.left_style = Some(left);
        self.node.top_style = Some(top);
        self
    }

    /// Marks the element as a scroll container (a scroll parent candidate).
    #[must_use]
    pub fn scroll_container(mut self) -> Self {
        self.node.scroll_container = true;
        self
    }

    /// Marks the element as clipping overflow (`overflow: hidden`).
    #[must_use]
    pub fn clips_overflow(mut self) -> Self {
        self.node.clips_overflow = true;
        self
    }

    /// Sets an explicit z-index.
    #[must_use]
    pub fn z_index(mut self, z: i32) -> Self {
        self.node.z_index = Some(z);
        self
    }

    /// Finalizes the element as the last child of `parent`.
    pub fn child_of(mut self, parent: ElementId) -> ElementId {
        self.node.parent = Some(parent);
        let node = core::mem::take(&mut self.node);
        let id = self.dom.insert(node);
        if let Some(p) = self.dom.node_mut(parent) {
            p.children.push(id);
        }
        id
    }

    /// Finalizes the element without attaching it to the tree.
    pub fn detached(mut self) -> ElementId {
        self.node.parent = None;
        let node = core::mem::take(&mut self.node);
        self.dom.insert(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn small_dom() -> (MemoryDom, ElementId) {
        let mut dom = MemoryDom::new(Size::new(800.0, 600.0));
        let body = dom.body();
        let el = dom
            .build("div")
            .id("a")
            .class("card")
            .at(Offset::new(10.0, 20.0))
            .size(Size::new(50.0, 40.0))
            .child_of(body);
        (dom, el)
    }

    #[test]
    fn query_by_id_class_and_tag() {
        let (dom, el) = small_dom();
        assert_eq!(dom.query("#a"), vec![el]);
        assert_eq!(dom.query(".card"), vec![el]);
        assert_eq!(dom.query("div"), vec![el]);
        assert_eq!(dom.query("div.card"), vec![el]);
        assert!(dom.query(".missing").is_empty());
    }

    #[test]
    fn query_within_excludes_scope() {
        let (mut dom, el) = small_dom();
        let inner = dom.build("span").class("grip").child_of(el);
        assert_eq!(dom.query_within(el, ".grip"), vec![inner]);
        assert!(dom.query_within(el, ".card").is_empty());
    }

    #[test]
    fn removed_elements_are_stale() {
        let (mut dom, el) = small_dom();
        dom.remove(el);
        assert!(!dom.is_attached(el));
        assert_eq!(dom.outer_size(el), Size::ZERO);
        assert!(dom.query("#a").is_empty());
        // Mutations on stale handles are no-ops.
        dom.set_left(el, 10.0);
        assert_eq!(dom.position_style(el), Offset::ZERO);
    }

    #[test]
    fn slot_reuse_bumps_generation() {
        let (mut dom, el) = small_dom();
        dom.remove(el);
        let body = dom.body();
        let replacement = dom.build("div").child_of(body);
        assert_eq!(replacement.index(), el.index());
        assert_ne!(replacement.generation(), el.generation());
        assert!(dom.is_attached(replacement));
        assert!(!dom.is_attached(el));
    }

    #[test]
    fn clone_is_detached_and_deep() {
        let (mut dom, el) = small_dom();
        let inner = dom.build("span").class("grip").child_of(el);
        let clone = dom.clone_element(el);
        assert!(!dom.is_attached(clone));
        assert_eq!(dom.outer_size(clone), dom.outer_size(el));
        // The clone's subtree is a copy, not a reparenting of the original.
        assert!(dom.contains(el, inner));
        let cloned_children = dom.query_within(clone, ".grip");
        assert_eq!(cloned_children.len(), 1);
        assert_ne!(cloned_children[0], inner);
        // Attached clones become queryable.
        let body = dom.body();
        dom.append_to(clone, body);
        assert_eq!(dom.query(".card").len(), 2);
    }

    #[test]
    fn scroll_parent_falls_back_to_root() {
        let (mut dom, el) = small_dom();
        assert_eq!(dom.scroll_parent(el), dom.root());

        let body = dom.body();
        let pane = dom
            .build("div")
            .scroll_container()
            .size(Size::new(200.0, 200.0))
            .child_of(body);
        let item = dom.build("div").child_of(pane);
        assert_eq!(dom.scroll_parent(item), pane);
    }

    #[test]
    fn offset_parent_skips_unpositioned_ancestors() {
        let mut dom = MemoryDom::new(Size::new(800.0, 600.0));
        let body = dom.body();
        let wrapper = dom.build("div").child_of(body);
        let anchor = dom
            .build("div")
            .position(CssPosition::Relative)
            .at(Offset::new(30.0, 30.0))
            .child_of(wrapper);
        let item = dom.build("div").at(Offset::new(40.0, 45.0)).child_of(anchor);

        assert_eq!(dom.offset_parent(item), anchor);
        assert_eq!(dom.offset_parent(anchor), dom.body());
        assert_eq!(dom.offset_in_parent(item), Offset::new(10.0, 15.0));
    }

    #[test]
    fn contains_is_inclusive() {
        let (dom, el) = small_dom();
        assert!(dom.contains(el, el));
        assert!(dom.contains(dom.body(), el));
        assert!(!dom.contains(el, dom.body()));
    }

    #[test]
    fn class_mutation() {
        let (mut dom, el) = small_dom();
        dom.add_class(el, "selected");
        dom.add_class(el, "selected");
        assert!(dom.has_class(el, "selected"));
        dom.remove_class(el, "selected");
        assert!(!dom.has_class(el, "selected"));
    }
}
