// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host trait: an abstract element tree with a CSS-flavored box model.

use alloc::string::String;
use alloc::vec::Vec;

use crate::geometry::{CssPosition, Edges, Offset, Size};

/// Identifier for an element owned by the host.
///
/// This is a small, copyable handle that stays stable while the element is
/// alive and becomes invalid when the host reuses the underlying slot.
/// It consists of a slot index and a generation counter.
///
/// Hosts mint these with [`ElementId::new`]; the drag core never constructs
/// one itself. A stale `ElementId` never aliases a different live element
/// because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(u32, u32);

impl ElementId {
    /// Creates a handle from a slot index and generation counter.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(index, generation)
    }

    /// The slot index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// The generation counter.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.1
    }
}

/// The element tree and box model the drag core runs against.
///
/// Implemented by the host: a browser binding, a retained-mode UI toolkit, or
/// [`MemoryDom`](crate::MemoryDom) in tests. All positions and lengths are
/// page pixels (`f64`).
///
/// ## Stale handles
///
/// Every method tolerates a stale or never-valid [`ElementId`]: queries
/// return defaults (zero geometry, empty results, `None` style values) and
/// mutations are no-ops. The drag core relies on this for the "dead
/// containment/snap target" edge case, which must degrade to "no constraint"
/// rather than fail.
///
/// ## Selectors
///
/// [`Dom::query`] and [`Dom::query_within`] accept a host-defined selector
/// language; the drag core only passes selectors through from configuration.
/// `MemoryDom` implements the minimal subset `#id`, `.class`, `tag`, and
/// `tag.class`.
pub trait Dom {
    // --- structure ---

    /// The document root element (the outermost box, owner of document scroll).
    fn root(&self) -> ElementId;

    /// The body element, the default offset reference for page coordinates.
    fn body(&self) -> ElementId;

    /// Returns `true` if `id` is the document root or the body.
    fn is_root(&self, id: ElementId) -> bool;

    /// The parent element, if any.
    fn parent(&self, id: ElementId) -> Option<ElementId>;

    /// Moves `id` (and its subtree) under `parent`, appended last.
    fn append_to(&mut self, id: ElementId, parent: ElementId);

    /// Deep-clones `id`'s subtree. The clone is detached (no parent).
    fn clone_element(&mut self, id: ElementId) -> ElementId;

    /// Removes `id` and its subtree from the tree, freeing the elements.
    fn remove(&mut self, id: ElementId);

    /// Returns `true` if `id` is connected to the document root.
    fn is_attached(&self, id: ElementId) -> bool;

    /// Returns `true` if `descendant` is `ancestor` or inside its subtree.
    fn contains(&self, ancestor: ElementId, descendant: ElementId) -> bool;

    /// All attached elements matching `selector`, in document order.
    fn query(&self, selector: &str) -> Vec<ElementId>;

    /// Descendants of `scope` matching `selector`, in document order.
    /// `scope` itself is never included.
    fn query_within(&self, scope: ElementId, selector: &str) -> Vec<ElementId>;

    // --- geometry ---

    /// Page position of the element's border box.
    fn absolute_position(&self, id: ElementId) -> Offset;

    /// Position of the element relative to its offset parent
    /// (`offsetLeft`/`offsetTop`).
    fn offset_in_parent(&self, id: ElementId) -> Offset;

    /// Left and top margins.
    fn margins(&self, id: ElementId) -> Offset;

    /// Border-box dimensions (`offsetWidth`/`offsetHeight`).
    fn outer_size(&self, id: ElementId) -> Size;

    /// Scrollable content extent (`scrollWidth`/`scrollHeight`).
    fn scroll_size(&self, id: ElementId) -> Size;

    /// Border widths.
    fn border(&self, id: ElementId) -> Edges;

    /// Padding widths.
    fn padding(&self, id: ElementId) -> Edges;

    /// Returns `true` if the element clips overflowing content
    /// (`overflow: hidden`).
    fn clips_overflow(&self, id: ElementId) -> bool;

    /// The visible viewport dimensions.
    fn viewport(&self) -> Size;

    // --- scrolling and positioning ancestors ---

    /// The nearest ancestor with its own scrollable viewport, or the
    /// document root when none exists.
    fn scroll_parent(&self, id: ElementId) -> ElementId;

    /// The nearest positioned ancestor, or the body when none exists.
    fn offset_parent(&self, id: ElementId) -> ElementId;

    /// Current scroll offsets of the element's viewport. For the document
    /// root this is the document scroll position.
    fn scroll_offset(&self, id: ElementId) -> Offset;

    /// Sets the element's scroll offsets.
    fn set_scroll_offset(&mut self, id: ElementId, offset: Offset);

    // --- style ---

    /// The element's positioning scheme.
    fn css_position(&self, id: ElementId) -> CssPosition;

    /// Sets the element's positioning scheme.
    fn set_css_position(&mut self, id: ElementId, position: CssPosition);

    /// Current `left`/`top` style offsets, with unset components read as zero.
    fn position_style(&self, id: ElementId) -> Offset;

    /// Writes the `left` style offset in pixels.
    fn set_left(&mut self, id: ElementId, left: f64);

    /// Writes the `top` style offset in pixels.
    fn set_top(&mut self, id: ElementId, top: f64);

    /// The element's explicit opacity, if one is set.
    fn opacity(&self, id: ElementId) -> Option<f64>;

    /// Sets or clears the element's opacity.
    fn set_opacity(&mut self, id: ElementId, opacity: Option<f64>);

    /// The element's explicit z-index, if one is set.
    fn z_index(&self, id: ElementId) -> Option<i32>;

    /// Sets or clears the element's z-index.
    fn set_z_index(&mut self, id: ElementId, z_index: Option<i32>);

    /// The element's explicit CSS cursor, if one is set.
    fn cursor(&self, id: ElementId) -> Option<String>;

    /// Sets or clears the element's CSS cursor.
    fn set_cursor(&mut self, id: ElementId, cursor: Option<&str>);

    /// Adds a CSS class (no-op if already present).
    fn add_class(&mut self, id: ElementId, class: &str);

    /// Removes a CSS class (no-op if absent).
    fn remove_class(&mut self, id: ElementId, class: &str);

    /// Returns `true` if the element carries `class`.
    fn has_class(&self, id: ElementId, class: &str) -> bool;
}
