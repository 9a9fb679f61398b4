// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Towpath Draggable: a host-driven drag-and-drop behavior core.
//!
//! This crate lets on-screen elements be grabbed with the pointer and moved
//! within positional, scroll, and snapping constraints, with a pluggable
//! side-effect system and a decoupled drop-target interface. It owns no
//! element tree and runs no event loop: the host feeds pointer events in,
//! pumps deferred work, and exposes its elements through
//! [`towpath_dom::Dom`].
//!
//! ## Pieces
//!
//! - [`Draggable`]: the interaction state machine
//!   (`idle → candidate → dragging → stopped`), multi-selection, plugin
//!   dispatch, deferred work, and revert animation.
//! - [`DraggableHandler`]: per-element drag geometry — coordinate-space
//!   conversions, containment clamping, grid rounding, helper lifecycle.
//! - [`DragSessionManager`]: the injectable application-wide state — shared
//!   selection, ordered plugin registry, handlers, plugin data.
//! - [`DraggablePlugin`](plugins::DraggablePlugin) and seven built-ins:
//!   opacity, scroll, cursor, z-index, stack, snap, group-position.
//! - [`DropTargetManager`]: the consumed drop-target interface.
//!
//! ## Minimal example
//!
//! ```
//! use towpath_dom::{Dom, MemoryDom, Offset, Size};
//! use towpath_draggable::{
//!     Draggable, DraggableOptions, DragSessionManager, Host, NoDropManager, PointerEvent,
//! };
//!
//! let mut dom = MemoryDom::new(Size::new(800.0, 600.0));
//! let body = dom.body();
//! let card = dom
//!     .build("div")
//!     .at(Offset::new(100.0, 100.0))
//!     .size(Size::new(50.0, 50.0))
//!     .child_of(body);
//!
//! let mut session = DragSessionManager::new();
//! let mut controller = Draggable::new();
//! let mut drops = NoDropManager;
//! let mut host = Host {
//!     dom: &mut dom,
//!     drops: &mut drops,
//!     listener: &mut (),
//! };
//!
//! session.make_draggable(host.dom, card, DraggableOptions::default());
//!
//! // Press, cross the drag threshold, drag, release.
//! controller.pointer_down(&mut host, &mut session, card, &PointerEvent::at(Offset::new(110.0, 110.0)));
//! controller.pointer_move(&mut host, &mut session, &PointerEvent::at(Offset::new(150.0, 140.0)));
//! assert!(controller.is_dragging());
//! controller.pump(&mut host, &mut session, 0); // deferred initial placement
//! controller.pointer_move(&mut host, &mut session, &PointerEvent::at(Offset::new(190.0, 170.0)));
//! controller.pointer_up(&mut host, &mut session, &PointerEvent::at(Offset::new(190.0, 170.0)));
//! controller.pump(&mut host, &mut session, 16); // deferred stop notification
//!
//! // The element followed the pointer by (40, 30) since the drag began.
//! assert_eq!(host.dom.position_style(card), Offset::new(40.0, 30.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod drop;
mod events;
mod float;
mod handler;
mod options;
pub mod plugins;
mod session;

/// CSS marker classes applied by the controller and session manager.
pub mod css_class {
    /// Present on every enabled draggable.
    pub const DRAGGABLE: &str = "towpath-draggable";
    /// Present on enabled-but-disabled draggables.
    pub const DISABLED: &str = "towpath-draggable-disabled";
    /// Present on the helper while a drag session is active.
    pub const DRAGGING: &str = "towpath-draggable-dragging";
    /// Selector form of [`DRAGGABLE`].
    pub const DRAGGABLE_SELECTOR: &str = ".towpath-draggable";
}

pub use controller::{Draggable, Host};
pub use drop::{DropTargetManager, NoDropManager};
pub use events::{DragContext, DragListener, Modifiers, Outcome, PointerEvent};
pub use handler::DraggableHandler;
pub use options::{
    AppendTo, Axis, Containment, CursorAt, DragCallback, DraggableOptions, ElementMatch,
    GroupingMode, Helper, RevertPolicy, SelectElementsFn, SelectionCallback, SnapMode,
    StopCallback,
};
pub use session::{DragSessionManager, HandlerMap, PluginData};
