// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drop-target collaborator interface.
//!
//! Towpath does not implement drop targets. A droppable integration supplies
//! a [`DropTargetManager`] and the drag controller keeps it informed:
//! [`DropTargetManager::initialize`] when a session starts,
//! [`DropTargetManager::drag`] per pointer move, and
//! [`DropTargetManager::perform_drop`] exactly once per session — for the
//! leader — whose boolean result is cached and reused for every co-dragged
//! element. [`DropTargetManager::is_handle_droppable`] runs before each of
//! those calls as a cheap guard.
//!
//! Every method has a no-op default, so an integration only overrides what
//! it participates in; [`NoDropManager`] overrides nothing and is the
//! manager to pass when drop targets are not in play.

use alloc::vec::Vec;

use towpath_dom::{Dom, ElementId};

use crate::events::{DragContext, PointerEvent};

/// Drop-target awareness consumed by the drag controller.
pub trait DropTargetManager {
    /// Registers a drop target under a scope.
    fn add_droppable(&mut self, _element: ElementId, _scope: &str) {}

    /// Returns `true` if any drop target could take this drag. Guards every
    /// other per-session call.
    fn is_handle_droppable(&self, _ctx: &DragContext) -> bool {
        false
    }

    /// Called once per started element after its helper exists.
    fn initialize(&mut self, _dom: &mut dyn Dom, _ctx: &DragContext, _event: &PointerEvent) {}

    /// Called per pointer move while dragging.
    fn drag(&mut self, _dom: &mut dyn Dom, _ctx: &DragContext, _event: &PointerEvent) {}

    /// Resolves the drop at session end. Called exactly once per session, on
    /// the leader; returns whether a target accepted the drag.
    fn perform_drop(
        &mut self,
        _dom: &mut dyn Dom,
        _ctx: &DragContext,
        _event: &PointerEvent,
    ) -> bool {
        false
    }

    /// Re-synchronizes target geometry when drop targets change mid-drag.
    fn update(&mut self, _ctx: &DragContext) {}

    /// All registered drop targets carrying `scope`.
    fn droppables_by_scope(&self, _scope: &str) -> Vec<ElementId> {
        Vec::new()
    }
}

/// A [`DropTargetManager`] that never accepts anything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoDropManager;

impl DropTargetManager for NoDropManager {}
