// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The plugin protocol and the built-in drag behaviors.
//!
//! A plugin is a stateless strategy keyed by name. On every phase the
//! controller walks the registry in registration order and, for each plugin
//! whose [`DraggablePlugin::should_run`] predicate accepts the dragged
//! element's options, invokes the matching phase hook. All active plugins
//! run before the corresponding user notification fires.
//!
//! Plugins keep per-session state in the
//! [`PluginData`](crate::session::PluginData) store — scoped by a
//! plugin-specific key, written in `on_start`, read and cleared in `on_stop`
//! — never in fields of their own, so two plugins cannot trample each other
//! and plugin instances stay shareable.
//!
//! | plugin | behavior |
//! |---|---|
//! | [`OpacityPlugin`] | apply a drag opacity to the helper, restore after |
//! | [`ScrollPlugin`] | scroll an ancestor (or the document) near its edges |
//! | [`CursorPlugin`] | apply a body cursor for the session (leader only) |
//! | [`ZIndexPlugin`] | apply a drag z-index to the helper, restore after |
//! | [`StackPlugin`] | restack a set of elements, helper on top |
//! | [`SnapPlugin`] | align helper edges with nearby target edges |
//! | [`GroupPositionPlugin`] | arrange follower helpers around the leader |

use crate::controller::Host;
use crate::events::{DragContext, PointerEvent};
use crate::options::DraggableOptions;
use crate::session::{HandlerMap, PluginData};

mod cursor;
mod group_position;
mod opacity;
mod scroll;
mod snap;
mod stack;
mod z_index;

pub use cursor::CursorPlugin;
pub use group_position::GroupPositionPlugin;
pub use opacity::OpacityPlugin;
pub use scroll::ScrollPlugin;
pub use snap::SnapPlugin;
pub use stack::StackPlugin;
pub use z_index::ZIndexPlugin;

/// A named drag behavior invoked at the start, drag, and stop phases.
///
/// Phase hooks default to no-ops; a plugin implements the phases it
/// participates in. Hooks receive the full handler map rather than a single
/// handler because some behaviors (group positioning) read the session
/// leader's geometry while adjusting a follower's.
pub trait DraggablePlugin {
    /// The registry name. Registering the same name twice replaces the
    /// earlier instance.
    fn name(&self) -> &'static str;

    /// Activation predicate: whether this plugin participates for an
    /// element configured with `options`.
    fn should_run(&self, options: &DraggableOptions) -> bool;

    /// Start phase, after the element's helper exists and its handler is
    /// initialized.
    fn on_start(
        &self,
        _host: &mut Host<'_>,
        _handlers: &mut HandlerMap,
        _data: &mut PluginData,
        _ctx: &DragContext,
        _event: &PointerEvent,
    ) {
    }

    /// Drag phase, after the handler recomputed positions and before the
    /// helper moves.
    fn on_drag(
        &self,
        _host: &mut Host<'_>,
        _handlers: &mut HandlerMap,
        _data: &mut PluginData,
        _ctx: &DragContext,
        _event: &PointerEvent,
    ) {
    }

    /// Stop phase, before the helper is released (and after any revert
    /// animation completes).
    fn on_stop(
        &self,
        _host: &mut Host<'_>,
        _handlers: &mut HandlerMap,
        _data: &mut PluginData,
        _ctx: &DragContext,
        _event: &PointerEvent,
    ) {
    }
}
