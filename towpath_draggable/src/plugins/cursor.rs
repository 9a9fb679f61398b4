// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Body cursor during the drag.

use crate::controller::Host;
use crate::events::{DragContext, PointerEvent};
use crate::options::DraggableOptions;
use crate::plugins::DraggablePlugin;
use crate::session::{HandlerMap, PluginData};

const PREVIOUS_KEY: &str = "cursor.previous";

/// Applies the configured CSS cursor to the body for the whole session.
///
/// Acts on the leader only: one cursor change per session, not one per
/// selected element.
#[derive(Copy, Clone, Debug, Default)]
pub struct CursorPlugin;

impl DraggablePlugin for CursorPlugin {
    fn name(&self) -> &'static str {
        "cursor"
    }

    fn should_run(&self, options: &DraggableOptions) -> bool {
        options.cursor.is_some()
    }

    fn on_start(
        &self,
        host: &mut Host<'_>,
        handlers: &mut HandlerMap,
        data: &mut PluginData,
        ctx: &DragContext,
        _event: &PointerEvent,
    ) {
        if !ctx.is_initial() {
            return;
        }
        let body = host.dom.body();
        if data.contains(body, PREVIOUS_KEY) {
            return;
        }
        let Some(cursor) = handlers
            .get(&ctx.draggable)
            .and_then(|h| h.options().cursor.clone())
        else {
            return;
        };

        data.set(body, PREVIOUS_KEY, host.dom.cursor(body));
        host.dom.set_cursor(body, Some(&cursor));
    }

    fn on_stop(
        &self,
        host: &mut Host<'_>,
        _handlers: &mut HandlerMap,
        data: &mut PluginData,
        ctx: &DragContext,
        _event: &PointerEvent,
    ) {
        if !ctx.is_initial() {
            return;
        }
        let body = host.dom.body();
        if let Some(previous) = data.take::<Option<alloc::string::String>>(body, PREVIOUS_KEY) {
            host.dom.set_cursor(body, previous.as_deref());
        }
    }
}
