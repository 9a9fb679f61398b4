// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helper z-index during the drag.

use crate::controller::Host;
use crate::events::{DragContext, PointerEvent};
use crate::options::DraggableOptions;
use crate::plugins::DraggablePlugin;
use crate::session::{HandlerMap, PluginData};

const PREVIOUS_KEY: &str = "z-index.previous";

/// Applies the configured z-index to the helper at drag start and restores
/// the previous value at stop.
#[derive(Copy, Clone, Debug, Default)]
pub struct ZIndexPlugin;

impl DraggablePlugin for ZIndexPlugin {
    fn name(&self) -> &'static str {
        "z-index"
    }

    fn should_run(&self, options: &DraggableOptions) -> bool {
        options.z_index.is_some()
    }

    fn on_start(
        &self,
        host: &mut Host<'_>,
        handlers: &mut HandlerMap,
        data: &mut PluginData,
        ctx: &DragContext,
        _event: &PointerEvent,
    ) {
        let Some(handler) = handlers.get(&ctx.draggable) else {
            return;
        };
        let Some(helper) = handler.helper() else { return };

        data.set(helper, PREVIOUS_KEY, host.dom.z_index(helper));
        host.dom.set_z_index(helper, handler.options().z_index);
    }

    fn on_stop(
        &self,
        host: &mut Host<'_>,
        handlers: &mut HandlerMap,
        data: &mut PluginData,
        ctx: &DragContext,
        _event: &PointerEvent,
    ) {
        let Some(handler) = handlers.get(&ctx.draggable) else {
            return;
        };
        let Some(helper) = handler.helper() else { return };

        if let Some(previous) = data.take::<Option<i32>>(helper, PREVIOUS_KEY) {
            host.dom.set_z_index(helper, previous);
        }
    }
}
