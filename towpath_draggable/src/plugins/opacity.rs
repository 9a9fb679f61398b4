// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helper opacity during the drag.

use crate::controller::Host;
use crate::events::{DragContext, PointerEvent};
use crate::options::DraggableOptions;
use crate::plugins::DraggablePlugin;
use crate::session::{HandlerMap, PluginData};

const PREVIOUS_KEY: &str = "opacity.previous";

/// Applies the configured opacity to the helper at drag start and restores
/// whatever was there before at stop.
#[derive(Copy, Clone, Debug, Default)]
pub struct OpacityPlugin;

impl DraggablePlugin for OpacityPlugin {
    fn name(&self) -> &'static str {
        "opacity"
    }

    fn should_run(&self, options: &DraggableOptions) -> bool {
        options.opacity.is_some()
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

        data.set(helper, PREVIOUS_KEY, host.dom.opacity(helper));
        host.dom.set_opacity(helper, handler.options().opacity);
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

        if let Some(previous) = data.take::<Option<f64>>(helper, PREVIOUS_KEY) {
            host.dom.set_opacity(helper, previous);
        }
    }
}
