// Copyright 2025 the Towpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use towpath_dom::{CssPosition, Dom, ElementId, MemoryDom, Offset, Size};
use towpath_draggable::{Containment, DraggableHandler, DraggableOptions, PointerEvent};

fn started_handler(options: DraggableOptions) -> (MemoryDom, ElementId, DraggableHandler) {
    let mut dom = MemoryDom::new(Size::new(1920.0, 1080.0));
    let body = dom.body();
    let item = dom
        .build("div")
        .position(CssPosition::Absolute)
        .at(Offset::new(100.0, 100.0))
        .size(Size::new(50.0, 50.0))
        .styled_at(100.0, 100.0)
        .child_of(body);

    let mut handler = DraggableHandler::new(options);
    handler.create_helper(&mut dom, item);
    handler.cache_helper_size(&dom);
    handler.initialize(&dom, item, &PointerEvent::at(Offset::new(110.0, 110.0)));
    (dom, item, handler)
}

// The per-pointer-move hot path: raw position, containment-clamped, and
// containment + grid combined.
fn bench_generate_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag/generate_position");

    let unconstrained = DraggableOptions::default();
    let contained = DraggableOptions {
        containment: Some(Containment::Region(Rect::new(0.0, 0.0, 1000.0, 1000.0))),
        ..DraggableOptions::default()
    };
    let contained_grid = DraggableOptions {
        containment: Some(Containment::Region(Rect::new(0.0, 0.0, 1000.0, 1000.0))),
        grid: Some([20.0, 20.0]),
        ..DraggableOptions::default()
    };

    for (label, options) in [
        ("unconstrained", unconstrained),
        ("contained", contained),
        ("contained_grid", contained_grid),
    ] {
        let (dom, _item, handler) = started_handler(options);
        group.bench_with_input(BenchmarkId::from_parameter(label), &handler, |b, handler| {
            b.iter(|| {
                let mut acc = 0.0;
                for step in 0..64_u32 {
                    let page = Offset::new(110.0 + f64::from(step) * 13.0, 110.0 + f64::from(step) * 7.0);
                    let position =
                        handler.generate_position(&dom, &PointerEvent::at(page), false);
                    acc += position.left + position.top;
                }
                black_box(acc);
            });
        });
    }

    group.finish();
}

fn bench_convert_round_trip(c: &mut Criterion) {
    let (dom, _item, handler) = started_handler(DraggableOptions::default());

    c.bench_function("drag/convert_position_round_trip", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for step in 0..64_u32 {
                let position = Offset::new(f64::from(step) * 11.0, f64::from(step) * 3.0);
                let relative = handler.convert_position_to(&dom, false, position);
                let back = handler.convert_position_to(&dom, true, relative);
                acc += back.left + back.top;
            }
            black_box(acc);
        });
    });
}

criterion_group!(benches, bench_generate_position, bench_convert_round_trip);
criterion_main!(benches);
