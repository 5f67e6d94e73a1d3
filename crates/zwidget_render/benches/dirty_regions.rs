use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zwidget_platform::{Rect, Size};
use zwidget_render::{Color, DirtyRegionTracker, PixelSurface, Renderer};

fn bench_mark_dirty(c: &mut Criterion) {
    c.bench_function("mark_dirty_overlapping_100", |b| {
        b.iter(|| {
            let mut tracker = DirtyRegionTracker::new();
            for i in 0..100 {
                tracker.mark_dirty(black_box(Rect::new(i, i, 20, 20)));
            }
            tracker
        })
    });

    c.bench_function("mark_dirty_disjoint_until_escalation", |b| {
        b.iter(|| {
            let mut tracker = DirtyRegionTracker::new();
            for i in 0..12 {
                tracker.mark_dirty(black_box(Rect::new(i * 50, 0, 10, 10)));
            }
            tracker
        })
    });
}

fn bench_partial_frame(c: &mut Criterion) {
    let size = Size::new(1280, 720);
    let mut renderer = Renderer::new(PixelSurface::new(size), size);

    c.bench_function("pixel_partial_frame_8_regions", |b| {
        b.iter(|| {
            for i in 0..8 {
                renderer.invalidate(Rect::new(i * 150, i * 80, 64, 64));
            }
            renderer
                .render(|canvas| canvas.fill_rect(Rect::new(0, 0, 1280, 720), Color::BLUE))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_mark_dirty, bench_partial_frame);
criterion_main!(benches);
