use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use devtrack_core::test_utils::{create_bulk_timeline_items, create_full_project_payload, mock_date};
use devtrack_core::{
    compute_render_model, rank, ExportConfig, ExportFormat, FixedClock, Granularity,
    NavigationState, ReportRenderer,
};
use std::sync::Arc;

fn bench_compute_render_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_render_model");
    let anchor = mock_date(2026, 10, 16);

    for size in [100, 1_000, 10_000].iter() {
        let items = create_bulk_timeline_items(*size, mock_date(2020, 1, 1));
        group.throughput(Throughput::Elements(*size as u64));

        for granularity in [Granularity::Week, Granularity::Month] {
            let nav = NavigationState::new(anchor, granularity);
            group.bench_with_input(
                BenchmarkId::new(granularity.to_string(), size),
                &items,
                |b, items| b.iter(|| compute_render_model(black_box(items), black_box(&nav))),
            );
        }
    }

    group.finish();
}

fn bench_render_formats(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_document");
    let renderer = ReportRenderer::new(
        ExportConfig::default(),
        Arc::new(FixedClock::at_date(mock_date(2026, 10, 16))),
    );
    let payload = create_full_project_payload();

    for format in [
        ExportFormat::StructuredDocument,
        ExportFormat::TabularText,
        ExportFormat::KeyValueText,
    ] {
        group.bench_function(format.to_string(), |b| {
            b.iter(|| renderer.render(black_box(&payload), format));
        });
    }

    group.finish();
}

fn bench_search_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_rank");

    for size in [100, 1_000].iter() {
        let items = create_bulk_timeline_items(*size, mock_date(2020, 1, 1));
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| rank(black_box("item 42"), items.iter().collect()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_render_model,
    bench_render_formats,
    bench_search_rank
);
criterion_main!(benches);
