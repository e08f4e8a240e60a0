use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use frise::config::LayoutConfig;
use frise::layout::{adjust_positions, compute_layout};
use frise::parser::parse_frise;
use frise::render::render_svg;
use frise::theme::Theme;
use std::hint::black_box;

const LEGENDS: [&str; 4] = ["Chemotherapy", "Radiotherapy", "Physiotherapy", "Observation"];

fn dense_timeline_source(moments: usize, spans: usize) -> String {
    let mut out = String::from("frise\ntitle Generated pathway\n");
    for i in 0..moments {
        let day = 1 + (i % 28) as u32;
        let month = 1 + ((i / 28) % 12) as u32;
        let category = if i % 2 == 0 { "contact" } else { "treatment" };
        out.push_str(&format!(
            "  {day:02}-{month:02}-2024 : {category} : Event {i}\n"
        ));
    }
    for j in 0..spans {
        let month = 1 + (j % 11) as u32;
        let legend = LEGENDS[j % LEGENDS.len()];
        out.push_str(&format!(
            "  01-{month:02}-2024 -> 15-{:02}-2024 : {legend}\n",
            month + 1
        ));
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (moments, spans) in [(8, 2), (40, 8), (200, 24)] {
        let source = dense_timeline_source(moments, spans);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{moments}m_{spans}s")),
            &source,
            |b, source| b.iter(|| parse_frise(black_box(source)).unwrap()),
        );
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let theme = Theme::classic();
    let config = LayoutConfig::default();
    let mut group = c.benchmark_group("layout");
    for (moments, spans) in [(8, 2), (40, 8), (200, 24)] {
        let parsed = parse_frise(&dense_timeline_source(moments, spans)).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{moments}m_{spans}s")),
            &parsed.timeline,
            |b, timeline| b.iter(|| compute_layout(black_box(timeline), &theme, &config).unwrap()),
        );
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let theme = Theme::classic();
    let config = LayoutConfig::default();
    let parsed = parse_frise(&dense_timeline_source(40, 8)).unwrap();
    let layout = compute_layout(&parsed.timeline, &theme, &config).unwrap();
    c.bench_function("render_svg_40m_8s", |b| {
        b.iter(|| render_svg(black_box(&layout), &theme, &config))
    });
}

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    for n in [8usize, 64, 512] {
        // Worst case: every label starts at the same position.
        let positions = vec![0.2f32; n];
        group.bench_with_input(BenchmarkId::from_parameter(n), &positions, |b, positions| {
            b.iter(|| adjust_positions(black_box(positions), 0.6).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_layout, bench_render, bench_placement);
criterion_main!(benches);
