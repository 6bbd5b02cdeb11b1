use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use schematic_rs_renderer::config::{RenderOptions, RoutingConfig};
use schematic_rs_renderer::geometry::{Point, Rect};
use schematic_rs_renderer::model::{Circuit, Component, ComponentKind, Pin, PinKind, PinSide, Wire};
use schematic_rs_renderer::render::render_svg;
use schematic_rs_renderer::routing::{compute_route, route_circuit};
use schematic_rs_renderer::theme::Theme;
use std::hint::black_box;

/// Grid of chips with a chain of wires snaking through it.
fn synthetic_circuit(cols: usize, rows: usize) -> Circuit {
    let mut circuit = Circuit::new();
    for row in 0..rows {
        for col in 0..cols {
            let id = format!("u{}_{}", col, row);
            circuit.add_component(Component {
                id: id.clone(),
                label: id.clone(),
                kind: ComponentKind::Chip,
                x: col as f32 * 160.0,
                y: row as f32 * 120.0,
                width: 80.0,
                height: 50.0,
            });
            for (name, side, kind) in [
                ("in", PinSide::Left, PinKind::Input),
                ("out", PinSide::Right, PinKind::Output),
            ] {
                circuit.add_pin(Pin {
                    id: format!("{id}.{name}"),
                    name: name.to_string(),
                    kind,
                    component: id.clone(),
                    side,
                    offset: 0.5,
                });
            }
        }
    }
    let mut previous: Option<String> = None;
    for row in 0..rows {
        for col in 0..cols {
            let id = format!("u{}_{}", col, row);
            if let Some(prev) = previous.take() {
                circuit.wires.push(Wire {
                    id: format!("w_{prev}_{id}"),
                    from: format!("{prev}.out"),
                    to: format!("{id}.in"),
                    label: None,
                    bend_points: Vec::new(),
                    path: Vec::new(),
                });
            }
            previous = Some(id);
        }
    }
    circuit
}

fn bench_single_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_route");
    let config = RoutingConfig::default();
    for obstacle_count in [1usize, 8, 32] {
        let obstacles: Vec<Rect> = (0..obstacle_count)
            .map(|i| Rect::new(60.0 + (i % 8) as f32 * 90.0, (i / 8) as f32 * 70.0 - 100.0, 40.0, 40.0))
            .collect();
        let source = Point::new(0.0, 0.0);
        let target = Point::new(800.0, 0.0);
        group.bench_with_input(
            BenchmarkId::from_parameter(obstacle_count),
            &obstacles,
            |b, obstacles| {
                b.iter(|| {
                    let path =
                        compute_route(black_box(source), target, &[], obstacles, &[], &config);
                    black_box(path.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_route_circuit(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_circuit");
    let config = RoutingConfig::default();
    for (cols, rows) in [(4usize, 3usize), (6, 5), (8, 8)] {
        let name = format!("grid_{}x{}", cols, rows);
        let circuit = synthetic_circuit(cols, rows);
        group.bench_with_input(BenchmarkId::from_parameter(name), &circuit, |b, circuit| {
            b.iter(|| {
                let mut circuit = circuit.clone();
                route_circuit(&mut circuit, &config);
                black_box(circuit.wires.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let theme = Theme::schematic_default();
    let options = RenderOptions::default();
    for (cols, rows) in [(4usize, 3usize), (8, 8)] {
        let name = format!("grid_{}x{}", cols, rows);
        let mut circuit = synthetic_circuit(cols, rows);
        route_circuit(&mut circuit, &RoutingConfig::default());
        group.bench_with_input(BenchmarkId::from_parameter(name), &circuit, |b, circuit| {
            b.iter(|| {
                let svg = render_svg(black_box(circuit), &theme, &options);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_single_route, bench_route_circuit, bench_render
);
criterion_main!(benches);
