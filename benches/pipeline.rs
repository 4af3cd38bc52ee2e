use criterion::{black_box, criterion_group, criterion_main, Criterion};
use heightview::core::{FramePipeline, MeshBuilder, RenderParams};
use heightview::loader::synthetic_terrain;
use heightview::types::{Command, MeshMode, OrbitDirection, DEFAULT_Z_SCALE};

fn bench_mesh_build(c: &mut Criterion) {
    let hf = synthetic_terrain(128);
    let builder = MeshBuilder::new(DEFAULT_Z_SCALE, MeshMode::Shaded);

    c.bench_function("mesh_build_128", |b| {
        b.iter(|| builder.build(black_box(&hf)))
    });
}

fn bench_render(c: &mut Criterion) {
    let hf = synthetic_terrain(128);
    let mut pipeline = FramePipeline::with_defaults(&hf, RenderParams::default());

    c.bench_function("render_shaded_128", |b| {
        b.iter(|| {
            pipeline.render().map(|frame| frame.element_count()).ok();
        })
    });
}

fn bench_orbit_rerender(c: &mut Criterion) {
    let hf = synthetic_terrain(64);
    let params = RenderParams {
        mode: MeshMode::Wireframe,
        ..RenderParams::default()
    };
    let mut pipeline = FramePipeline::with_defaults(&hf, params);

    c.bench_function("orbit_wireframe_64", |b| {
        b.iter(|| {
            pipeline
                .apply_command(black_box(Command::Orbit(OrbitDirection::Left)))
                .map(|frame| frame.map(|f| f.element_count()))
                .ok();
        })
    });
}

criterion_group!(benches, bench_mesh_build, bench_render, bench_orbit_rerender);
criterion_main!(benches);
