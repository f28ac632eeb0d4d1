//! Benchmarks for geometry precomputation and field evaluation.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point3;
use regolith::prelude::*;
use std::f64::consts::PI;

/// Closed UV sphere with `rings` latitude bands and `segments` longitude
/// steps, wound outward.
fn create_sphere_mesh(rings: usize, segments: usize) -> TriMesh {
    let mut vertices = Vec::with_capacity((rings - 1) * segments + 2);
    let mut faces = Vec::with_capacity(2 * (rings - 1) * segments);

    vertices.push(Point3::new(0.0, 0.0, 1.0));
    for i in 1..rings {
        let theta = PI * i as f64 / rings as f64;
        for j in 0..segments {
            let phi = 2.0 * PI * j as f64 / segments as f64;
            vertices.push(Point3::new(
                theta.sin() * phi.cos(),
                theta.sin() * phi.sin(),
                theta.cos(),
            ));
        }
    }
    vertices.push(Point3::new(0.0, 0.0, -1.0));

    let ring = |i: usize, j: usize| 1 + (i - 1) * segments + j % segments;
    let south = vertices.len() - 1;

    for j in 0..segments {
        faces.push([0, ring(1, j), ring(1, j + 1)]);
    }
    for i in 1..rings - 1 {
        for j in 0..segments {
            faces.push([ring(i, j), ring(i + 1, j), ring(i + 1, j + 1)]);
            faces.push([ring(i, j), ring(i + 1, j + 1), ring(i, j + 1)]);
        }
    }
    for j in 0..segments {
        faces.push([south, ring(rings - 1, j + 1), ring(rings - 1, j)]);
    }

    TriMesh::new(vertices, faces).unwrap()
}

fn bench_geometry_build(c: &mut Criterion) {
    let small = create_sphere_mesh(16, 32);
    let large = create_sphere_mesh(64, 128);

    c.bench_function("geometry_build_sphere_16x32", |b| {
        b.iter(|| MeshGeometry::build(&small).unwrap())
    });

    c.bench_function("geometry_build_sphere_64x128", |b| {
        b.iter(|| MeshGeometry::build(&large).unwrap())
    });
}

fn bench_field_evaluation(c: &mut Criterion) {
    let mesh = create_sphere_mesh(32, 64);
    let geometry = MeshGeometry::build(&mesh).unwrap();
    let density = 2.0e12;
    let point = Point3::new(3.0, 1.0, -2.0);

    c.bench_function("polyhedron_potential_sphere_32x64", |b| {
        b.iter(|| polyhedron_potential(&mesh, &geometry, density, &point).unwrap())
    });
}

fn bench_rotation_update(c: &mut Criterion) {
    let mesh = create_sphere_mesh(16, 32);

    c.bench_function("update_rotation_sphere_16x32", |b| {
        let mut asteroid = Asteroid::from_mesh("castalia", mesh.clone()).unwrap();
        let mut time = 0.0;
        b.iter(|| {
            time += 60.0;
            asteroid.update_rotation(time).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_geometry_build,
    bench_field_evaluation,
    bench_rotation_update
);
criterion_main!(benches);
