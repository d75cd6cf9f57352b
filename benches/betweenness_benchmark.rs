use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trellis::{BetweennessCentrality, BetweennessConfig, CancellationToken, CsrGraph};

/// Deterministic pseudo-random graph: `nodes` nodes, ~`degree` out-edges
/// each, fixed multiplicative pattern.
fn synthetic_graph(nodes: u64, degree: u64) -> CsrGraph {
    let mut builder = CsrGraph::builder();
    for source in 0..nodes {
        for k in 1..=degree {
            let target = (source * 31 + k * 97) % nodes;
            if target != source {
                builder.add_relationship(source, target);
            }
        }
    }
    builder.build()
}

fn bench_betweenness(c: &mut Criterion) {
    let graph = synthetic_graph(1_000, 8);

    for concurrency in [1usize, 4] {
        c.bench_function(&format!("betweenness_exact_c{concurrency}"), |b| {
            let config = BetweennessConfig {
                sampling_probability: 1.0,
                concurrency,
                random_seed: None,
            };
            let engine = BetweennessCentrality::new(&graph, config).unwrap();
            b.iter(|| black_box(engine.compute(&CancellationToken::new()).unwrap()));
        });
    }

    c.bench_function("betweenness_sampled_p0.1", |b| {
        let config = BetweennessConfig {
            sampling_probability: 0.1,
            concurrency: 4,
            random_seed: Some(42),
        };
        let engine = BetweennessCentrality::new(&graph, config).unwrap();
        b.iter(|| black_box(engine.compute(&CancellationToken::new()).unwrap()));
    });
}

criterion_group!(benches, bench_betweenness);
criterion_main!(benches);
