use allowgate_core::{AllowList, AuthRequest, Authorizer, MembershipMode};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;

fn build_allow_list(size: usize) -> AllowList {
    let entries: HashMap<String, bool> = (0..size)
        .map(|i| (format!("user-{}", i), i % 2 == 0))
        .collect();
    let json = serde_json::to_string(&entries).unwrap();
    AllowList::from_json_str(&json).unwrap()
}

fn bench_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("check");

    for size in [10, 1_000, 100_000] {
        for mode in [MembershipMode::Presence, MembershipMode::Flag] {
            let authorizer = Authorizer::with_mode(build_allow_list(size), mode);
            let hit = AuthRequest::new(format!("user-{}", size / 2));
            let miss = AuthRequest::new("nobody");

            group.bench_with_input(
                BenchmarkId::new(format!("{}/hit", mode), size),
                &hit,
                |b, req| b.iter(|| authorizer.check(black_box(req))),
            );
            group.bench_with_input(
                BenchmarkId::new(format!("{}/miss", mode), size),
                &miss,
                |b, req| b.iter(|| authorizer.check(black_box(req))),
            );
        }
    }

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let entries: HashMap<String, bool> = (0..10_000)
        .map(|i| (format!("user-{}", i), true))
        .collect();
    let json = serde_json::to_string(&entries).unwrap();

    c.bench_function("load/10000", |b| {
        b.iter(|| AllowList::from_json_str(black_box(&json)).unwrap())
    });
}

criterion_group!(benches, bench_check, bench_load);
criterion_main!(benches);
