// Criterion benchmarks for InnerConnect

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use innerconnect::auth::{StaticKeyProvider, TokenService};
use innerconnect::core::{calculate_compatibility_score, Matcher};
use innerconnect::models::{Role, ScoringWeights, UserProfile};
use innerconnect::realtime::MatchRoomRegistry;
use std::sync::Arc;

fn create_profile(id: usize, interest_count: usize) -> UserProfile {
    UserProfile::new(
        (0..interest_count).map(|i| format!("interest-{}", (i + id) % (interest_count * 2))),
        if id % 2 == 0 { "engineering" } else { "sales" },
    )
}

fn bench_compatibility_score(c: &mut Criterion) {
    let weights = ScoringWeights::default();
    let mut group = c.benchmark_group("compatibility_score");

    for interest_count in [5, 20, 100].iter() {
        let a = create_profile(0, *interest_count);
        let b = create_profile(3, *interest_count);

        group.bench_with_input(BenchmarkId::from_parameter(interest_count), interest_count, |bench, _| {
            bench.iter(|| calculate_compatibility_score(black_box(&a), black_box(&b), &weights));
        });
    }

    group.finish();
}

fn bench_matcher(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let me = create_profile(0, 10);
    let candidates: Vec<UserProfile> = (0..1000).map(|i| create_profile(i, 10)).collect();

    c.bench_function("matcher_1000_candidates", |b| {
        b.iter(|| {
            candidates
                .iter()
                .filter(|candidate| matcher.score(black_box(&me), candidate).matched)
                .count()
        });
    });
}

fn bench_token_verify(c: &mut Criterion) {
    let tokens = TokenService::new(
        Arc::new(StaticKeyProvider::from_secret(b"bench-secret", None)),
        "innerconnect-api",
        std::time::Duration::from_secs(900),
    );
    let token = tokens.issue("bench-user", Role::Employee).unwrap();

    c.bench_function("token_verify", |b| {
        b.iter(|| tokens.verify(black_box(&token)).unwrap());
    });
}

fn bench_broadcast(c: &mut Criterion) {
    let mut group = c.benchmark_group("room_broadcast");

    for members in [2, 50, 500].iter() {
        let registry = MatchRoomRegistry::new();
        let mut receivers = Vec::with_capacity(*members);
        for _ in 0..*members {
            let (id, rx) = registry.connect();
            registry.join(&id, "bench-room");
            receivers.push(rx);
        }
        let frame: Arc<str> = Arc::from(r#"{"event":"chat:message","data":{"matchId":"bench-room"}}"#);

        group.bench_with_input(BenchmarkId::from_parameter(members), members, |b, _| {
            b.iter(|| {
                registry.broadcast("bench-room", Arc::clone(&frame));
                for rx in receivers.iter_mut() {
                    while rx.try_recv().is_ok() {}
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compatibility_score,
    bench_matcher,
    bench_token_verify,
    bench_broadcast
);
criterion_main!(benches);
