use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use relayq::{QueueRegistry, RendezvousQueue};

/// Benchmark: Poll on a queue with no pending producer
fn bench_poll_empty(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let queue = RendezvousQueue::new("/bench".to_string());

    c.bench_function("poll_empty", |b| {
        b.iter(|| {
            rt.block_on(async {
                let _ = black_box(queue.receive(None).await);
            });
        });
    });
}

/// Benchmark: Offer then poll hand-off latency
fn bench_offer_then_poll(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("offer_then_poll");
    group.sample_size(1000);

    group.bench_function("single_value", |b| {
        let queue = RendezvousQueue::new("/bench".to_string());

        b.iter(|| {
            rt.block_on(async {
                let pending = queue.offer(black_box("data".to_string()));
                let _ = black_box(queue.receive(None).await);
                pending.delivered(None).await;
            });
        });
    });

    group.finish();
}

/// Benchmark: Registry lookups against an existing queue set
fn bench_registry_get_or_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_get_or_create");

    for queues in [10, 1000, 100000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(queues), queues, |b, &queues| {
            let registry = QueueRegistry::new();
            for i in 0..queues {
                registry.get_or_create(&format!("/queue-{}", i));
            }

            b.iter(|| {
                let _ = black_box(registry.get_or_create(black_box("/queue-0")));
            });
        });
    }
    group.finish();
}

/// Benchmark: Waiting consumers matched by concurrent producers
fn bench_concurrent_hand_off(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("concurrent_hand_off");
    group.sample_size(50);

    for pairs in [2u64, 4, 8, 16].iter() {
        group.throughput(Throughput::Elements(*pairs * 1000));
        group.bench_with_input(BenchmarkId::from_parameter(pairs), pairs, |b, &pairs| {
            b.iter(|| {
                rt.block_on(async {
                    let registry = Arc::new(QueueRegistry::new());
                    let mut handles = vec![];

                    for _ in 0..pairs {
                        let queue = registry.get_or_create("/bench");
                        handles.push(tokio::spawn(async move {
                            for _ in 0..1000 {
                                queue.send("data".to_string()).await;
                            }
                        }));

                        let queue = registry.get_or_create("/bench");
                        handles.push(tokio::spawn(async move {
                            for _ in 0..1000 {
                                let _ = black_box(queue.receive(Some(Duration::from_secs(1))).await);
                            }
                        }));
                    }

                    for handle in handles {
                        handle.await.unwrap();
                    }
                });
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_poll_empty,
    bench_offer_then_poll,
    bench_registry_get_or_create,
    bench_concurrent_hand_off,
);

criterion_main!(benches);
