use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use singly_list::{Execution, List};
use std::hint::black_box;

const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut list = List::new();
                for i in 0..size {
                    list.append_element(black_box(i)).unwrap();
                }
                list
            })
        });
    }
    group.finish();
}

fn get_at_random_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_element_at_index");
    for size in SIZES {
        let list = List::from_iter(0..size);
        let mut rng = StdRng::seed_from_u64(size as u64);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let index = rng.random_range(0..size);
                black_box(list.get_element_at_index(index))
            })
        });
    }
    group.finish();
}

fn insert_in_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_element_at_index");
    for size in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || List::from_iter(0..size),
                |mut list| {
                    list.insert_element_at_index(black_box(0), size / 2).unwrap();
                    list
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn split_and_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_off");
    for size in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || List::from_iter(0..size),
                |mut list| {
                    let rest = list.split_off(size / 2).unwrap();
                    black_box((list.calculate_length(), rest.calculate_length()))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn execute_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute_on_elements");
    for size in SIZES {
        let list = List::from_iter(0..size as u64);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &list, |b, list| {
            b.iter(|| {
                let mut sum = 0u64;
                list.execute_on_elements(&mut sum, |element, _, _, sum| {
                    *sum += element;
                    Execution::Continue
                })
                .unwrap();
                black_box(sum)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    append,
    get_at_random_index,
    insert_in_middle,
    split_and_length,
    execute_sum
);
criterion_main!(benches);
