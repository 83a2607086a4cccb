// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use rucksack_backtrack::backtrack::BacktrackingSolver;
use rucksack_bnb::bnb::BnbSolver;
use rucksack_dp::{dp::DpSolver, table::TableLayout};
use rucksack_model::instance::Instance;
use rucksack_model::loading::InstanceLoader;
use std::fs;
use std::hint::black_box;
use std::path::{Path, PathBuf};

fn find_instances_dir() -> Option<PathBuf> {
    let mut cur: Option<&Path> = Some(Path::new(env!("CARGO_MANIFEST_DIR")));
    while let Some(p) = cur {
        let cand = p.join("data");
        if cand.is_dir() {
            return Some(cand);
        }
        cur = p.parent();
    }
    None
}

/// Gathers the instance files named like "<category>_<n>.txt".
fn get_instance_files() -> Vec<PathBuf> {
    let Some(dir) = find_instances_dir() else {
        return Vec::new();
    };

    let re = Regex::new(r"^.+_\d+\.txt$").unwrap();

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .expect("Failed to read data directory")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|s| re.is_match(s))
                .unwrap_or(false)
        })
        .collect();

    files.sort();
    files
}

fn generated_instance(n: usize, seed: u64) -> Instance<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let weights: Vec<i64> = (0..n).map(|_| rng.gen_range(1..=30)).collect();
    let volumes: Vec<i64> = (0..n).map(|_| rng.gen_range(1..=30)).collect();
    let values: Vec<i64> = (0..n).map(|_| rng.gen_range(1..=100)).collect();
    let w_cap = weights.iter().sum::<i64>() / 2;
    let v_cap = volumes.iter().sum::<i64>() / 2;
    Instance::from_sequences(w_cap, v_cap, &weights, &volumes, &values).unwrap()
}

fn bench_instance(c: &mut Criterion, group_name: &str, label: &str, instance: &Instance<i64>) {
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(instance.num_items() as u64));

    let dp = DpSolver::new();
    let dp_rolling = DpSolver::new().with_layout(TableLayout::Rolling);
    let mut bnb = BnbSolver::preallocated(instance.num_items());
    let mut backtracking = BacktrackingSolver::new();

    group.bench_with_input(BenchmarkId::new("dp", label), instance, |b, inst| {
        b.iter(|| dp.solve(black_box(inst)).unwrap())
    });
    group.bench_with_input(BenchmarkId::new("dp-rolling", label), instance, |b, inst| {
        b.iter(|| dp_rolling.solve(black_box(inst)).unwrap())
    });
    group.bench_with_input(BenchmarkId::new("bnb", label), instance, |b, inst| {
        b.iter(|| bnb.solve(black_box(inst)))
    });
    group.bench_with_input(BenchmarkId::new("backtracking", label), instance, |b, inst| {
        b.iter(|| backtracking.solve(black_box(inst)))
    });
    group.finish();
}

fn bench_generated_instances(c: &mut Criterion) {
    for n in [10, 15, 20, 25] {
        let instance = generated_instance(n, 0xC0FFEE + n as u64);
        bench_instance(c, "generated", &format!("n{n}"), &instance);
    }
}

fn bench_real_instances(c: &mut Criterion) {
    let files = get_instance_files();
    if files.is_empty() {
        eprintln!("No instance files found in data/ matching pattern. Skipping benchmark.");
        return;
    }

    let loader = InstanceLoader::<i64>::dual();
    for path in files {
        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        let instance = loader
            .from_path(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", file_name, e));
        bench_instance(c, "files", &file_name, &instance);
    }
}

criterion_group!(benches, bench_generated_instances, bench_real_instances);
criterion_main!(benches);
