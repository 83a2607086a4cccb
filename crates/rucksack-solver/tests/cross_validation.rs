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


use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rucksack_backtrack::{backtrack::BacktrackingSolver, remaining::RemainingValueBound};
use rucksack_bnb::{bnb::BnbSolver, bound::RelaxationBound};
use rucksack_dp::{dp::DpSolver, table::TableLayout};
use rucksack_model::{index::ItemIndex, instance::Instance, solution::Solution};

type IntegerType = i64;

/// Generates a dual instance with `n` items and capacities around a fraction
/// of the totals, so that both constraints bind.
fn random_dual(rng: &mut StdRng, n: usize) -> Instance<IntegerType> {
    let weights: Vec<IntegerType> = (0..n).map(|_| rng.gen_range(1..=20)).collect();
    let volumes: Vec<IntegerType> = (0..n).map(|_| rng.gen_range(1..=20)).collect();
    let values: Vec<IntegerType> = (0..n).map(|_| rng.gen_range(1..=50)).collect();
    let w_cap = (weights.iter().sum::<IntegerType>() / 2).max(1);
    let v_cap = (volumes.iter().sum::<IntegerType>() * rng.gen_range(1..=3) / 4).max(1);
    Instance::from_sequences(w_cap, v_cap, &weights, &volumes, &values).expect("valid instance")
}

fn random_single(rng: &mut StdRng, n: usize) -> Instance<IntegerType> {
    let weights: Vec<IntegerType> = (0..n).map(|_| rng.gen_range(1..=30)).collect();
    let values: Vec<IntegerType> = (0..n).map(|_| rng.gen_range(1..=40)).collect();
    let capacity = (weights.iter().sum::<IntegerType>() / 3).max(1);
    Instance::single_from_sequences(capacity, &weights, &values).expect("valid instance")
}

fn brute_force(instance: &Instance<IntegerType>) -> IntegerType {
    let n = instance.num_items();
    (0u32..(1 << n))
        .filter_map(|mask| {
            let selection: Vec<ItemIndex> = (0..n)
                .filter(|i| mask & (1 << i) != 0)
                .map(ItemIndex::new)
                .collect();
            let (w, v, value) = instance.selection_totals(&selection);
            instance.fits(w, v).then_some(value)
        })
        .max()
        .unwrap_or(0)
}

/// Runs every strategy in every configuration and returns the solutions.
fn solve_all(instance: &Instance<IntegerType>) -> Vec<(&'static str, Solution<IntegerType>)> {
    let dp_full = DpSolver::new()
        .solve(instance)
        .expect("fits the budget")
        .into_solution()
        .expect("completed");
    let dp_rolling = DpSolver::new()
        .with_layout(TableLayout::Rolling)
        .solve(instance)
        .expect("fits the budget")
        .into_solution()
        .expect("completed");
    let bnb = BnbSolver::new()
        .solve(instance)
        .into_solution()
        .expect("completed");
    let bt = BacktrackingSolver::new()
        .solve(instance)
        .into_solution()
        .expect("completed");
    let bt_summed = BacktrackingSolver::with_bound(RemainingValueBound::Recomputed)
        .solve(instance)
        .into_solution()
        .expect("completed");

    vec![
        ("dp-full", dp_full),
        ("dp-rolling", dp_rolling),
        ("bnb", bnb),
        ("backtracking", bt),
        ("backtracking-summed", bt_summed),
    ]
}

fn check_solution(instance: &Instance<IntegerType>, name: &str, solution: &Solution<IntegerType>) {
    assert!(
        instance.is_feasible(solution.selected()),
        "{name} returned an infeasible selection on {instance}"
    );
    assert!(
        solution.selected().windows(2).all(|w| w[0] < w[1]),
        "{name} returned an unsorted selection"
    );
    let (_, _, value) = instance.selection_totals(solution.selected());
    assert_eq!(value, solution.value(), "{name} misreports its selection's value");
    assert!(solution.value() <= instance.total_value());
}

#[test]
fn test_all_solvers_agree_with_brute_force_on_dual_instances() {
    let mut rng = StdRng::seed_from_u64(0x5EED_0001);
    for round in 0..60 {
        let n = rng.gen_range(0..=12);
        let instance = random_dual(&mut rng, n);
        let expected = brute_force(&instance);
        for (name, solution) in solve_all(&instance) {
            check_solution(&instance, name, &solution);
            assert_eq!(solution.value(), expected, "{name} in round {round} on {instance}");
        }
    }
}

#[test]
fn test_all_solvers_agree_with_brute_force_on_single_instances() {
    let mut rng = StdRng::seed_from_u64(0x5EED_0002);
    for round in 0..60 {
        let n = rng.gen_range(0..=12);
        let instance = random_single(&mut rng, n);
        let expected = brute_force(&instance);
        for (name, solution) in solve_all(&instance) {
            check_solution(&instance, name, &solution);
            assert_eq!(solution.value(), expected, "{name} in round {round}");
        }
    }
}

#[test]
fn test_agreement_on_larger_instances() {
    let mut rng = StdRng::seed_from_u64(0x5EED_0003);
    for _ in 0..5 {
        let instance = random_dual(&mut rng, 20);
        let solutions = solve_all(&instance);
        let value = solutions[0].1.value();
        for (name, solution) in &solutions {
            check_solution(&instance, name, solution);
            assert_eq!(solution.value(), value, "{name} disagrees");
        }
    }
}

#[test]
fn test_dp_layouts_select_identical_items() {
    let mut rng = StdRng::seed_from_u64(0x5EED_0004);
    for _ in 0..40 {
        let n = rng.gen_range(1..=15);
        let instance = random_dual(&mut rng, n);
        let solutions = solve_all(&instance);
        assert_eq!(solutions[0].1, solutions[1].1);
    }
}

#[test]
fn test_value_never_exceeds_root_relaxation() {
    let mut rng = StdRng::seed_from_u64(0x5EED_0005);
    for _ in 0..40 {
        let n = rng.gen_range(1..=12);
        let instance = random_dual(&mut rng, n);
        let ranked = instance.ranked_items();
        let root = RelaxationBound::new(&instance, ranked.items()).root();
        let value = BnbSolver::new()
            .solve(&instance)
            .into_solution()
            .expect("completed")
            .value();
        assert!(value <= root, "{value} exceeds root bound {root}");
    }
}

#[test]
fn test_optimum_is_monotone_in_both_capacities() {
    let mut rng = StdRng::seed_from_u64(0x5EED_0006);
    let weights: Vec<IntegerType> = (0..10).map(|_| rng.gen_range(1..=15)).collect();
    let volumes: Vec<IntegerType> = (0..10).map(|_| rng.gen_range(1..=15)).collect();
    let values: Vec<IntegerType> = (0..10).map(|_| rng.gen_range(1..=30)).collect();

    let optimum = |w: IntegerType, v: IntegerType| {
        let instance = Instance::from_sequences(w, v, &weights, &volumes, &values)
            .expect("valid instance");
        BnbSolver::new()
            .solve(&instance)
            .into_solution()
            .expect("completed")
            .value()
    };

    for w in (5..=60).step_by(5) {
        for v in (5..=60).step_by(5) {
            let here = optimum(w, v);
            assert!(optimum(w + 5, v) >= here);
            assert!(optimum(w, v + 5) >= here);
        }
    }
}

#[test]
fn test_repeated_solves_are_identical() {
    let mut rng = StdRng::seed_from_u64(0x5EED_0007);
    let instance = random_dual(&mut rng, 14);
    assert_eq!(solve_all(&instance), solve_all(&instance));
}

#[test]
fn test_trivial_instances() {
    // Everything fits: the optimum takes every item.
    let roomy = Instance::<IntegerType>::from_sequences(
        1000,
        1000,
        &[3, 5, 7, 9],
        &[2, 4, 6, 8],
        &[10, 20, 30, 40],
    )
    .expect("valid instance");
    for (name, solution) in solve_all(&roomy) {
        assert_eq!(solution.value(), 100, "{name}");
        assert_eq!(solution.num_selected(), 4, "{name}");
    }

    // Nothing fits: the optimum is empty.
    let cramped =
        Instance::<IntegerType>::from_sequences(2, 2, &[3, 5], &[1, 1], &[10, 20])
            .expect("valid instance");
    for (name, solution) in solve_all(&cramped) {
        assert_eq!(solution.value(), 0, "{name}");
        assert!(solution.selected().is_empty(), "{name}");
    }

    // A single item filling both capacities exactly is taken whole.
    let exact =
        Instance::<IntegerType>::from_sequences(7, 9, &[7], &[9], &[42]).expect("valid instance");
    for (name, solution) in solve_all(&exact) {
        assert_eq!(solution.value(), 42, "{name}");
        assert_eq!(solution.selected_positions(), vec![0], "{name}");
    }

    let exact_single = Instance::<IntegerType>::single_from_sequences(13, &[13], &[5])
        .expect("valid instance");
    for (name, solution) in solve_all(&exact_single) {
        assert_eq!(solution.value(), 5, "{name}");
        assert_eq!(solution.selected_positions(), vec![0], "{name}");
    }
}

#[test]
fn test_agreement_with_values_beyond_f64_precision() {
    // Values share a large power of two and differ only in bits an `f64`
    // drops, so bounds and ratios must be exact to find the optimum.
    let mut rng = StdRng::seed_from_u64(0x5EED_0009);
    let base: IntegerType = 1 << 58;
    for round in 0..40 {
        let n = rng.gen_range(1..=10);
        let weights: Vec<IntegerType> = (0..n).map(|_| rng.gen_range(1..=6)).collect();
        let volumes: Vec<IntegerType> = (0..n).map(|_| rng.gen_range(1..=6)).collect();
        let values: Vec<IntegerType> = (0..n).map(|_| base + rng.gen_range(0..=255)).collect();
        let w_cap = (weights.iter().sum::<IntegerType>() / 2).max(1);
        let v_cap = (volumes.iter().sum::<IntegerType>() / 2).max(1);
        let instance = Instance::from_sequences(w_cap, v_cap, &weights, &volumes, &values)
            .expect("valid instance");

        let expected = brute_force(&instance);
        let solutions = solve_all(&instance);
        assert_eq!(solutions[0].1.value(), expected, "dp-full in round {round}");
        for (name, solution) in &solutions {
            check_solution(&instance, name, solution);
            assert_eq!(solution.value(), expected, "{name} in round {round} on {instance}");
        }
    }
}

#[test]
fn test_reference_scenarios() {
    let dual = Instance::<IntegerType>::from_sequences(
        50,
        60,
        &[10, 20, 30],
        &[20, 25, 30],
        &[60, 100, 120],
    )
    .expect("valid instance");
    for (name, solution) in solve_all(&dual) {
        assert_eq!(solution.value(), 220, "{name}");
        assert_eq!(solution.selected_positions(), vec![0, 1], "{name}");
    }

    let single =
        Instance::<IntegerType>::single_from_sequences(50, &[10, 20, 30], &[60, 100, 120])
            .expect("valid instance");
    for (name, solution) in solve_all(&single) {
        assert_eq!(solution.value(), 220, "{name}");
        assert_eq!(solution.selected_positions(), vec![1, 2], "{name}");
    }
}
