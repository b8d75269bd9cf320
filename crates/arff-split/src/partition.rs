//! Index-level two-way partitioning.
//!
//! Everything here works on row positions so the dataset layer only has to
//! gather rows afterwards.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Row positions on each side of one cut.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    pub kept: Vec<usize>,
    pub held_out: Vec<usize>,
}

/// Number of rows held out of `n` for a fraction: `ceil(fraction * n)`.
///
/// A small tolerance keeps products like `0.4 * 15` from rounding up past
/// the exact value.
pub fn held_out_size(n: usize, fraction: f64) -> usize {
    let exact = fraction * n as f64;
    let size = (exact - 1e-9).ceil().max(0.0) as usize;
    size.min(n)
}

/// Ordered cut: the first rows are kept, the tail is held out.
pub fn ordered_partition(n: usize, fraction: f64) -> Partition {
    let held = held_out_size(n, fraction);
    Partition {
        kept: (0..n - held).collect(),
        held_out: (n - held..n).collect(),
    }
}

/// Uniform seeded shuffle, then cut. The head of the permutation is held out.
pub fn shuffled_partition(n: usize, fraction: f64, seed: u64) -> Partition {
    let held = held_out_size(n, fraction);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);
    let kept = order.split_off(held);
    Partition {
        kept,
        held_out: order,
    }
}

/// Seeded cut that holds out the same share of every class.
///
/// `labels[i]` is the class of row `i`. Per-class held-out counts come from
/// [`allocate_held_out`]; rows within a class are chosen by shuffling.
pub fn stratified_partition<L>(labels: &[L], fraction: f64, seed: u64) -> Partition
where
    L: Eq + std::hash::Hash,
{
    let n = labels.len();
    let held = held_out_size(n, fraction);
    let classes = group_by_class(labels);
    let counts: Vec<usize> = classes.iter().map(Vec::len).collect();
    let allocation = allocate_held_out(&counts, held);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut kept = Vec::with_capacity(n - held);
    let mut held_out = Vec::with_capacity(held);
    for (mut members, take) in classes.into_iter().zip(allocation) {
        members.shuffle(&mut rng);
        let rest = members.split_off(take);
        held_out.extend(members);
        kept.extend(rest);
    }
    // Interleave classes so neither side is grouped by label.
    held_out.shuffle(&mut rng);
    kept.shuffle(&mut rng);
    Partition { kept, held_out }
}

/// Row positions per class, classes in order of first appearance.
fn group_by_class<L>(labels: &[L]) -> Vec<Vec<usize>>
where
    L: Eq + std::hash::Hash,
{
    let mut index: HashMap<&L, usize> = HashMap::new();
    let mut classes: Vec<Vec<usize>> = Vec::new();
    for (row, label) in labels.iter().enumerate() {
        let slot = *index.entry(label).or_insert_with(|| {
            classes.push(Vec::new());
            classes.len() - 1
        });
        classes[slot].push(row);
    }
    classes
}

/// Split `total` held-out rows across classes in proportion to their size.
///
/// Largest-remainder rounding: every class gets the floor of its ideal
/// share, leftover rows go to the largest fractional remainders. Ties go to
/// the larger class, then to the class seen first. No class is given more
/// rows than it has.
pub fn allocate_held_out(counts: &[usize], total: usize) -> Vec<usize> {
    let n: usize = counts.iter().sum();
    if n == 0 {
        return vec![0; counts.len()];
    }
    let total = total.min(n);

    let mut allocation = Vec::with_capacity(counts.len());
    let mut remainders = Vec::with_capacity(counts.len());
    for (class, &count) in counts.iter().enumerate() {
        // Integer arithmetic keeps the floor exact.
        let scaled = count * total;
        allocation.push(scaled / n);
        remainders.push((scaled % n, count, class));
    }

    let mut leftover = total - allocation.iter().sum::<usize>();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2)));
    for &(_, count, class) in &remainders {
        if leftover == 0 {
            break;
        }
        if allocation[class] < count {
            allocation[class] += 1;
            leftover -= 1;
        }
    }
    allocation
}
