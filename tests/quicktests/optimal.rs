use optbst::{build_with_cost, InvalidInput, Tree};

use crate::Distribution;

/// Builds the tree for a distribution, which is always valid input.
fn build_tree(d: &Distribution) -> (Tree<i32, String>, f64) {
    build_with_cost(d.keys(), d.values(), &d.key_probs(), &d.miss_probs()).unwrap()
}

/// The cheapest cost of any tree over keys `lo..hi` whose root sits at
/// `depth`, found by trying every shape.
fn brute_force_cost(p: &[f64], q: &[f64], lo: usize, hi: usize, depth: f64) -> f64 {
    if lo == hi {
        return q[lo] * depth;
    }

    (lo..hi)
        .map(|r| {
            p[r] * depth
                + brute_force_cost(p, q, lo, r, depth + 1.0)
                + brute_force_cost(p, q, r + 1, hi, depth + 1.0)
        })
        .fold(f64::INFINITY, f64::min)
}

/// The cost of the cheapest tree over keys `lo..hi`, measured from its own
/// root. Pushing a tree down a level adds its total probability.
fn relative_cost(p: &[f64], q: &[f64], lo: usize, hi: usize) -> f64 {
    if lo == hi {
        return q[lo];
    }

    let total: f64 = p[lo..hi].iter().chain(&q[lo..=hi]).sum();
    (lo..hi)
        .map(|r| total + relative_cost(p, q, lo, r) + relative_cost(p, q, r + 1, hi))
        .fold(f64::INFINITY, f64::min)
}

/// The pre-order keys of the cheapest tree over `lo..hi`, picking the
/// smallest root whenever several are equally cheap. `None` marks a leaf.
fn expected_shape(p: &[f64], q: &[f64], lo: usize, hi: usize) -> Vec<Option<i32>> {
    if lo == hi {
        return vec![None];
    }

    let cost_with_root =
        |r: usize| relative_cost(p, q, lo, r) + relative_cost(p, q, r + 1, hi);
    let best = (lo..hi)
        .map(cost_with_root)
        .fold(f64::INFINITY, f64::min);
    let root = (lo..hi)
        .find(|&r| cost_with_root(r) == best)
        .expect("non-empty range has a root");

    let mut shape = vec![Some(root as i32 * 2)];
    shape.extend(expected_shape(p, q, lo, root));
    shape.extend(expected_shape(p, q, root + 1, hi));
    shape
}

fn pre_order(tree: &Tree<i32, String>) -> Vec<Option<i32>> {
    match tree.node() {
        None => vec![None],
        Some(n) => {
            let mut keys = vec![Some(*n.key())];
            keys.extend(pre_order(n.left()));
            keys.extend(pre_order(n.right()));
            keys
        }
    }
}

#[quickcheck]
fn cost_is_minimal(d: Distribution) -> bool {
    let (_tree, cost) = build_tree(&d);
    let (p, q) = (d.key_probs(), d.miss_probs());

    (cost - brute_force_cost(&p, &q, 0, p.len(), 1.0)).abs() < 1e-9
}

#[quickcheck]
fn cost_matches_tree(d: Distribution) -> bool {
    let (tree, cost) = build_tree(&d);

    tree.weighted_path_length(&d.key_probs(), &d.miss_probs()) == Ok(cost)
}

#[quickcheck]
fn ties_pick_smallest_root(d: Distribution) -> bool {
    let (tree, _cost) = build_tree(&d);
    let (p, q) = (d.key_probs(), d.miss_probs());

    pre_order(&tree) == expected_shape(&p, &q, 0, p.len())
}

#[quickcheck]
fn contains(d: Distribution) -> bool {
    let (tree, _cost) = build_tree(&d);

    d.keys()
        .iter()
        .zip(d.values())
        .all(|(k, v)| tree.find(k) == Some(&v))
}

#[quickcheck]
fn contains_not(d: Distribution, nots: Vec<i32>) -> bool {
    let (tree, _cost) = build_tree(&d);
    let keys = d.keys();

    nots.iter()
        .filter(|x| !keys.contains(*x))
        .all(|x| tree.find(x).is_none() && !tree.contains_key(x))
}

#[quickcheck]
fn iterates_in_order(d: Distribution) -> bool {
    let (tree, _cost) = build_tree(&d);
    let expected: Vec<(i32, String)> = d.keys().into_iter().zip(d.values()).collect();
    let collect = |tree: &Tree<i32, String>| {
        tree.iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect::<Vec<_>>()
    };

    // A second pass starts from the beginning again.
    collect(&tree) == expected && collect(&tree) == expected
}

#[quickcheck]
fn deterministic(d: Distribution) -> bool {
    build_tree(&d).0 == build_tree(&d).0
}

#[quickcheck]
fn rejects_scaled_probabilities(d: Distribution) -> bool {
    let halve = |probs: Vec<f64>| probs.into_iter().map(|p| p / 2.0).collect::<Vec<_>>();
    let result = build_with_cost(
        d.keys(),
        d.values(),
        &halve(d.key_probs()),
        &halve(d.miss_probs()),
    );

    result == Err(InvalidInput::ProbabilityTotal { total: 0.5 })
}
