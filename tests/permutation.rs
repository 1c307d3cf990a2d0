use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use netprox::{
    annotate_fdr, closest_distance, influence, permutation_test, permutation_test_with,
    random_walk_with_restart, DegreeBins, Graph, Network, PermutationConfig, RwrConfig, Tail,
    TestRecord, TransitionMatrix,
};

/// Preferential-attachment network with string labels; heavy-tailed degrees
/// make the degree-matched null model do real work.
fn ba_network(n: usize, m: usize, seed: u64) -> Network {
    assert!(n >= m + 1);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut edges: Vec<(String, String)> = Vec::new();
    let mut targets: Vec<usize> = Vec::new(); // ids repeated by degree

    let init = m + 1;
    for i in 0..init {
        for j in (i + 1)..init {
            edges.push((format!("G{i}"), format!("G{j}")));
            targets.push(i);
            targets.push(j);
        }
    }
    for v in init..n {
        let mut chosen: Vec<usize> = Vec::with_capacity(m);
        while chosen.len() < m {
            let u = targets[rng.random_range(0..targets.len())];
            if u != v && !chosen.contains(&u) {
                chosen.push(u);
            }
        }
        for &u in &chosen {
            edges.push((format!("G{v}"), format!("G{u}")));
            targets.push(u);
            targets.push(v);
        }
    }
    Network::from_edges(edges)
}

fn setup() -> (Network, Vec<usize>, Vec<usize>) {
    let g = ba_network(120, 3, 11).largest_connected_component();
    assert!(g.is_connected());
    let targets = g.members(&["G5", "G17", "G40", "G71"]);
    let disease = g.members(&["G2", "G9", "G33", "G55", "G88"]);
    assert_eq!(targets.len(), 4);
    assert_eq!(disease.len(), 5);
    (g, targets, disease)
}

#[test]
fn same_base_seed_gives_bit_identical_results() {
    let (g, targets, disease) = setup();
    let observed = closest_distance(&g, &targets, &disease).unwrap();
    let cfg = PermutationConfig { trials: 80, base_seed: 42, ..Default::default() };

    let a = permutation_test(&g, &targets, observed, &cfg, |s| closest_distance(&g, s, &disease));
    let b = permutation_test(&g, &targets, observed, &cfg, |s| closest_distance(&g, s, &disease));

    assert_eq!(a.null, b.null, "null distributions must be bit-identical");
    assert_eq!(a.z_score.to_bits(), b.z_score.to_bits());
    assert_eq!(a.p_value.to_bits(), b.p_value.to_bits());
}

#[test]
fn different_base_seed_gives_a_different_null() {
    let (g, targets, disease) = setup();
    let observed = closest_distance(&g, &targets, &disease).unwrap();
    let a = permutation_test(
        &g,
        &targets,
        observed,
        &PermutationConfig { trials: 50, base_seed: 1, ..Default::default() },
        |s| closest_distance(&g, s, &disease),
    );
    let b = permutation_test(
        &g,
        &targets,
        observed,
        &PermutationConfig { trials: 50, base_seed: 2, ..Default::default() },
        |s| closest_distance(&g, s, &disease),
    );
    assert_ne!(a.null, b.null);
}

#[test]
fn null_samples_are_degree_matched_and_clean() {
    let (g, targets, disease) = setup();
    let target_mean_degree: f64 =
        targets.iter().map(|&t| g.degree(t) as f64).sum::<f64>() / targets.len() as f64;

    let sampled_degrees: std::cell::RefCell<Vec<f64>> = std::cell::RefCell::new(Vec::new());
    let cfg = PermutationConfig { trials: 100, degree_tolerance: 0.25, ..Default::default() };
    let summary = permutation_test(&g, &targets, 1.0, &cfg, |s| {
        assert_eq!(s.len(), targets.len());
        let mut d = s.to_vec();
        d.sort_unstable();
        d.dedup();
        assert_eq!(d.len(), s.len(), "duplicate node in a trial");
        assert!(s.iter().all(|x| !targets.contains(x)), "target leaked into its own null");
        let mut degrees = sampled_degrees.borrow_mut();
        for &node in s {
            degrees.push(g.degree(node) as f64);
        }
        closest_distance(&g, s, &disease)
    });

    assert_eq!(summary.null.len(), 100);
    let sampled_degrees = sampled_degrees.into_inner();
    let sampled_mean = sampled_degrees.iter().sum::<f64>() / sampled_degrees.len() as f64;
    // Matched mean, loosely: same order of magnitude, not hub-vs-leaf.
    assert!(
        (sampled_mean - target_mean_degree).abs() <= 0.5 * target_mean_degree,
        "sampled mean degree {sampled_mean} vs target mean {target_mean_degree}"
    );
}

#[test]
fn empirical_p_is_in_unit_interval_for_both_metrics() {
    let (g, targets, disease) = setup();
    let w = TransitionMatrix::standard(&g).unwrap();
    let rwr_cfg = RwrConfig::default();

    let observed_dc = closest_distance(&g, &targets, &disease).unwrap();
    let proximity = permutation_test(
        &g,
        &targets,
        observed_dc,
        &PermutationConfig { trials: 60, tail: Tail::Less, ..Default::default() },
        |s| closest_distance(&g, s, &disease),
    );

    let observed_influence = {
        let scores = random_walk_with_restart(&w, &targets, rwr_cfg);
        influence(&scores, &disease)
    };
    let diffusion = permutation_test(
        &g,
        &targets,
        observed_influence,
        &PermutationConfig { trials: 60, tail: Tail::Greater, ..Default::default() },
        |s| {
            let scores = random_walk_with_restart(&w, s, rwr_cfg);
            Some(influence(&scores, &disease))
        },
    );

    for summary in [&proximity, &diffusion] {
        assert!(summary.p_value > 0.0 && summary.p_value <= 1.0, "p={}", summary.p_value);
        assert!(!summary.null.is_empty());
        assert!(summary.z_score.is_finite());
    }
}

#[test]
fn binned_sampler_plugs_into_the_driver() {
    let (g, targets, disease) = setup();
    let bins = DegreeBins::new(&g, 10);
    let observed = closest_distance(&g, &targets, &disease).unwrap();
    let cfg = PermutationConfig { trials: 40, base_seed: 5, ..Default::default() };

    let a = permutation_test_with(observed, &cfg, |rng| bins.sample(&targets, rng), |s| {
        closest_distance(&g, s, &disease)
    });
    let b = permutation_test_with(observed, &cfg, |rng| bins.sample(&targets, rng), |s| {
        closest_distance(&g, s, &disease)
    });
    assert_eq!(a.null, b.null);
    assert!(a.p_value > 0.0 && a.p_value <= 1.0);
}

#[test]
fn batch_records_get_fdr_annotated() {
    let (g, targets, disease) = setup();
    let w = TransitionMatrix::standard(&g).unwrap();
    let observed_dc = closest_distance(&g, &targets, &disease).unwrap();

    let mut records = Vec::new();
    for (compound, base_seed) in [("Hyperforin", 42u64), ("Quercetin", 43u64)] {
        let cfg = PermutationConfig { trials: 50, base_seed, tail: Tail::Less, ..Default::default() };
        let summary =
            permutation_test(&g, &targets, observed_dc, &cfg, |s| closest_distance(&g, s, &disease));
        records.push(TestRecord::new(compound, "shortest_path_dc", "700", targets.len(), &summary));

        let scores = random_walk_with_restart(&w, &targets, RwrConfig::default());
        let obs_inf = influence(&scores, &disease);
        let cfg = PermutationConfig { trials: 50, base_seed, tail: Tail::Greater, ..Default::default() };
        let summary = permutation_test(&g, &targets, obs_inf, &cfg, |s| {
            let scores = random_walk_with_restart(&w, s, RwrConfig::default());
            Some(influence(&scores, &disease))
        });
        records.push(TestRecord::new(compound, "rwr_influence", "700", targets.len(), &summary));
    }

    annotate_fdr(&mut records);
    for r in &records {
        assert!(r.p_fdr >= r.p_value, "{}/{}: p_fdr < p", r.compound, r.metric);
        assert!(r.p_fdr <= 1.0);
        assert_eq!(r.significant, r.p_fdr < netprox::SIGNIFICANCE_LEVEL);
    }
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_driver_matches_sequential() {
    let (g, targets, disease) = setup();
    let observed = closest_distance(&g, &targets, &disease).unwrap();
    let cfg = PermutationConfig { trials: 60, ..Default::default() };

    let sequential =
        permutation_test(&g, &targets, observed, &cfg, |s| closest_distance(&g, s, &disease));
    let parallel = netprox::permutation_test_parallel(&g, &targets, observed, &cfg, |s| {
        closest_distance(&g, s, &disease)
    });
    assert_eq!(sequential.null, parallel.null);
    assert_eq!(sequential.p_value.to_bits(), parallel.p_value.to_bits());
}
