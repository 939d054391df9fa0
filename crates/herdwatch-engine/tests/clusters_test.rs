//! Tests for outbreak clustering.

use herdwatch_core::errors::SurveillanceError;
use herdwatch_engine::clusters::OutbreakClusterer;

fn clusterer(names: &[&str]) -> OutbreakClusterer {
    OutbreakClusterer::with_locations(names.iter().copied()).unwrap()
}

#[test]
fn test_new_locations_are_singletons() {
    let mut clusters = clusterer(&["Maroua", "Mora", "Mindif"]);
    assert_eq!(clusters.cluster_count(), 3);
    assert_eq!(clusters.find("Mora").unwrap(), "Mora");
    assert_eq!(clusters.cluster_size("Mora").unwrap(), 1);
    assert!(!clusters.connected("Maroua", "Mora").unwrap());
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut clusters = clusterer(&["Maroua"]);
    match clusters.add_location("Maroua") {
        Err(SurveillanceError::AlreadyExists { name }) => assert_eq!(name, "Maroua"),
        other => panic!("expected AlreadyExists, got {other:?}"),
    }
    assert!(OutbreakClusterer::with_locations(["A", "B", "A"]).is_err());
}

#[test]
fn test_untracked_names_are_not_found() {
    let mut clusters = clusterer(&["A"]);
    assert!(matches!(
        clusters.find("Z"),
        Err(SurveillanceError::NotFound { .. })
    ));
    assert!(clusters.union("A", "Z").is_err());
    assert!(clusters.connected("Z", "A").is_err());
    assert!(clusters.cluster_of("Z").is_err());
    assert!(clusters.cluster_size("Z").is_err());
}

#[test]
fn test_union_is_transitive() {
    let mut clusters = clusterer(&["A", "B", "C", "D"]);
    assert!(clusters.union("A", "B").unwrap());
    assert!(clusters.union("B", "C").unwrap());
    assert!(clusters.connected("A", "C").unwrap());
    assert!(!clusters.connected("A", "D").unwrap());
    assert_eq!(clusters.cluster_count(), 2);
}

#[test]
fn test_repeated_union_is_noop() {
    let mut clusters = clusterer(&["A", "B"]);
    assert!(clusters.union("A", "B").unwrap());
    let count = clusters.cluster_count();
    assert!(!clusters.union("B", "A").unwrap());
    assert!(!clusters.union("A", "B").unwrap());
    assert_eq!(clusters.cluster_count(), count);
    assert_eq!(clusters.cluster_size("A").unwrap(), 2);
}

#[test]
fn test_tie_attaches_first_root_under_second() {
    let mut clusters = clusterer(&["A", "B"]);
    let merge = clusters.merge("A", "B").unwrap().unwrap();
    assert_eq!(merge.surviving_root, "B");
    assert_eq!(merge.absorbed_root, "A");
    assert_eq!(merge.size, 2);
    assert_eq!(clusters.find("A").unwrap(), "B");
}

#[test]
fn test_higher_rank_root_survives() {
    let mut clusters = clusterer(&["A", "B", "C"]);
    clusters.union("A", "B").unwrap(); // B has rank 1
    let merge = clusters.merge("B", "C").unwrap().unwrap();
    assert_eq!(merge.surviving_root, "B");
    assert_eq!(clusters.find("C").unwrap(), "B");
}

#[test]
fn test_cluster_of_matches_size() {
    let mut clusters = clusterer(&["A", "B", "C", "D", "E"]);
    clusters.union("A", "B").unwrap();
    clusters.union("C", "D").unwrap();
    clusters.union("B", "D").unwrap();

    let members = clusters.cluster_of("C").unwrap();
    assert_eq!(
        members.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["A", "B", "C", "D"]
    );
    for name in ["A", "B", "C", "D", "E"] {
        assert_eq!(
            clusters.cluster_size(name).unwrap(),
            clusters.cluster_of(name).unwrap().len()
        );
    }
    clusters.check_invariants().unwrap();
}

#[test]
fn test_all_clusters_ordered_by_smallest_member() {
    let mut clusters = clusterer(&["Tibati", "Bamenda", "Mbé", "Dschang", "Edea"]);
    clusters.union("Tibati", "Mbé").unwrap();
    clusters.union("Dschang", "Bamenda").unwrap();

    let all = clusters.all_clusters();
    let firsts: Vec<&str> = all
        .iter()
        .map(|c| c.members.iter().next().unwrap().as_str())
        .collect();
    assert_eq!(firsts, vec!["Bamenda", "Edea", "Mbé"]);
    assert_eq!(all.iter().map(|c| c.size()).sum::<usize>(), 5);
}

#[test]
fn test_long_chain_stays_consistent() {
    let names: Vec<String> = (0..2_000).map(|i| format!("village-{i}")).collect();
    let mut clusters = OutbreakClusterer::with_locations(&names).unwrap();
    for pair in names.windows(2) {
        clusters.union(&pair[0], &pair[1]).unwrap();
    }
    assert_eq!(clusters.cluster_count(), 1);
    assert_eq!(clusters.cluster_size("village-0").unwrap(), 2_000);
    assert!(clusters.connected("village-0", "village-1999").unwrap());
    clusters.check_invariants().unwrap();
}
