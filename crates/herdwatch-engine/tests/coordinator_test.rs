//! Tests for the surveillance coordinator.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use herdwatch_core::config::HerdwatchConfig;
use herdwatch_core::errors::SurveillanceError;
use herdwatch_core::events::types::{AlertRaisedEvent, LocationsLinkedEvent, RiskUpdatedEvent};
use herdwatch_core::events::{EventDispatcher, SurveillanceEventHandler};
use herdwatch_core::types::{PriorityLevel, Season};
use herdwatch_engine::clusters::OutbreakClusterer;
use herdwatch_engine::coordinator::{
    ReportRequest, ResponseAction, RouteResult, SurveillanceCoordinator,
};
use herdwatch_engine::routing::{RoutingGraph, SeasonalImpact};
use herdwatch_engine::triage::AlertTriage;
use rayon::prelude::*;

fn empty() -> SurveillanceCoordinator {
    SurveillanceCoordinator::new(
        RoutingGraph::new(),
        OutbreakClusterer::new(),
        AlertTriage::new(),
        EventDispatcher::new(),
    )
}

fn seeded() -> SurveillanceCoordinator {
    SurveillanceCoordinator::from_config(&HerdwatchConfig::default(), EventDispatcher::new())
        .unwrap()
}

#[derive(Default)]
struct Recorder {
    raised: Mutex<Vec<AlertRaisedEvent>>,
    linked: AtomicUsize,
    risk: AtomicUsize,
}

impl SurveillanceEventHandler for Recorder {
    fn on_alert_raised(&self, event: &AlertRaisedEvent) {
        self.raised.lock().unwrap().push(event.clone());
    }

    fn on_locations_linked(&self, _event: &LocationsLinkedEvent) {
        self.linked.fetch_add(1, Ordering::Relaxed);
    }

    fn on_risk_updated(&self, _event: &RiskUpdatedEvent) {
        self.risk.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn test_submit_classifies_by_final_priority() {
    let coordinator = empty();

    let anthrax = coordinator.submit_report("Anthrax", "B", "vet-1", None).unwrap();
    assert_eq!(anthrax.priority(), PriorityLevel::P1Critical);
    assert_eq!(anthrax.priority_level, 1);
    assert_eq!(anthrax.priority_name, "P1_CRITICAL");
    assert_eq!(anthrax.action_taken, ResponseAction::ImmediateResponseRequired);
    assert_eq!(anthrax.escalation_applied, 0);

    let rabies = coordinator.submit_report("rabies", "C", "vet-2", None).unwrap();
    assert_eq!(rabies.action_taken, ResponseAction::UrgentResponseScheduled);

    let worms = coordinator.submit_report("helminthosis", "D", "vet-3", Some(1)).unwrap();
    assert_eq!(worms.priority(), PriorityLevel::P5Info);
    assert_eq!(worms.action_taken, ResponseAction::QueuedForInvestigation);
    assert_eq!(worms.alert.details.mortality_count, Some(1));
}

#[test]
fn test_repeat_reports_escalate_to_floor() {
    let coordinator = empty();
    let tiers: Vec<(PriorityLevel, u32)> = (0..4)
        .map(|i| {
            let result = coordinator
                .submit_report("sheep pox", "Mora", &format!("vet-{i}"), None)
                .unwrap();
            (result.priority(), result.escalation_applied)
        })
        .collect();

    assert_eq!(
        tiers,
        vec![
            (PriorityLevel::P4Standard, 0),
            (PriorityLevel::P3Moderate, 1),
            (PriorityLevel::P2High, 2),
            (PriorityLevel::P1Critical, 3),
        ]
    );
    let fifth = coordinator.submit_report("Sheep Pox ", "Mora", "vet-9", None).unwrap();
    assert_eq!(fifth.priority(), PriorityLevel::P1Critical);
    assert_eq!(fifth.escalation_applied, 4);
}

#[test]
fn test_escalation_is_per_disease_and_cluster() {
    let coordinator = empty();
    coordinator.submit_report("rabies", "A", "r", None).unwrap();
    let other_disease = coordinator.submit_report("sheep pox", "A", "r", None).unwrap();
    let other_place = coordinator.submit_report("rabies", "Z", "r", None).unwrap();
    assert_eq!(other_disease.escalation_applied, 0);
    assert_eq!(other_place.escalation_applied, 0);
}

#[test]
fn test_padded_location_reuses_existing_cluster() {
    let coordinator = empty();
    coordinator.submit_report("rabies", "B", "r", None).unwrap();
    let padded = coordinator.submit_report(" rabies", "B ", " r2 ", None).unwrap();

    assert_eq!(padded.alert.location, "B");
    assert_eq!(padded.alert.reporter_id, "r2");
    assert_eq!(padded.escalation_applied, 1);
    assert_eq!(coordinator.cluster_count().unwrap(), 1);
    assert_eq!(coordinator.prior_reports("rabies", "B").unwrap(), 2);
}

#[test]
fn test_linked_locations_share_escalation() {
    let coordinator = empty();
    coordinator.submit_report("sheep pox", "A", "r", None).unwrap();
    coordinator.submit_report("sheep pox", "B", "r", None).unwrap();

    assert!(coordinator.connect_locations("A", "B").unwrap());
    assert_eq!(coordinator.prior_reports("sheep pox", "A").unwrap(), 2);

    let third = coordinator.submit_report("sheep pox", "B", "r", None).unwrap();
    assert_eq!(third.escalation_applied, 2);
    assert_eq!(third.priority(), PriorityLevel::P2High);
}

#[test]
fn test_connect_requires_tracked_locations() {
    let coordinator = empty();
    coordinator.submit_report("rabies", "A", "r", None).unwrap();
    assert!(matches!(
        coordinator.connect_locations("A", "Unseen"),
        Err(SurveillanceError::NotFound { .. })
    ));
    assert!(coordinator.connect_locations("A", " ").is_err());
}

#[test]
fn test_repeated_connect_is_noop() {
    let coordinator = seeded();
    let before = coordinator.cluster_count().unwrap();
    assert!(!coordinator.connect_locations("Tibati", "Mbé").unwrap());
    assert!(!coordinator.connect_locations("Mbé", "Tibati").unwrap());
    assert_eq!(coordinator.cluster_count().unwrap(), before);
}

#[test]
fn test_blank_report_fields_rejected() {
    let coordinator = empty();
    for (disease, location, reporter) in [("", "A", "r"), ("rabies", "  ", "r"), ("rabies", "A", "")] {
        assert!(matches!(
            coordinator.submit_report(disease, location, reporter, None),
            Err(SurveillanceError::Validation { .. })
        ));
    }
    assert_eq!(coordinator.pending_count().unwrap(), 0);
}

#[test]
fn test_next_alert_dispatches_most_urgent() {
    let coordinator = empty();
    coordinator.submit_report("helminthosis", "A", "r", None).unwrap();
    coordinator.submit_report("ebola", "B", "r", None).unwrap();
    coordinator.submit_report("newcastle disease", "C", "r", None).unwrap();

    let pending = coordinator.pending_alerts().unwrap();
    assert_eq!(pending.len(), 3);
    assert_eq!(pending[0].disease_name, "ebola");
    assert_eq!(coordinator.critical_alerts().unwrap().len(), 1);
    assert_eq!(coordinator.peek_alert().unwrap().unwrap().disease_name, "ebola");

    let dispatched = coordinator.next_alert().unwrap().unwrap();
    assert_eq!(dispatched.alert.disease_name, "ebola");
    assert_eq!(dispatched.action_taken, ResponseAction::DispatchedToFieldTeam);
    assert_eq!(coordinator.critical_count().unwrap(), 0);
    assert_eq!(coordinator.pending_count().unwrap(), 2);

    coordinator.next_alert().unwrap();
    coordinator.next_alert().unwrap();
    assert!(coordinator.next_alert().unwrap().is_none());
}

#[test]
fn test_detect_clusters_on_seed_network() {
    let coordinator = seeded();
    let clusters = coordinator.detect_clusters().unwrap();
    assert_eq!(clusters.len(), 8);

    assert_eq!(clusters[0].cluster_id, "CLUSTER-001");
    assert_eq!(
        clusters[0].members,
        vec!["Bafoussam", "Bamenda", "Dschang", "Yaoundé"]
    );
    assert_eq!(clusters[0].size, 4);

    let northern = clusters
        .iter()
        .find(|c| c.members.contains(&"Tibati".to_string()))
        .unwrap();
    assert_eq!(northern.cluster_id, "CLUSTER-006");
    assert_eq!(northern.size, 7);
    assert_eq!(clusters.iter().map(|c| c.size).sum::<usize>(), 17);
}

#[test]
fn test_cluster_queries() {
    let coordinator = seeded();
    assert!(coordinator.check_connected("Mora", "Ngaoundéré").unwrap());
    assert!(!coordinator.check_connected("Mora", "Edea").unwrap());
    assert_eq!(coordinator.cluster_size("Bamenda").unwrap(), 4);
    assert_eq!(
        coordinator.cluster_members("Edea").unwrap(),
        vec!["Edea".to_string()]
    );
    assert!(coordinator.cluster_size("Atlantis").is_err());
}

#[test]
fn test_risk_hook_reprices_routes() {
    let coordinator = empty();
    coordinator.register_location("S", "Centre", true, 0.0).unwrap();
    coordinator.add_corridor("S", "X", 10.0, true, "highway").unwrap();
    coordinator.add_corridor("X", "T", 10.0, true, "highway").unwrap();
    coordinator.add_corridor("S", "Y", 15.0, true, "highway").unwrap();
    coordinator.add_corridor("Y", "T", 15.0, true, "highway").unwrap();

    let before = coordinator.route("S", "T", Season::Dry).unwrap();
    assert_eq!(before.path, vec!["S", "X", "T"]);
    assert_eq!(before.num_stops, 2);

    assert!(coordinator.apply_risk_from_cluster("X", 100.0).unwrap());
    let after = coordinator.route("S", "T", Season::Dry).unwrap();
    assert_eq!(after.path, vec!["S", "Y", "T"]);
    assert!(after.reachable);

    assert!(!coordinator.apply_risk_from_cluster("Nowhere", 5.0).unwrap());
    let fastest = coordinator.fastest_route("S", "T").unwrap();
    assert_eq!(fastest.path, vec!["S", "X", "T"]);
}

#[test]
fn test_apply_risk_to_cluster() {
    let recorder = Arc::new(Recorder::default());
    let mut events = EventDispatcher::new();
    events.register(recorder.clone());
    let coordinator =
        SurveillanceCoordinator::from_config(&HerdwatchConfig::default(), events).unwrap();

    let updated = coordinator.apply_risk_to_cluster("Tibati", 40.0).unwrap();
    assert_eq!(updated.len(), 7);
    assert_eq!(recorder.risk.load(Ordering::Relaxed), 7);
    assert_eq!(coordinator.location_info("Mora").unwrap().unwrap().risk, 40.0);
    assert_eq!(coordinator.location_info("Garoua").unwrap().unwrap().risk, 0.0);

    let dry = coordinator.route("Ngaoundéré", "Tibati", Season::Dry).unwrap();
    assert_eq!(dry.total_weight, 120.0);
}

#[test]
fn test_route_errors_and_unreachable() {
    let coordinator = seeded();
    assert!(matches!(
        coordinator.route("Ngaoundéré", "Atlantis", Season::Wet),
        Err(SurveillanceError::NotFound { .. })
    ));
    // Edea has no outgoing corridors
    let result = coordinator.route("Edea", "Yaoundé", Season::Dry).unwrap();
    assert!(!result.reachable);
    assert!(result.path.is_empty());
    assert!(result.total_weight.is_infinite());
    assert_eq!(result.num_stops, 0);
}

#[test]
fn test_route_result_json_round_trip() {
    let coordinator = seeded();

    let unreachable = coordinator.route("Edea", "Yaoundé", Season::Dry).unwrap();
    let json = serde_json::to_string(&unreachable).unwrap();
    assert!(json.contains(r#""total_weight":null"#));
    let back: RouteResult = serde_json::from_str(&json).unwrap();
    assert!(back.total_weight.is_infinite());
    assert!(!back.reachable);
    assert_eq!(back.num_stops, 0);

    let reachable = coordinator.route("Ngaoundéré", "Maroua", Season::Wet).unwrap();
    let back: RouteResult =
        serde_json::from_str(&serde_json::to_string(&reachable).unwrap()).unwrap();
    assert_eq!(back.path, reachable.path);
    assert_eq!(back.total_weight, 375.0);
    assert_eq!(back.num_stops, reachable.path.len() - 1);

    let impact = coordinator.seasonal_impact("Edea", "Yaoundé").unwrap();
    let back: SeasonalImpact =
        serde_json::from_str(&serde_json::to_string(&impact).unwrap()).unwrap();
    assert!(back.dry.total_weight.is_infinite());
    assert!(back.wet.total_weight.is_infinite());
}

#[test]
fn test_seasonal_impact_through_coordinator() {
    let coordinator = seeded();
    let impact = coordinator.seasonal_impact("Ngaoundéré", "Maroua").unwrap();
    assert_eq!(impact.dry.total_weight, 150.0);
    assert_eq!(impact.wet.total_weight, 375.0);
    assert_eq!(impact.percent_increase, 150.0);
}

#[test]
fn test_events_emitted_for_submit_and_link() {
    let recorder = Arc::new(Recorder::default());
    let mut events = EventDispatcher::new();
    events.register(recorder.clone());
    let coordinator = SurveillanceCoordinator::new(
        RoutingGraph::new(),
        OutbreakClusterer::new(),
        AlertTriage::new(),
        events,
    );

    coordinator
        .submit(&ReportRequest::new("anthrax", "Tibati", "vet-4").with_mortality(3))
        .unwrap();
    coordinator.submit_report("anthrax", "Mbé", "vet-5", None).unwrap();
    coordinator.connect_locations("Tibati", "Mbé").unwrap();

    let raised = recorder.raised.lock().unwrap();
    assert_eq!(raised.len(), 2);
    assert_eq!(raised[0].cluster_root, "Tibati");
    assert_eq!(raised[0].mortality_count, Some(3));
    assert_eq!(recorder.linked.load(Ordering::Relaxed), 1);
}

#[test]
fn test_stats_and_health() {
    let coordinator = seeded();
    coordinator.submit_report("anthrax", "Kousseri", "r", None).unwrap();
    coordinator.submit_report("rabies", "Tiko", "r", None).unwrap();

    let stats = coordinator.stats().unwrap();
    assert_eq!(stats.location_count, 17);
    assert_eq!(stats.corridor_count, 25);
    assert_eq!(stats.station_count, 9);
    // Tiko is tracked by the clusterer only
    assert_eq!(stats.tracked_locations, 18);
    assert_eq!(stats.cluster_count, 9);
    assert_eq!(stats.pending_alerts, 2);
    assert_eq!(stats.critical_alerts, 1);
    assert_eq!(stats.reports_submitted, 2);

    let health = coordinator.health().unwrap();
    assert!(health.healthy);
    assert!(health.network_loaded);
    assert!(health.issues.is_empty());
    assert_eq!(health.station_count, 9);
    coordinator.check_invariants().unwrap();

    assert_eq!(coordinator.stations().unwrap().len(), 9);
    assert!(!coordinator.locations().unwrap().contains(&"Tiko".to_string()));
}

#[test]
fn test_concurrent_submissions_never_lose_escalation() {
    let coordinator = empty();
    let mut escalations: Vec<u32> = (0..200)
        .into_par_iter()
        .map(|i| {
            coordinator
                .submit_report("sheep pox", "Maga", &format!("vet-{i}"), None)
                .unwrap()
                .escalation_applied
        })
        .collect();
    escalations.sort_unstable();

    assert_eq!(escalations, (0..200).collect::<Vec<u32>>());
    assert_eq!(coordinator.pending_count().unwrap(), 200);
    coordinator.check_invariants().unwrap();
}

#[test]
fn test_concurrent_routes_and_risk_updates() {
    let coordinator = seeded();
    (0..64).into_par_iter().for_each(|i| {
        if i % 8 == 0 {
            coordinator
                .apply_risk_from_cluster("Maroua", f64::from(i))
                .unwrap();
        } else {
            let route = coordinator.route("Garoua", "Logone Floodplain", Season::Wet).unwrap();
            assert_eq!(route.path, vec!["Garoua", "Maroua", "Logone Floodplain"]);
        }
    });
}
