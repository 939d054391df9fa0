//! SurveillanceCoordinator: report submission, escalation, risk propagation.

use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use herdwatch_core::config::HerdwatchConfig;
use herdwatch_core::constants::CLUSTER_ID_PREFIX;
use herdwatch_core::errors::{SurveillanceError, SurveillanceResult};
use herdwatch_core::events::types::{
    AlertDispatchedEvent, AlertRaisedEvent, LocationRegisteredEvent, LocationsLinkedEvent,
    RiskUpdatedEvent,
};
use herdwatch_core::events::EventDispatcher;
use herdwatch_core::types::Season;
use tracing::{debug, info};

use super::escalation::EscalationCounter;
use super::results::{
    AlertResult, ClusterReport, DispatchResult, HealthReport, ResponseAction, RouteResult,
    ServiceStats,
};
use super::validation::{require_non_blank, ReportRequest};
use crate::clusters::OutbreakClusterer;
use crate::routing::{CorridorWeighting, LocationInfo, RoutingGraph, SeasonalImpact};
use crate::seed::SeedNetwork;
use crate::triage::{AlertDetails, AlertItem, AlertTriage, SeverityTable};

/// Everything a report submission touches, behind one lock.
#[derive(Debug)]
struct CoordinatorState {
    clusterer: OutbreakClusterer,
    triage: AlertTriage,
    escalation: EscalationCounter,
    reports_submitted: u64,
}

/// Orchestrates the routing graph, outbreak clusterer and alert triage.
///
/// Lock order is always state, then graph. Events are emitted only after
/// every guard has been released, so handlers may call back in.
pub struct SurveillanceCoordinator {
    state: Mutex<CoordinatorState>,
    graph: RwLock<RoutingGraph>,
    events: EventDispatcher,
    consider_risk: bool,
}

impl SurveillanceCoordinator {
    pub fn new(
        graph: RoutingGraph,
        clusterer: OutbreakClusterer,
        triage: AlertTriage,
        events: EventDispatcher,
    ) -> Self {
        Self {
            state: Mutex::new(CoordinatorState {
                clusterer,
                triage,
                escalation: EscalationCounter::new(),
                reports_submitted: 0,
            }),
            graph: RwLock::new(graph),
            events,
            consider_risk: true,
        }
    }

    /// Whether route queries add destination risk. Default: true.
    pub fn with_consider_risk(mut self, consider_risk: bool) -> Self {
        self.consider_risk = consider_risk;
        self
    }

    /// Build every structure from config and apply the configured seed network.
    pub fn from_config(
        config: &HerdwatchConfig,
        events: EventDispatcher,
    ) -> SurveillanceResult<Self> {
        HerdwatchConfig::validate(config)?;

        let weighting = CorridorWeighting::from_config(&config.routing)?;
        let mut graph = RoutingGraph::with_weighting(weighting);
        let mut clusterer = OutbreakClusterer::new();
        SeedNetwork::from_config(&config.seed)?.apply(&mut graph, &mut clusterer)?;

        let triage = AlertTriage::with_severity(SeverityTable::from_config(&config.triage)?);
        Ok(Self::new(graph, clusterer, triage, events)
            .with_consider_risk(config.routing.effective_consider_risk()))
    }

    fn state(&self) -> SurveillanceResult<MutexGuard<'_, CoordinatorState>> {
        self.state
            .lock()
            .map_err(|e| SurveillanceError::Concurrency(format!("coordinator state: {e}")))
    }

    fn graph_read(&self) -> SurveillanceResult<RwLockReadGuard<'_, RoutingGraph>> {
        self.graph
            .read()
            .map_err(|e| SurveillanceError::Concurrency(format!("routing graph: {e}")))
    }

    fn graph_write(&self) -> SurveillanceResult<RwLockWriteGuard<'_, RoutingGraph>> {
        self.graph
            .write()
            .map_err(|e| SurveillanceError::Concurrency(format!("routing graph: {e}")))
    }

    // ---- Reports and triage -------------------------------------------------

    /// Submit a field report.
    ///
    /// Cluster lookup, the escalation read-and-increment and the triage push
    /// happen under one lock, so concurrent submissions never lose or
    /// double-count an escalation.
    pub fn submit_report(
        &self,
        disease_name: &str,
        location: &str,
        reporter_id: &str,
        mortality_count: Option<u32>,
    ) -> SurveillanceResult<AlertResult> {
        let request = ReportRequest {
            disease_name: disease_name.to_string(),
            location: location.to_string(),
            reporter_id: reporter_id.to_string(),
            mortality_count,
        };
        self.submit(&request)
    }

    pub fn submit(&self, request: &ReportRequest) -> SurveillanceResult<AlertResult> {
        request.validate()?;
        let request = request.trimmed();

        let (alert, registered) = {
            let mut state = self.state()?;

            let registered = if state.clusterer.contains(&request.location) {
                false
            } else {
                state.clusterer.add_location(&request.location)?;
                true
            };
            let root = state.clusterer.find(&request.location)?;
            let escalation = state.escalation.record(&request.disease_name, &root);

            let alert = state.triage.push(
                &request.disease_name,
                &request.location,
                &request.reporter_id,
                escalation,
                AlertDetails {
                    mortality_count: request.mortality_count,
                    cluster_root: Some(root),
                },
            );
            state.reports_submitted += 1;
            (alert, registered)
        };

        debug!(
            disease = %alert.disease_name,
            location = %alert.location,
            reporter = %alert.reporter_id,
            "report submitted"
        );
        if alert.escalation_applied > 0 {
            info!(
                disease = %alert.disease_name,
                location = %alert.location,
                escalation = alert.escalation_applied,
                priority = %alert.priority,
                "cluster escalation applied"
            );
        }

        if registered {
            self.events.emit_location_registered(&LocationRegisteredEvent {
                location: alert.location.clone(),
            });
        }
        self.events.emit_alert_raised(&AlertRaisedEvent {
            sequence: alert.sequence,
            disease_name: alert.disease_name.clone(),
            location: alert.location.clone(),
            reporter_id: alert.reporter_id.clone(),
            priority: alert.priority,
            escalation_applied: alert.escalation_applied,
            cluster_root: alert.details.cluster_root.clone().unwrap_or_default(),
            mortality_count: alert.details.mortality_count,
            raised_at: alert.timestamp,
        });

        Ok(AlertResult::from_alert(alert))
    }

    /// Remove the most urgent alert and hand it to a field team.
    pub fn next_alert(&self) -> SurveillanceResult<Option<DispatchResult>> {
        let alert = self.state()?.triage.pop_highest_priority();
        let Some(alert) = alert else {
            return Ok(None);
        };

        info!(
            sequence = alert.sequence,
            disease = %alert.disease_name,
            location = %alert.location,
            priority = %alert.priority,
            "alert dispatched"
        );
        self.events.emit_alert_dispatched(&AlertDispatchedEvent {
            sequence: alert.sequence,
            disease_name: alert.disease_name.clone(),
            location: alert.location.clone(),
            priority: alert.priority,
        });
        Ok(Some(DispatchResult {
            alert,
            action_taken: ResponseAction::DispatchedToFieldTeam,
        }))
    }

    pub fn peek_alert(&self) -> SurveillanceResult<Option<AlertItem>> {
        Ok(self.state()?.triage.peek().cloned())
    }

    pub fn pending_alerts(&self) -> SurveillanceResult<Vec<AlertItem>> {
        Ok(self.state()?.triage.all_pending_sorted_by_priority())
    }

    pub fn critical_alerts(&self) -> SurveillanceResult<Vec<AlertItem>> {
        Ok(self.state()?.triage.critical_alerts())
    }

    pub fn pending_count(&self) -> SurveillanceResult<usize> {
        Ok(self.state()?.triage.pending_count())
    }

    pub fn critical_count(&self) -> SurveillanceResult<usize> {
        Ok(self.state()?.triage.critical_count())
    }

    /// Prior reports recorded for `disease` in `location`'s current cluster.
    pub fn prior_reports(&self, disease_name: &str, location: &str) -> SurveillanceResult<u32> {
        let mut state = self.state()?;
        let root = state.clusterer.find(location)?;
        Ok(state.escalation.prior_reports(disease_name, &root))
    }

    // ---- Clusters -----------------------------------------------------------

    /// Declare an epidemiological link between two tracked locations.
    ///
    /// On a real merge the escalation history of the absorbed cluster moves
    /// to the surviving root.
    pub fn connect_locations(&self, a: &str, b: &str) -> SurveillanceResult<bool> {
        require_non_blank("location_a", a)?;
        require_non_blank("location_b", b)?;

        let outcome = {
            let mut state = self.state()?;
            let outcome = state.clusterer.merge(a, b)?;
            if let Some(merge) = &outcome {
                state
                    .escalation
                    .fold_cluster(&merge.absorbed_root, &merge.surviving_root);
            }
            outcome
        };

        let Some(merge) = outcome else {
            return Ok(false);
        };
        self.events.emit_locations_linked(&LocationsLinkedEvent {
            location_a: a.to_string(),
            location_b: b.to_string(),
            surviving_root: merge.surviving_root,
            cluster_size: merge.size,
        });
        Ok(true)
    }

    pub fn check_connected(&self, a: &str, b: &str) -> SurveillanceResult<bool> {
        self.state()?.clusterer.connected(a, b)
    }

    /// Members of `location`'s cluster, sorted.
    pub fn cluster_members(&self, location: &str) -> SurveillanceResult<Vec<String>> {
        Ok(self
            .state()?
            .clusterer
            .cluster_of(location)?
            .into_iter()
            .collect())
    }

    pub fn cluster_size(&self, location: &str) -> SurveillanceResult<usize> {
        self.state()?.clusterer.cluster_size(location)
    }

    pub fn cluster_count(&self) -> SurveillanceResult<usize> {
        Ok(self.state()?.clusterer.cluster_count())
    }

    /// Every current cluster, numbered from `CLUSTER-001` in order of smallest
    /// member name.
    pub fn detect_clusters(&self) -> SurveillanceResult<Vec<ClusterReport>> {
        let clusters = self.state()?.clusterer.all_clusters();
        Ok(clusters
            .into_iter()
            .enumerate()
            .map(|(i, cluster)| ClusterReport {
                cluster_id: format!("{CLUSTER_ID_PREFIX}-{:03}", i + 1),
                root: cluster.root,
                size: cluster.members.len(),
                members: cluster.members.into_iter().collect(),
            })
            .collect())
    }

    // ---- Risk propagation ---------------------------------------------------

    /// Push a risk score from cluster detection into routing. Unknown
    /// locations are ignored; returns whether the graph changed.
    pub fn apply_risk_from_cluster(&self, location: &str, risk: f64) -> SurveillanceResult<bool> {
        let updated = self.graph_write()?.update_risk(location, risk)?;
        if updated {
            self.events.emit_risk_updated(&RiskUpdatedEvent {
                location: location.to_string(),
                risk,
            });
        }
        Ok(updated)
    }

    /// Apply `risk` to every graph location in `location`'s cluster.
    /// Returns the names that were updated.
    pub fn apply_risk_to_cluster(
        &self,
        location: &str,
        risk: f64,
    ) -> SurveillanceResult<Vec<String>> {
        let updated = {
            let mut state = self.state()?;
            let members = state.clusterer.cluster_of(location)?;
            let mut graph = self.graph_write()?;

            let mut updated = Vec::new();
            for member in members {
                if graph.update_risk(&member, risk)? {
                    updated.push(member);
                }
            }
            updated
        };

        info!(location, risk, updated = updated.len(), "risk applied to cluster");
        for member in &updated {
            self.events.emit_risk_updated(&RiskUpdatedEvent {
                location: member.clone(),
                risk,
            });
        }
        Ok(updated)
    }

    // ---- Network ------------------------------------------------------------

    /// Add a location to the graph and start tracking it as a singleton
    /// cluster. Existing entries are left untouched.
    pub fn register_location(
        &self,
        name: &str,
        region: &str,
        is_station: bool,
        initial_risk: f64,
    ) -> SurveillanceResult<bool> {
        require_non_blank("name", name)?;
        require_non_blank("region", region)?;

        let registered = {
            let mut state = self.state()?;
            self.graph_write()?
                .add_location(name, region, is_station, initial_risk)?;
            if state.clusterer.contains(name) {
                false
            } else {
                state.clusterer.add_location(name)?;
                true
            }
        };

        if registered {
            self.events.emit_location_registered(&LocationRegisteredEvent {
                location: name.to_string(),
            });
        }
        Ok(registered)
    }

    pub fn add_corridor(
        &self,
        origin: &str,
        destination: &str,
        distance: f64,
        is_paved: bool,
        track_type: &str,
    ) -> SurveillanceResult<()> {
        require_non_blank("origin", origin)?;
        require_non_blank("destination", destination)?;
        self.graph_write()?
            .add_corridor(origin, destination, distance, is_paved, track_type)?;
        Ok(())
    }

    pub fn locations(&self) -> SurveillanceResult<Vec<String>> {
        Ok(self.graph_read()?.locations())
    }

    pub fn stations(&self) -> SurveillanceResult<Vec<String>> {
        Ok(self.graph_read()?.stations())
    }

    pub fn location_info(&self, name: &str) -> SurveillanceResult<Option<LocationInfo>> {
        Ok(self.graph_read()?.location_info(name).cloned())
    }

    // ---- Routing ------------------------------------------------------------

    pub fn route(&self, start: &str, end: &str, season: Season) -> SurveillanceResult<RouteResult> {
        self.route_with_risk(start, end, season, self.consider_risk)
    }

    pub fn route_with_risk(
        &self,
        start: &str,
        end: &str,
        season: Season,
        consider_risk: bool,
    ) -> SurveillanceResult<RouteResult> {
        let route = self
            .graph_read()?
            .shortest_safe_route(start, end, season, consider_risk)?;
        debug!(start, end, %season, reachable = route.is_reachable(), "route computed");
        Ok(RouteResult::from_route(route, season))
    }

    pub fn fastest_route(&self, start: &str, end: &str) -> SurveillanceResult<RouteResult> {
        let route = self.graph_read()?.fastest_route(start, end)?;
        Ok(RouteResult::from_route(route, Season::Dry))
    }

    pub fn seasonal_impact(&self, start: &str, end: &str) -> SurveillanceResult<SeasonalImpact> {
        self.graph_read()?
            .seasonal_impact(start, end, self.consider_risk)
    }

    // ---- Introspection ------------------------------------------------------

    pub fn stats(&self) -> SurveillanceResult<ServiceStats> {
        let state = self.state()?;
        let graph = self.graph_read()?;
        Ok(ServiceStats {
            location_count: graph.location_count(),
            corridor_count: graph.corridor_count(),
            station_count: graph.stations().len(),
            tracked_locations: state.clusterer.len(),
            cluster_count: state.clusterer.cluster_count(),
            pending_alerts: state.triage.pending_count(),
            critical_alerts: state.triage.critical_count(),
            reports_submitted: state.reports_submitted,
        })
    }

    /// Run every internal consistency check.
    pub fn health(&self) -> SurveillanceResult<HealthReport> {
        let mut state = self.state()?;
        let graph = self.graph_read()?;

        let mut issues = Vec::new();
        let clusters_ok = match state.clusterer.check_invariants() {
            Ok(()) => true,
            Err(e) => {
                issues.push(e.to_string());
                false
            }
        };
        let triage_ok = match state.triage.check_invariants() {
            Ok(()) => true,
            Err(e) => {
                issues.push(e.to_string());
                false
            }
        };

        Ok(HealthReport {
            healthy: clusters_ok && triage_ok,
            network_loaded: graph.location_count() > 0,
            clusters_ok,
            triage_ok,
            station_count: graph.stations().len(),
            issues,
            checked_at: Utc::now(),
        })
    }

    /// Fail with `Invariant` if any structure is inconsistent.
    pub fn check_invariants(&self) -> SurveillanceResult<()> {
        let mut state = self.state()?;
        state.clusterer.check_invariants()?;
        state.triage.check_invariants()
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }
}
