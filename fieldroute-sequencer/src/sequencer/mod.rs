//! `RouteSequencer`: orders stops from a depot and draws the path through them.
//!
//! A remote trip request decides the order when it can. Otherwise the greedy
//! nearest-neighbour heuristic orders the stops and each leg is routed on its
//! own, degrading to a straight line when the service gives no usable answer.

use std::iter;

use fieldroute_core::{
    GeoPoint, OrderingStrategy, RouteDiagnostics, RouteLeg, RouteResult, RoutingService,
    SequenceRequest, Stop, StopId, TripPlan, meters_to_km,
};
use futures::future::join_all;

use crate::assemble::{AssembledPath, PathAssembler};
use crate::heuristic::nearest_neighbour_order;
use crate::trip::stop_order;

/// Configuration for [`RouteSequencer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerConfig {
    /// Issue per-leg route requests concurrently instead of one after another.
    ///
    /// The assembled route is the same either way.
    pub concurrent_legs: bool,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            concurrent_legs: true,
        }
    }
}

/// Sequences stops through a [`RoutingService`], falling back to local
/// heuristics whenever the service fails.
///
/// Sequencing never fails: every service error is logged and absorbed.
///
/// # Examples
/// ```
/// use fieldroute_core::{GeoPoint, OrderingStrategy, Stop};
/// use fieldroute_core::test_support::UnavailableRoutingService;
/// use fieldroute_sequencer::RouteSequencer;
///
/// let sequencer = RouteSequencer::new(UnavailableRoutingService);
/// let stops = vec![
///     Stop::at("far", GeoPoint::new(0.0, 2.0)),
///     Stop::at("near", GeoPoint::new(0.0, 1.0)),
/// ];
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let route = runtime.block_on(sequencer.sequence(GeoPoint::new(0.0, 0.0), &stops, None));
///
/// let ids: Vec<_> = route.stop_ids().map(|id| id.as_str()).collect();
/// assert_eq!(ids, ["near", "far"]);
/// assert_eq!(route.diagnostics.ordering, OrderingStrategy::NearestNeighbour);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct RouteSequencer<S>
where
    S: RoutingService,
{
    service: S,
    config: SequencerConfig,
}

impl<S> RouteSequencer<S>
where
    S: RoutingService,
{
    /// Construct a sequencer using default configuration.
    pub fn new(service: S) -> Self {
        Self::with_config(service, SequencerConfig::default())
    }

    /// Construct a sequencer with explicit configuration.
    pub const fn with_config(service: S, config: SequencerConfig) -> Self {
        Self { service, config }
    }

    /// The routing service backing this sequencer.
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// The active configuration.
    pub const fn config(&self) -> SequencerConfig {
        self.config
    }

    /// Order `stops` starting from `depot` and build the path through them.
    ///
    /// - An invalid depot yields [`RouteResult::empty`].
    /// - Stops with non-finite coordinates are dropped.
    /// - `pinned_stop_id`, when it names a valid stop, is visited first; an
    ///   unknown pin is ignored. With duplicate identifiers the first valid
    ///   match is pinned.
    pub async fn sequence(
        &self,
        depot: GeoPoint,
        stops: &[Stop],
        pinned_stop_id: Option<&StopId>,
    ) -> RouteResult {
        if !depot.is_valid() {
            log::debug!("depot has non-finite coordinates; returning an empty route");
            return RouteResult::empty();
        }

        let mut valid: Vec<Stop> = stops
            .iter()
            .filter(|stop| stop.location.is_valid())
            .cloned()
            .collect();
        let dropped = stops.len().saturating_sub(valid.len());
        if dropped > 0 {
            log::debug!("dropped {dropped} stops with non-finite coordinates");
        }

        let Some(pin) = pinned_stop_id else {
            return self.sequence_open(depot, valid).await;
        };
        match valid.iter().position(|stop| &stop.id == pin) {
            Some(position) => {
                let pinned = valid.remove(position);
                self.sequence_pinned(depot, pinned, valid).await
            }
            None => {
                log::debug!("pinned stop {pin} is not among the valid stops; ignoring it");
                self.sequence_open(depot, valid).await
            }
        }
    }

    /// Sequence a decoded [`SequenceRequest`].
    pub async fn sequence_request(&self, request: &SequenceRequest) -> RouteResult {
        self.sequence(request.depot, &request.stops, request.pinned_stop_id.as_ref())
            .await
    }

    async fn sequence_pinned(&self, depot: GeoPoint, pinned: Stop, rest: Vec<Stop>) -> RouteResult {
        let first_leg = self.route_leg(depot, pinned.location);
        let onward = self.sequence_open(pinned.location, rest);
        let (leg, sub_route) = if self.config.concurrent_legs {
            futures::join!(first_leg, onward)
        } else {
            (first_leg.await, onward.await)
        };

        let RouteResult {
            ordered_stops,
            path,
            total_distance_km,
            diagnostics,
        } = sub_route;
        let mut assembler = PathAssembler::starting_at(depot);
        assembler.push_leg(pinned.location, leg);
        assembler.append(AssembledPath {
            path,
            distance_km: total_distance_km,
            straight_line_legs: diagnostics.straight_line_legs,
        });
        let assembled = assembler.finish();

        RouteResult::new(
            iter::once(pinned).chain(ordered_stops).collect(),
            assembled.path,
            assembled.distance_km,
            RouteDiagnostics {
                ordering: diagnostics.ordering,
                straight_line_legs: assembled.straight_line_legs,
            },
        )
    }

    async fn sequence_open(&self, origin: GeoPoint, stops: Vec<Stop>) -> RouteResult {
        if stops.is_empty() {
            return RouteResult::at_depot(origin);
        }

        if let Some((order, plan)) = self.remote_trip(origin, &stops).await {
            log::debug!("ordered {} stops with the remote trip service", order.len());
            return RouteResult::new(
                reorder(stops, &order),
                plan.geometry,
                meters_to_km(plan.distance_meters),
                RouteDiagnostics {
                    ordering: OrderingStrategy::RemoteTrip,
                    straight_line_legs: 0,
                },
            );
        }

        log::debug!("ordering {} stops by nearest neighbour", stops.len());
        let order = nearest_neighbour_order(origin, &stops);
        let ordered = reorder(stops, &order);
        let assembled = self.connect(origin, &ordered).await;
        RouteResult::new(
            ordered,
            assembled.path,
            assembled.distance_km,
            RouteDiagnostics {
                ordering: OrderingStrategy::NearestNeighbour,
                straight_line_legs: assembled.straight_line_legs,
            },
        )
    }

    /// One trip request over `[origin, ...stops]`, validated before use.
    async fn remote_trip(&self, origin: GeoPoint, stops: &[Stop]) -> Option<(Vec<usize>, TripPlan)> {
        let points: Vec<GeoPoint> = iter::once(origin)
            .chain(stops.iter().map(|stop| stop.location))
            .collect();
        let plan = self
            .service
            .trip(&points)
            .await
            .inspect_err(|err| {
                log::warn!("trip request failed; falling back to nearest neighbour: {err}");
            })
            .ok()?;
        stop_order(&plan, stops.len())
            .inspect_err(|rejection| {
                log::warn!("trip response rejected; falling back to nearest neighbour: {rejection}");
            })
            .ok()
            .map(|order| (order, plan))
    }

    async fn route_leg(&self, from: GeoPoint, to: GeoPoint) -> Option<RouteLeg> {
        self.service
            .route(from, to)
            .await
            .inspect_err(|err| {
                log::debug!(
                    "leg to ({}, {}) not routed; drawing a straight line: {err}",
                    to.latitude,
                    to.longitude
                );
            })
            .ok()
    }

    /// Route every leg of `origin -> ordered[0] -> ordered[1] -> ...`.
    async fn connect(&self, origin: GeoPoint, ordered: &[Stop]) -> AssembledPath {
        let waypoints: Vec<GeoPoint> = iter::once(origin)
            .chain(ordered.iter().map(|stop| stop.location))
            .collect();
        let pairs = waypoints.windows(2).filter_map(|pair| match pair {
            [from, to] => Some((*from, *to)),
            _ => None,
        });

        let legs: Vec<Option<RouteLeg>> = if self.config.concurrent_legs {
            join_all(pairs.map(|(from, to)| self.route_leg(from, to))).await
        } else {
            let mut sequential = Vec::with_capacity(ordered.len());
            for (from, to) in pairs {
                sequential.push(self.route_leg(from, to).await);
            }
            sequential
        };

        let mut assembler = PathAssembler::starting_at(origin);
        for (stop, leg) in ordered.iter().zip(legs) {
            assembler.push_leg(stop.location, leg);
        }
        assembler.finish()
    }
}

/// Move `stops` into the visiting order given by `order`.
fn reorder(stops: Vec<Stop>, order: &[usize]) -> Vec<Stop> {
    let mut slots: Vec<Option<Stop>> = stops.into_iter().map(Some).collect();
    order
        .iter()
        .filter_map(|&index| slots.get_mut(index).and_then(Option::take))
        .collect()
}
