//! Depth-bounded path enumeration over the leg catalog.
//!
//! The enumerator walks the catalog depth-first with an explicit stack, so
//! recursion depth is never a concern, and yields every simple path (no
//! location repeated) from the source to the destination that uses at most
//! `max_legs` legs. Paths come out lazily: a consumer can stop early and the
//! remaining work is never done.
//!
//! Traversal order is deterministic. Legs leaving a location are tried in
//! catalog insertion order, and a path is yielded as soon as its last leg
//! reaches the destination (it is never extended past it).

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use chrono::TimeDelta;
use tracing::trace;

use crate::catalog::Catalog;
use crate::domain::{Leg, Location};

use super::config::SearchConfig;

/// How often (in examined legs) the deadline is polled.
const DEADLINE_POLL_INTERVAL: usize = 64;

/// Guards against dividing by a zero straight-line distance.
const DIRECT_DISTANCE_EPSILON_KM: f64 = 1e-6;

/// Distance and travel time pruning, resolved once per search.
#[derive(Debug, Clone, Copy)]
struct Pruning {
    direct_km: Option<f64>,
    max_detour_factor: Option<f64>,
    max_total_km: Option<f64>,
    max_total_duration: Option<TimeDelta>,
}

impl Pruning {
    fn resolve(
        catalog: &Catalog,
        source: &Location,
        destination: &Location,
        config: &SearchConfig,
    ) -> Self {
        Self {
            direct_km: catalog.direct_distance_km(source, destination),
            max_detour_factor: config.max_detour_factor,
            max_total_km: config.max_total_distance_km,
            max_total_duration: config.max_total_duration(),
        }
    }

    /// Check a path's known travelled distance against the limits.
    fn allows(&self, path_km: f64) -> bool {
        if let Some(max) = self.max_total_km {
            if path_km > max {
                return false;
            }
        }
        if let (Some(direct), Some(factor)) = (self.direct_km, self.max_detour_factor) {
            if path_km / (direct + DIRECT_DISTANCE_EPSILON_KM) > factor {
                return false;
            }
        }
        true
    }

    /// Check a path's summed travel time against the cap.
    fn allows_duration(&self, path: &[Arc<Leg>], leg: &Leg) -> bool {
        let Some(max) = self.max_total_duration else {
            return true;
        };
        path.iter()
            .try_fold(leg.duration(), |total, l| total.checked_add(&l.duration()))
            .is_some_and(|total| total <= max)
    }
}

/// One level of the DFS: a location and the next outgoing leg to try.
#[derive(Debug)]
struct Frame {
    at: Location,
    next: usize,
}

/// Lazily yields candidate paths from a source to a destination.
///
/// Each item is the ordered list of legs of one path. The source equal to
/// the destination yields exactly one empty path.
#[derive(Debug)]
pub struct PathEnumerator<'a> {
    catalog: &'a Catalog,
    destination: Location,
    max_legs: usize,
    pruning: Pruning,

    stack: Vec<Frame>,
    path: Vec<Arc<Leg>>,
    /// Locations on the current path, including the source.
    visited: HashSet<Location>,
    /// A path found during setup, yielded before traversal starts.
    pending: Option<Vec<Arc<Leg>>>,

    deadline: Option<Instant>,
    timed_out: bool,
    steps: usize,
}

impl<'a> PathEnumerator<'a> {
    fn empty(
        catalog: &'a Catalog,
        source: &Location,
        destination: &Location,
        config: &SearchConfig,
    ) -> Self {
        Self {
            catalog,
            destination: destination.clone(),
            max_legs: config.max_legs,
            pruning: Pruning::resolve(catalog, source, destination, config),
            stack: Vec::new(),
            path: Vec::new(),
            visited: HashSet::new(),
            pending: None,
            deadline: None,
            timed_out: false,
            steps: 0,
        }
    }

    /// Enumerate every path from `source` to `destination`.
    pub fn new(
        catalog: &'a Catalog,
        source: &Location,
        destination: &Location,
        config: &SearchConfig,
    ) -> Self {
        let mut enumerator = Self::empty(catalog, source, destination, config);

        if source == destination {
            enumerator.pending = Some(Vec::new());
        } else if config.max_legs > 0 {
            enumerator.visited.insert(source.clone());
            enumerator.stack.push(Frame {
                at: source.clone(),
                next: 0,
            });
        }

        enumerator
    }

    /// Enumerate only the paths that start with `first`.
    ///
    /// Running one branch per leg leaving the source, and concatenating the
    /// results in that leg order, yields the same paths as [`Self::new`].
    pub fn branch(
        catalog: &'a Catalog,
        first: Arc<Leg>,
        destination: &Location,
        config: &SearchConfig,
    ) -> Self {
        let source = first.source().clone();
        let mut enumerator = Self::empty(catalog, &source, destination, config);

        if &source == destination || config.max_legs == 0 {
            return enumerator;
        }

        enumerator.visited.insert(source);
        enumerator.steps = 1;
        if !enumerator.admits(&first) {
            return enumerator;
        }

        if first.destination() == destination {
            enumerator.pending = Some(vec![first]);
        } else if config.max_legs > 1 {
            enumerator.visited.insert(first.destination().clone());
            enumerator.stack.push(Frame {
                at: first.destination().clone(),
                next: 0,
            });
            enumerator.path.push(first);
        }

        enumerator
    }

    /// Stop yielding once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns true if enumeration stopped because the deadline passed.
    ///
    /// Paths yielded before that are a truncated set.
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Returns the number of legs examined so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Check whether `leg` may extend the current path.
    fn admits(&self, leg: &Leg) -> bool {
        if self.visited.contains(leg.destination()) {
            return false;
        }
        if !self.pruning.allows_duration(&self.path, leg) {
            return false;
        }

        // Distance limits only apply when every leg's distance is known
        let known_km = self
            .path
            .iter()
            .try_fold(0.0, |km, l| l.distance_km().map(|d| km + d))
            .and_then(|km| leg.distance_km().map(|d| km + d));

        match known_km {
            Some(km) => self.pruning.allows(km),
            None => true,
        }
    }

    fn deadline_passed(&self) -> bool {
        match self.deadline {
            Some(deadline) => {
                self.steps % DEADLINE_POLL_INTERVAL == 0 && Instant::now() >= deadline
            }
            None => false,
        }
    }
}

impl Iterator for PathEnumerator<'_> {
    type Item = Vec<Arc<Leg>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(found) = self.pending.take() {
            return Some(found);
        }

        let catalog = self.catalog;
        loop {
            if self.timed_out {
                return None;
            }
            if self.deadline_passed() {
                trace!(steps = self.steps, "deadline passed, abandoning traversal");
                self.timed_out = true;
                self.stack.clear();
                return None;
            }

            let depth = self.path.len();
            let frame = self.stack.last_mut()?;
            let outgoing = catalog.legs_from(&frame.at);

            let Some(leg) = outgoing.get(frame.next) else {
                // Exhausted this location: backtrack
                self.stack.pop();
                if let Some(leg) = self.path.pop() {
                    self.visited.remove(leg.destination());
                }
                continue;
            };
            frame.next += 1;
            self.steps += 1;

            if !self.admits(leg) {
                continue;
            }

            if leg.destination() == &self.destination {
                let mut found = Vec::with_capacity(depth + 1);
                found.extend(self.path.iter().cloned());
                found.push(Arc::clone(leg));
                return Some(found);
            }

            if depth + 1 < self.max_legs {
                trace!(
                    from = %leg.source(),
                    to = %leg.destination(),
                    depth = depth + 1,
                    "descending"
                );
                self.visited.insert(leg.destination().clone());
                self.stack.push(Frame {
                    at: leg.destination().clone(),
                    next: 0,
                });
                self.path.push(Arc::clone(leg));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogBuilder;
    use crate::domain::TransportMode::{Bus, Flight, Train};
    use std::time::Duration;

    fn loc(s: &str) -> Location {
        Location::parse(s).unwrap()
    }

    fn config(max_legs: usize) -> SearchConfig {
        SearchConfig::new(max_legs, 20, 2_000)
    }

    /// Render paths as "A>B>C" strings for compact assertions.
    fn render(paths: impl Iterator<Item = Vec<Arc<Leg>>>) -> Vec<String> {
        paths
            .map(|legs| {
                let mut stops: Vec<&str> = Vec::new();
                if let Some(first) = legs.first() {
                    stops.push(first.source().as_str());
                }
                stops.extend(legs.iter().map(|l| l.destination().as_str()));
                stops.join(">")
            })
            .collect::<Vec<_>>()
    }

    fn triangle() -> Catalog {
        CatalogBuilder::new()
            .leg("A", "B", Bus, 100, 60, true)
            .leg("B", "C", Train, 150, 90, true)
            .leg("A", "C", Flight, 300, 45, false)
            .build()
    }

    #[test]
    fn finds_direct_and_transfer_paths() {
        let catalog = triangle();
        let found = render(PathEnumerator::new(&catalog, &loc("A"), &loc("C"), &config(4)));

        assert_eq!(found, vec!["A>B>C", "A>C"]);
    }

    #[test]
    fn max_legs_bounds_path_length() {
        let catalog = triangle();

        let found = render(PathEnumerator::new(&catalog, &loc("A"), &loc("C"), &config(1)));
        assert_eq!(found, vec!["A>C"]);

        let found: Vec<_> = PathEnumerator::new(&catalog, &loc("A"), &loc("C"), &config(0)).collect();
        assert!(found.is_empty());
    }

    #[test]
    fn same_source_and_destination_yields_empty_path() {
        let catalog = triangle();
        let found: Vec<_> = PathEnumerator::new(&catalog, &loc("A"), &loc("A"), &config(4)).collect();

        assert_eq!(found.len(), 1);
        assert!(found[0].is_empty());
    }

    #[test]
    fn no_outgoing_legs_yields_nothing() {
        let catalog = triangle();
        let found: Vec<_> = PathEnumerator::new(&catalog, &loc("C"), &loc("A"), &config(4)).collect();
        assert!(found.is_empty());

        let found: Vec<_> = PathEnumerator::new(&catalog, &loc("X"), &loc("A"), &config(4)).collect();
        assert!(found.is_empty());
    }

    #[test]
    fn cycles_are_never_followed() {
        let catalog = CatalogBuilder::new()
            .leg("A", "B", Bus, 1, 1, true)
            .leg("B", "A", Bus, 1, 1, true)
            .leg("B", "C", Bus, 1, 1, true)
            .leg("C", "B", Bus, 1, 1, true)
            .leg("C", "D", Bus, 1, 1, true)
            .build();

        let found = render(PathEnumerator::new(&catalog, &loc("A"), &loc("D"), &config(10)));
        assert_eq!(found, vec!["A>B>C>D"]);
    }

    #[test]
    fn does_not_extend_past_destination() {
        let catalog = CatalogBuilder::new()
            .leg("A", "B", Bus, 1, 1, true)
            .leg("B", "C", Bus, 1, 1, true)
            .leg("B", "D", Bus, 1, 1, true)
            .build();

        let found = render(PathEnumerator::new(&catalog, &loc("A"), &loc("B"), &config(4)));
        assert_eq!(found, vec!["A>B"]);
    }

    #[test]
    fn parallel_legs_are_distinct_paths() {
        let catalog = CatalogBuilder::new()
            .leg("A", "B", Bus, 100, 60, true)
            .leg("A", "B", Train, 120, 45, true)
            .build();

        let found: Vec<_> = PathEnumerator::new(&catalog, &loc("A"), &loc("B"), &config(4)).collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0][0].mode(), Bus);
        assert_eq!(found[1][0].mode(), Train);
    }

    #[test]
    fn branches_concatenate_to_full_enumeration() {
        let catalog = crate::catalog::demo_catalog();
        let config = config(4);
        let (a, c) = (loc("A"), loc("C"));

        let full: Vec<_> = PathEnumerator::new(&catalog, &a, &c, &config).collect();
        let branched: Vec<_> = catalog
            .legs_from(&a)
            .iter()
            .flat_map(|first| {
                PathEnumerator::branch(&catalog, Arc::clone(first), &c, &config).collect::<Vec<_>>()
            })
            .collect();

        assert!(!full.is_empty());
        assert_eq!(full, branched);
    }

    #[test]
    fn past_deadline_times_out() {
        let catalog = triangle();
        let past = Instant::now() - Duration::from_millis(1);
        let mut enumerator =
            PathEnumerator::new(&catalog, &loc("A"), &loc("C"), &config(4)).with_deadline(past);

        assert!(enumerator.next().is_none());
        assert!(enumerator.timed_out());
    }

    #[test]
    fn future_deadline_does_not_interfere() {
        let catalog = triangle();
        let later = Instant::now() + Duration::from_secs(60);
        let mut enumerator =
            PathEnumerator::new(&catalog, &loc("A"), &loc("C"), &config(4)).with_deadline(later);

        assert_eq!(enumerator.by_ref().count(), 2);
        assert!(!enumerator.timed_out());
        assert!(enumerator.steps() >= 3);
    }

    fn geo_catalog() -> Catalog {
        // A and C are 100 km apart (0.9 degrees of latitude)
        CatalogBuilder::new()
            .site("A", "Alpha", 10.0, 0.0)
            .site("B", "Beta", 10.45, 0.5)
            .site("C", "Gamma", 10.9, 0.0)
            .site("D", "Delta", 12.0, 2.0)
            .leg_with_distance("A", "C", Bus, 50, 120, true, 105.0)
            .leg_with_distance("A", "B", Bus, 30, 60, true, 75.0)
            .leg_with_distance("B", "C", Bus, 30, 60, true, 75.0)
            .leg_with_distance("A", "D", Train, 80, 200, true, 300.0)
            .leg_with_distance("D", "C", Train, 80, 200, true, 250.0)
            .leg("A", "D", Flight, 500, 40, true)
            .build()
    }

    #[test]
    fn detour_factor_prunes_long_paths() {
        let catalog = geo_catalog();
        let mut config = config(4);

        let unpruned = render(PathEnumerator::new(&catalog, &loc("A"), &loc("C"), &config));
        assert_eq!(unpruned, vec!["A>C", "A>B>C", "A>D>C", "A>D>C"]);

        config.max_detour_factor = Some(2.0);
        let pruned = render(PathEnumerator::new(&catalog, &loc("A"), &loc("C"), &config));
        // The 300 km train to D is pruned at once. The flight has no
        // distance, so paths through it stay unknown and are kept
        assert_eq!(pruned, vec!["A>C", "A>B>C", "A>D>C"]);
    }

    #[test]
    fn total_distance_cap_prunes() {
        let catalog = geo_catalog();
        let mut config = config(4);
        config.max_total_distance_km = Some(140.0);

        let found = render(PathEnumerator::new(&catalog, &loc("A"), &loc("C"), &config));
        assert_eq!(found, vec!["A>C", "A>D>C"]);
    }

    #[test]
    fn total_duration_cap_prunes() {
        let catalog = geo_catalog();
        let mut config = config(4);

        // A>C takes 120, A>B>C 120, A>D>C 400 by train and 240 by flight
        config.max_total_duration_min = Some(120);
        let found = render(PathEnumerator::new(&catalog, &loc("A"), &loc("C"), &config));
        assert_eq!(found, vec!["A>C", "A>B>C"]);

        config.max_total_duration_min = Some(119);
        let found: Vec<_> = PathEnumerator::new(&catalog, &loc("A"), &loc("C"), &config).collect();
        assert!(found.is_empty());
    }

    #[test]
    fn duration_cap_applies_to_branches() {
        let catalog = geo_catalog();
        let mut config = config(4);
        config.max_total_duration_min = Some(250);
        let (a, c) = (loc("A"), loc("C"));

        let full = render(PathEnumerator::new(&catalog, &a, &c, &config));
        let branched = render(catalog.legs_from(&a).iter().flat_map(|first| {
            PathEnumerator::branch(&catalog, Arc::clone(first), &c, &config).collect::<Vec<_>>()
        }));

        assert_eq!(full, vec!["A>C", "A>B>C", "A>D>C"]);
        assert_eq!(full, branched);
    }

    #[test]
    fn detour_ignored_without_sites() {
        let catalog = CatalogBuilder::new()
            .leg_with_distance("A", "B", Bus, 1, 1, true, 1_000.0)
            .leg_with_distance("B", "C", Bus, 1, 1, true, 1_000.0)
            .build();
        let mut config = config(4);
        config.max_detour_factor = Some(1.1);

        let found = render(PathEnumerator::new(&catalog, &loc("A"), &loc("C"), &config));
        assert_eq!(found, vec!["A>B>C"]);
    }
}
