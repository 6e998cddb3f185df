//! Metric-bounded neighbourhoods on a digital surface
//!
//! The enumerator walks surface adjacency best-first: candidates sit in a
//! min-heap keyed by their distance to the embedded centre, ties broken by
//! discovery order. A surfel is reported and expanded only while its distance
//! stays within the radius; the first candidate popped beyond it ends the
//! walk.
//!
//! Stopping there assumes that anything reachable only through far surfels is
//! itself far. This holds for the usual metrics on well-sampled surfaces and
//! is what keeps enumeration local.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use ordered_float::OrderedFloat;
use surfel_core::{DigitalSurface, Error, Metric, Result, SurfelEmbedder, DEFAULT_MAX_VISITED};
use tracing::{debug, trace, warn};

/// A reported neighbour and its distance to the centre
#[derive(Clone, Debug, PartialEq)]
pub struct NeighborEntry<S> {
    pub surfel: S,
    pub distance: f64,
}

/// Surfels within a radius of a centre, nearest first
#[derive(Clone, Debug)]
pub struct Neighborhood<S> {
    entries: Vec<NeighborEntry<S>>,
    radius: f64,
    truncated: bool,
}

impl<S> Neighborhood<S> {
    /// Entries in enumeration order (non-decreasing distance)
    #[inline]
    pub fn entries(&self) -> &[NeighborEntry<S>] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Radius the neighbourhood was enumerated with
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// `true` if enumeration stopped on the visit cap
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The centre surfel (always first)
    pub fn center(&self) -> Option<&S> {
        self.entries.first().map(|e| &e.surfel)
    }

    pub fn surfels(&self) -> impl Iterator<Item = &S> + '_ {
        self.entries.iter().map(|e| &e.surfel)
    }

    pub fn distances(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.distance)
    }

    /// Largest reported distance; 0 for the degenerate `{center}`
    pub fn max_distance(&self) -> f64 {
        self.entries.last().map_or(0.0, |e| e.distance)
    }

    pub fn into_entries(self) -> Vec<NeighborEntry<S>> {
        self.entries
    }
}

impl<S: PartialEq> Neighborhood<S> {
    pub fn contains(&self, surfel: &S) -> bool {
        self.entries.iter().any(|e| &e.surfel == surfel)
    }
}

impl<'n, S> IntoIterator for &'n Neighborhood<S> {
    type Item = &'n NeighborEntry<S>;
    type IntoIter = std::slice::Iter<'n, NeighborEntry<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Heap entry ordered so that `BinaryHeap` pops the nearest, earliest first
struct Candidate<S> {
    distance: OrderedFloat<f64>,
    sequence: usize,
    surfel: S,
}

impl<S> PartialEq for Candidate<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for Candidate<S> {}

impl<S> PartialOrd for Candidate<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Candidate<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Enumerates surfels around a centre, in increasing metric distance
///
/// Holds only shared references; every call to [`enumerate`] starts from
/// scratch, so one enumerator can serve concurrent callers.
///
/// [`enumerate`]: NeighborhoodEnumerator::enumerate
pub struct NeighborhoodEnumerator<'a, Surf, M, E> {
    surface: &'a Surf,
    metric: &'a M,
    embedder: &'a E,
    max_visited: usize,
}

impl<'a, Surf, M, E> NeighborhoodEnumerator<'a, Surf, M, E>
where
    Surf: DigitalSurface,
{
    pub fn new(surface: &'a Surf, metric: &'a M, embedder: &'a E) -> Self {
        Self {
            surface,
            metric,
            embedder,
            max_visited: DEFAULT_MAX_VISITED,
        }
    }

    /// Cap on the number of reported surfels (at least 1)
    pub fn with_max_visited(mut self, max_visited: usize) -> Self {
        self.max_visited = max_visited.max(1);
        self
    }

    pub fn max_visited(&self) -> usize {
        self.max_visited
    }

    /// Surfels within `radius` of `center`, centre first.
    ///
    /// `radius` must be finite and non-negative.
    pub fn enumerate<const N: usize>(
        &self,
        center: &Surf::Surfel,
        radius: f64,
    ) -> Result<Neighborhood<Surf::Surfel>>
    where
        M: Metric<N>,
        E: SurfelEmbedder<Surf::Surfel, N>,
    {
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "neighbourhood radius {radius} must be finite and non-negative"
            )));
        }

        let origin = self.embedder.embed(center);
        let mut heap = BinaryHeap::new();
        let mut visited = HashSet::new();
        let mut entries = Vec::new();
        let mut scratch = Vec::new();
        let mut sequence = 0;
        let mut truncated = false;

        visited.insert(center.clone());
        heap.push(Candidate {
            distance: OrderedFloat(0.0),
            sequence,
            surfel: center.clone(),
        });

        while let Some(Candidate {
            distance, surfel, ..
        }) = heap.pop()
        {
            if distance.0 > radius || distance.0.is_nan() {
                break;
            }
            if entries.len() == self.max_visited {
                warn!(
                    "Neighbourhood enumeration hit the cap of {} surfels at radius {}",
                    self.max_visited, radius
                );
                truncated = true;
                break;
            }

            scratch.clear();
            self.surface.write_neighbors(&surfel, &mut scratch);
            for next in scratch.drain(..) {
                if visited.insert(next.clone()) {
                    sequence += 1;
                    let d = self.metric.distance(&origin, &self.embedder.embed(&next));
                    trace!("Discovered {:?} at distance {}", next, d);
                    heap.push(Candidate {
                        distance: OrderedFloat(d),
                        sequence,
                        surfel: next,
                    });
                }
            }

            entries.push(NeighborEntry {
                surfel,
                distance: distance.0,
            });
        }

        debug!(
            "Enumerated {} surfels within radius {} ({} discovered)",
            entries.len(),
            radius,
            visited.len()
        );

        Ok(Neighborhood {
            entries,
            radius,
            truncated,
        })
    }
}
