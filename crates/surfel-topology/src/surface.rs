//! Surface ownership and traversal helpers

use std::collections::{HashSet, VecDeque};
use std::fmt;

use surfel_core::traits::DigitalSurface as SurfaceContainer;

/// Lazy breadth-first walk over the connected component of `start`
///
/// Every surfel is yielded once. Traversal state lives in the iterator, so a
/// new walk is just a new value; the surface is only read.
pub struct BreadthFirstTraversal<'a, S: SurfaceContainer + ?Sized> {
    surface: &'a S,
    queue: VecDeque<S::Surfel>,
    visited: HashSet<S::Surfel>,
    scratch: Vec<S::Surfel>,
}

impl<'a, S: SurfaceContainer + ?Sized> BreadthFirstTraversal<'a, S> {
    pub fn new(surface: &'a S, start: S::Surfel) -> Self {
        let mut visited = HashSet::new();
        visited.insert(start.clone());
        let mut queue = VecDeque::new();
        queue.push_back(start);
        Self {
            surface,
            queue,
            visited,
            scratch: Vec::new(),
        }
    }

    /// Surfels discovered so far, yielded or still queued
    pub fn discovered(&self) -> usize {
        self.visited.len()
    }
}

impl<S: SurfaceContainer + ?Sized> Iterator for BreadthFirstTraversal<'_, S> {
    type Item = S::Surfel;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.queue.pop_front()?;
        self.scratch.clear();
        self.surface.write_neighbors(&current, &mut self.scratch);
        for n in self.scratch.drain(..) {
            if self.visited.insert(n.clone()) {
                self.queue.push_back(n);
            }
        }
        Some(current)
    }
}

/// Single-owner handle on a surface container
///
/// The container is handed over as a `Box` and released on drop; the
/// wrapper forwards the surface capability so estimators can borrow it like
/// any other surface.
pub struct DigitalSurface<C> {
    container: Box<C>,
}

impl<C: SurfaceContainer> DigitalSurface<C> {
    /// Take ownership of a boxed container
    pub fn acquire(container: Box<C>) -> Self {
        Self { container }
    }

    pub fn new(container: C) -> Self {
        Self::acquire(Box::new(container))
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    /// Give the container back
    pub fn into_container(self) -> Box<C> {
        self.container
    }
}

impl<C: SurfaceContainer> SurfaceContainer for DigitalSurface<C> {
    type Surfel = C::Surfel;
    type Surfels<'a>
        = C::Surfels<'a>
    where
        Self: 'a;

    #[inline]
    fn write_neighbors(&self, surfel: &Self::Surfel, out: &mut Vec<Self::Surfel>) {
        self.container.write_neighbors(surfel, out)
    }

    fn surfels(&self) -> Self::Surfels<'_> {
        self.container.surfels()
    }

    fn len_hint(&self) -> Option<usize> {
        self.container.len_hint()
    }
}

impl<C: fmt::Debug> fmt::Debug for DigitalSurface<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitalSurface")
            .field("container", &self.container)
            .finish()
    }
}
