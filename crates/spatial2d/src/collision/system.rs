//! Core collision detection system
//!
//! Collision detection is split into two phases: broad-phase (candidate
//! retrieval from a spatial index) and narrow-phase (exact AABB overlap
//! tests on the candidates). The index is rebuilt from the registered
//! rectangles at the start of every pass, so stale positions never
//! survive a tick.
//!
//! The system depends on the [`SpatialQuery`] abstraction, not on the
//! quadtree directly, so other partitioning schemes can be swapped in.

use crate::foundation::math::Rect;
use crate::spatial::{ObjectId, QuadTreeEntry, SpatialQuery};
use log::{debug, trace};
use std::collections::{BTreeMap, HashSet};

/// Collision pair of two distinct object identities
///
/// The smaller id is always stored first so a pair compares equal
/// regardless of which side discovered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Smaller id of the pair
    pub a: ObjectId,

    /// Larger id of the pair
    pub b: ObjectId,
}

impl CollisionPair {
    /// Create a new collision pair, normalizing id order
    pub fn new(a: ObjectId, b: ObjectId) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }
}

/// Two-phase collision detector over a per-frame spatial index
pub struct CollisionSystem {
    /// Spatial partitioning structure for the broad phase
    index: Box<dyn SpatialQuery>,

    /// Tracked rectangles by identity; iterated in id order on rebuild so
    /// the index shape is deterministic for a given set of rectangles
    rects: BTreeMap<ObjectId, Rect>,

    /// Collision pairs from the current frame
    current_pairs: HashSet<CollisionPair>,

    /// Collision pairs from the previous frame
    previous_pairs: HashSet<CollisionPair>,

    /// Scratch buffer reused between candidate retrievals
    candidates: Vec<QuadTreeEntry>,
}

impl CollisionSystem {
    /// Create a new collision system with the given spatial index
    pub fn new(index: Box<dyn SpatialQuery>) -> Self {
        Self {
            index,
            rects: BTreeMap::new(),
            current_pairs: HashSet::new(),
            previous_pairs: HashSet::new(),
            candidates: Vec::new(),
        }
    }

    /// Register a rectangle under an identity handle
    ///
    /// Registering an already-known id replaces its rectangle.
    pub fn register(&mut self, id: ObjectId, rect: Rect) {
        self.rects.insert(id, rect);
    }

    /// Update a tracked rectangle's bounds after it moved
    pub fn update(&mut self, id: ObjectId, rect: Rect) {
        self.rects.insert(id, rect);
    }

    /// Stop tracking an id
    pub fn unregister(&mut self, id: ObjectId) {
        self.rects.remove(&id);
    }

    /// Run a full collision pass and return the pairs for this frame
    ///
    /// Rebuilds the spatial index from the tracked rectangles, retrieves
    /// candidates per rectangle, then keeps only the candidates whose
    /// bounds actually overlap.
    pub fn detect_collisions(&mut self) -> &HashSet<CollisionPair> {
        std::mem::swap(&mut self.current_pairs, &mut self.previous_pairs);
        self.current_pairs.clear();

        self.rebuild_index();

        for (&id, rect) in &self.rects {
            self.candidates.clear();
            self.index.retrieve_candidates(&mut self.candidates, rect);

            for candidate in &self.candidates {
                // The index always returns the query object itself.
                if candidate.id == id {
                    continue;
                }

                trace!("narrow phase: {:?} against {:?}", id, candidate.id);
                if rect.overlaps(&candidate.rect) {
                    self.current_pairs.insert(CollisionPair::new(id, candidate.id));
                }
            }
        }

        debug!(
            "collision pass: {} tracked, {} colliding pairs",
            self.rects.len(),
            self.current_pairs.len()
        );
        &self.current_pairs
    }

    /// Clear and refill the index so it reflects current positions
    fn rebuild_index(&mut self) {
        self.index.clear();
        for (&id, &rect) in &self.rects {
            self.index.insert(id, rect);
        }
    }

    /// Get all current collision pairs
    pub fn current_pairs(&self) -> &HashSet<CollisionPair> {
        &self.current_pairs
    }

    /// Get pairs that started colliding this frame
    pub fn pairs_entered(&self) -> Vec<CollisionPair> {
        self.current_pairs
            .difference(&self.previous_pairs)
            .copied()
            .collect()
    }

    /// Get pairs that stopped colliding this frame
    pub fn pairs_exited(&self) -> Vec<CollisionPair> {
        self.previous_pairs
            .difference(&self.current_pairs)
            .copied()
            .collect()
    }

    /// Ids involved in at least one collision this frame
    pub fn collided_ids(&self) -> HashSet<ObjectId> {
        let mut ids = HashSet::new();
        for pair in &self.current_pairs {
            ids.insert(pair.a);
            ids.insert(pair.b);
        }
        ids
    }

    /// Get a tracked rectangle's current bounds
    pub fn rect_of(&self, id: ObjectId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    /// Number of tracked rectangles
    pub fn tracked_count(&self) -> usize {
        self.rects.len()
    }

    /// Get the spatial index for direct access (e.g., for visualization)
    pub fn index(&self) -> &dyn SpatialQuery {
        self.index.as_ref()
    }

    /// Remove every tracked rectangle and all collision state
    pub fn clear(&mut self) {
        self.index.clear();
        self.rects.clear();
        self.current_pairs.clear();
        self.previous_pairs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{QuadTree, QuadTreeConfig, QuadTreeSpatialQuery};

    fn create_test_system() -> CollisionSystem {
        crate::foundation::logging::try_init();
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let config = QuadTreeConfig {
            max_objects_per_node: 2,
            max_depth: 5,
        };
        let quadtree = QuadTree::new(bounds, config);
        CollisionSystem::new(Box::new(QuadTreeSpatialQuery::new(quadtree)))
    }

    #[test]
    fn test_detects_overlapping_pair() {
        let mut system = create_test_system();
        system.register(ObjectId(1), Rect::new(0.0, 0.0, 20.0, 20.0));
        system.register(ObjectId(2), Rect::new(10.0, 10.0, 20.0, 20.0));
        system.register(ObjectId(3), Rect::new(70.0, 70.0, 10.0, 10.0));

        let pairs = system.detect_collisions();
        assert_eq!(pairs.len(), 1);
        assert!(pairs.contains(&CollisionPair::new(ObjectId(1), ObjectId(2))));

        let collided = system.collided_ids();
        assert!(collided.contains(&ObjectId(1)));
        assert!(collided.contains(&ObjectId(2)));
        assert!(!collided.contains(&ObjectId(3)));
    }

    #[test]
    fn test_pair_order_is_normalized() {
        let pair = CollisionPair::new(ObjectId(9), ObjectId(4));
        assert_eq!(pair.a, ObjectId(4));
        assert_eq!(pair.b, ObjectId(9));
        assert_eq!(pair, CollisionPair::new(ObjectId(4), ObjectId(9)));
    }

    #[test]
    fn test_touching_edges_collide() {
        let mut system = create_test_system();
        system.register(ObjectId(1), Rect::new(0.0, 0.0, 10.0, 10.0));
        system.register(ObjectId(2), Rect::new(10.0, 0.0, 10.0, 10.0));

        let pairs = system.detect_collisions();
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_identical_geometry_distinct_ids() {
        let mut system = create_test_system();
        let rect = Rect::new(40.0, 40.0, 10.0, 10.0);
        system.register(ObjectId(1), rect);
        system.register(ObjectId(2), rect);

        let pairs = system.detect_collisions();
        assert!(pairs.contains(&CollisionPair::new(ObjectId(1), ObjectId(2))));
    }

    #[test]
    fn test_crowded_world_single_pair() {
        let mut system = create_test_system();
        // Enough spread-out rectangles to split the index several times.
        for i in 0..12 {
            let x = (i % 4) as f32 * 24.0;
            let y = (i / 4) as f32 * 30.0;
            system.register(ObjectId(i), Rect::new(x, y, 5.0, 5.0));
        }
        // One deliberate overlap on top of object 0.
        system.register(ObjectId(100), Rect::new(2.0, 2.0, 5.0, 5.0));

        let pairs = system.detect_collisions();
        assert_eq!(pairs.len(), 1);
        assert!(pairs.contains(&CollisionPair::new(ObjectId(0), ObjectId(100))));
    }

    #[test]
    fn test_entered_and_exited_pairs() {
        let mut system = create_test_system();
        system.register(ObjectId(1), Rect::new(0.0, 0.0, 20.0, 20.0));
        system.register(ObjectId(2), Rect::new(10.0, 10.0, 20.0, 20.0));

        system.detect_collisions();
        let entered = system.pairs_entered();
        assert_eq!(entered, vec![CollisionPair::new(ObjectId(1), ObjectId(2))]);
        assert!(system.pairs_exited().is_empty());

        // Move object 2 away; the pair exits on the next pass.
        system.update(ObjectId(2), Rect::new(60.0, 60.0, 20.0, 20.0));
        system.detect_collisions();
        assert!(system.current_pairs().is_empty());
        assert!(system.pairs_entered().is_empty());
        assert_eq!(
            system.pairs_exited(),
            vec![CollisionPair::new(ObjectId(1), ObjectId(2))]
        );
    }

    #[test]
    fn test_unregistered_id_stops_colliding() {
        let mut system = create_test_system();
        system.register(ObjectId(1), Rect::new(0.0, 0.0, 20.0, 20.0));
        system.register(ObjectId(2), Rect::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(system.detect_collisions().len(), 1);

        system.unregister(ObjectId(2));
        assert_eq!(system.tracked_count(), 1);
        assert_eq!(system.rect_of(ObjectId(2)), None);
        assert!(system.detect_collisions().is_empty());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut system = create_test_system();
        system.register(ObjectId(1), Rect::new(0.0, 0.0, 20.0, 20.0));
        system.register(ObjectId(2), Rect::new(10.0, 10.0, 20.0, 20.0));
        system.detect_collisions();

        system.clear();
        assert_eq!(system.tracked_count(), 0);
        assert_eq!(system.index().object_count(), 0);
        assert!(system.current_pairs().is_empty());
        assert!(system.detect_collisions().is_empty());
    }
}
