//! Abstract spatial query interface for broad-phase collision detection
//!
//! The collision system only needs candidate retrieval over an index that
//! is rebuilt every frame. This abstraction allows swapping different
//! spatial partitioning schemes (quadtree, uniform grid, BVH) without
//! changing the collision system.

use crate::foundation::math::Rect;
use crate::spatial::{ObjectId, QuadTree, QuadTreeEntry};
use std::any::Any;

/// Abstract interface for spatial partitioning used in broad-phase
/// collision detection
///
/// Implementations are per-frame indexes: the collision system clears and
/// refills them every tick, so there is no removal or relocation surface.
pub trait SpatialQuery: Send + Sync {
    /// Insert a rectangle under an identity handle
    fn insert(&mut self, id: ObjectId, rect: Rect);

    /// Append collision candidates for `rect` to `results`
    ///
    /// Candidates are a superset of the true collisions; the caller
    /// performs exact overlap tests. `results` is caller-owned and is not
    /// cleared here.
    fn retrieve_candidates(&self, results: &mut Vec<QuadTreeEntry>, rect: &Rect);

    /// Remove every rectangle from the index
    fn clear(&mut self);

    /// Number of rectangles currently indexed
    fn object_count(&self) -> usize;

    /// Downcast to Any for type-specific access
    fn as_any(&self) -> &dyn Any;

    /// Downcast to Any for mutable type-specific access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Quadtree-based implementation of `SpatialQuery`
pub struct QuadTreeSpatialQuery {
    quadtree: QuadTree,
}

impl QuadTreeSpatialQuery {
    /// Create a new quadtree-backed spatial query
    pub fn new(quadtree: QuadTree) -> Self {
        Self { quadtree }
    }

    /// Get a reference to the underlying quadtree (for visualization, etc.)
    pub fn quadtree(&self) -> &QuadTree {
        &self.quadtree
    }

    /// Get a mutable reference to the underlying quadtree
    pub fn quadtree_mut(&mut self) -> &mut QuadTree {
        &mut self.quadtree
    }
}

impl SpatialQuery for QuadTreeSpatialQuery {
    fn insert(&mut self, id: ObjectId, rect: Rect) {
        self.quadtree.insert(id, rect);
    }

    fn retrieve_candidates(&self, results: &mut Vec<QuadTreeEntry>, rect: &Rect) {
        self.quadtree.retrieve(results, rect);
    }

    fn clear(&mut self) {
        self.quadtree.clear();
    }

    fn object_count(&self) -> usize {
        self.quadtree.object_count()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::QuadTreeConfig;

    #[test]
    fn test_spatial_query_insert_clear() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let quadtree = QuadTree::new(bounds, QuadTreeConfig::default());
        let mut spatial = QuadTreeSpatialQuery::new(quadtree);

        spatial.insert(ObjectId(1), Rect::new(10.0, 10.0, 5.0, 5.0));
        spatial.insert(ObjectId(2), Rect::new(12.0, 12.0, 5.0, 5.0));
        assert_eq!(spatial.object_count(), 2);

        let mut results = Vec::new();
        spatial.retrieve_candidates(&mut results, &Rect::new(11.0, 11.0, 2.0, 2.0));
        assert_eq!(results.len(), 2);

        spatial.clear();
        assert_eq!(spatial.object_count(), 0);
    }

    #[test]
    fn test_downcast_to_quadtree() {
        let bounds = Rect::new(0.0, 0.0, 50.0, 50.0);
        let quadtree = QuadTree::new(bounds, QuadTreeConfig::default());
        let spatial: Box<dyn SpatialQuery> = Box::new(QuadTreeSpatialQuery::new(quadtree));

        let concrete = spatial
            .as_any()
            .downcast_ref::<QuadTreeSpatialQuery>()
            .expect("should downcast to the quadtree backend");
        assert_eq!(concrete.quadtree().bounds(), bounds);
    }
}
