//! Spatial partitioning data structures
//!
//! Provides efficient spatial indexing for broad-phase collision
//! detection and proximity queries in 2D space.

mod quadtree;
pub mod spatial_query;

pub use quadtree::{ObjectId, QuadTree, QuadTreeConfig, QuadTreeEntry, QuadTreeNode};
pub use spatial_query::{QuadTreeSpatialQuery, SpatialQuery};
