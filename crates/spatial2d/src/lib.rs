//! # spatial2d
//!
//! A 2D spatial partitioning library for broad-phase collision detection.
//!
//! ## Features
//!
//! - **Quadtree Index**: Recursive quadrant subdivision with
//!   boundary-object handling; straddlers stay at the node that detected
//!   the conflict
//! - **Two-Phase Collision**: Broad-phase candidate retrieval plus
//!   narrow-phase exact AABB overlap tests
//! - **Per-Frame Lifecycle**: The index is a disposable value, cleared
//!   and refilled every simulation tick
//! - **Pluggable Backends**: Collision detection depends on a
//!   `SpatialQuery` trait, not on the quadtree directly
//!
//! ## Quick Start
//!
//! ```rust
//! use spatial2d::prelude::*;
//!
//! let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let mut tree = QuadTree::new(bounds, QuadTreeConfig::default());
//!
//! tree.insert(ObjectId(0), Rect::new(10.0, 10.0, 20.0, 20.0));
//! tree.insert(ObjectId(1), Rect::new(15.0, 15.0, 20.0, 20.0));
//!
//! // Candidates for a query rectangle; the caller still performs the
//! // exact overlap tests.
//! let mut candidates = Vec::new();
//! tree.retrieve(&mut candidates, &Rect::new(12.0, 12.0, 5.0, 5.0));
//! assert_eq!(candidates.len(), 2);
//!
//! // Fresh tree for the next frame.
//! tree.clear();
//! assert_eq!(tree.object_count(), 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod collision;
pub mod config;
pub mod foundation;
pub mod spatial;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        collision::{CollisionPair, CollisionSystem},
        config::{ConfigError, SimulationSettings, WorldBounds},
        foundation::math::{Rect, Vec2},
        spatial::{
            ObjectId, QuadTree, QuadTreeConfig, QuadTreeEntry, QuadTreeNode, QuadTreeSpatialQuery,
            SpatialQuery,
        },
    };
}
