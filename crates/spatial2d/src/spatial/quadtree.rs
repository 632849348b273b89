//! Quadtree spatial partitioning structure
//!
//! Recursively divides a fixed 2D region into quadrants for fast
//! broad-phase collision queries. A node subdivides into 4 quadrants when
//! the number of rectangles it holds exceeds a threshold; rectangles that
//! straddle a quadrant boundary stay at the node that detected the
//! conflict and are returned as candidates for every query that reaches
//! that node.

use crate::foundation::math::Rect;

/// Configuration for quadtree behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadTreeConfig {
    /// Maximum rectangles per node before subdivision
    ///
    /// May be changed between inserts; only future splits are affected.
    pub max_objects_per_node: usize,

    /// Maximum subdivision depth
    ///
    /// A node at this level never splits, regardless of how many
    /// rectangles it accumulates.
    pub max_depth: u32,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_objects_per_node: 8,
            max_depth: 5,
        }
    }
}

/// Identity handle for a rectangle tracked by the index
///
/// Two entries with identical bounds but different ids are distinct
/// objects; the index never deduplicates by rectangle value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

/// Rectangle stored in the quadtree together with its identity
#[derive(Debug, Clone, Copy)]
pub struct QuadTreeEntry {
    /// Identity of the tracked object
    pub id: ObjectId,

    /// Bounds of the tracked object
    pub rect: Rect,
}

/// Single node in the quadtree hierarchy
#[derive(Debug, Clone)]
pub struct QuadTreeNode {
    /// Depth of this node; the root is level 1
    pub level: u32,

    /// Region of space this node covers, fixed for the node's lifetime
    pub bounds: Rect,

    /// Rectangles held directly by this node, in insertion order
    ///
    /// For a split node these are the straddlers: rectangles that do not
    /// fit entirely inside a single child quadrant.
    pub objects: Vec<QuadTreeEntry>,

    /// Child quadrants, absent until this node splits
    ///
    /// Quadrant layout within the node's bounds:
    /// 0: bottom-right
    /// 1: bottom-left
    /// 2: top-left
    /// 3: top-right
    pub children: Option<Box<[QuadTreeNode; 4]>>,
}

impl QuadTreeNode {
    /// Create a new unsplit node at the given depth covering `bounds`
    pub fn new(level: u32, bounds: Rect) -> Self {
        Self {
            level,
            bounds,
            objects: Vec::new(),
            children: None,
        }
    }

    /// Check if this node has not split yet
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Determine which quadrant of this node fully contains `rect`
    ///
    /// Comparisons are strict: a rectangle whose edge lies exactly on a
    /// midline counts as straddling and classifies as `None`.
    pub fn quadrant_index(&self, rect: &Rect) -> Option<usize> {
        let mid_x = self.bounds.x + self.bounds.width / 2.0;
        let mid_y = self.bounds.y + self.bounds.height / 2.0;

        let fits_left = rect.x + rect.width < mid_x;
        let fits_right = rect.x > mid_x;
        let fits_bottom = rect.y + rect.height < mid_y;
        let fits_top = rect.y > mid_y;

        if fits_bottom && fits_right {
            Some(0)
        } else if fits_bottom && fits_left {
            Some(1)
        } else if fits_top && fits_left {
            Some(2)
        } else if fits_top && fits_right {
            Some(3)
        } else {
            None
        }
    }

    /// Split this node into four child quadrants at `level + 1`
    fn split(&mut self) {
        if self.children.is_some() {
            return; // Already split
        }

        let half_width = self.bounds.width / 2.0;
        let half_height = self.bounds.height / 2.0;
        let x = self.bounds.x;
        let y = self.bounds.y;
        let child_level = self.level + 1;

        // The children quarter-partition the bounds exactly; they share
        // boundary lines but never overlap in area.
        self.children = Some(Box::new([
            QuadTreeNode::new(
                child_level,
                Rect::new(x + half_width, y, half_width, half_height),
            ),
            QuadTreeNode::new(child_level, Rect::new(x, y, half_width, half_height)),
            QuadTreeNode::new(
                child_level,
                Rect::new(x, y + half_height, half_width, half_height),
            ),
            QuadTreeNode::new(
                child_level,
                Rect::new(x + half_width, y + half_height, half_width, half_height),
            ),
        ]));
    }

    /// Insert a rectangle into the subtree rooted at this node
    pub fn insert(&mut self, entry: QuadTreeEntry, config: &QuadTreeConfig) {
        // A split node delegates to the unique matching child; the entry
        // is not also stored here.
        if self.children.is_some() {
            if let Some(quadrant) = self.quadrant_index(&entry.rect) {
                if let Some(children) = &mut self.children {
                    children[quadrant].insert(entry, config);
                }
                return;
            }
        }

        self.objects.push(entry);

        if self.children.is_none()
            && self.objects.len() > config.max_objects_per_node
            && self.level < config.max_depth
        {
            self.split();

            // Re-home every rectangle that fits a single quadrant, in
            // insertion order; straddlers stay at this node.
            let mut index = 0;
            while index < self.objects.len() {
                match self.quadrant_index(&self.objects[index].rect) {
                    Some(quadrant) => {
                        let moved = self.objects.remove(index);
                        if let Some(children) = &mut self.children {
                            children[quadrant].insert(moved, config);
                        }
                    }
                    None => index += 1,
                }
            }
        }
    }

    /// Append every rectangle that could collide with `rect` to `results`
    ///
    /// `results` is caller-owned and never cleared here; repeated calls
    /// accumulate. Candidates from child quadrants come first (children
    /// visited in quadrant order when `rect` straddles this node's
    /// midlines), followed by this node's own rectangles in insertion
    /// order.
    pub fn retrieve(&self, results: &mut Vec<QuadTreeEntry>, rect: &Rect) {
        if let Some(children) = &self.children {
            match self.quadrant_index(rect) {
                Some(quadrant) => children[quadrant].retrieve(results, rect),
                None => {
                    for child in children.iter() {
                        child.retrieve(results, rect);
                    }
                }
            }
        }

        results.extend(self.objects.iter().copied());
    }

    /// Count rectangles in this node and all children
    pub fn object_count(&self) -> usize {
        let mut count = self.objects.len();

        if let Some(children) = &self.children {
            for child in children.iter() {
                count += child.object_count();
            }
        }

        count
    }

    /// Collect all leaf nodes (for visualization)
    pub fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a QuadTreeNode>) {
        if self.is_leaf() {
            leaves.push(self);
        } else if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_leaves(leaves);
            }
        }
    }
}

/// Quadtree spatial index over a fixed world region
///
/// The index is a per-frame value: the expected lifecycle is
/// [`clear`](QuadTree::clear) (or drop and recreate), insert every tracked
/// rectangle, then [`retrieve`](QuadTree::retrieve) candidates per
/// rectangle. Results returned by `retrieve` are a superset of the true
/// collisions; the caller performs the exact overlap tests.
#[derive(Debug, Clone)]
pub struct QuadTree {
    /// Root node covering the entire indexed region
    pub root: QuadTreeNode,

    /// Configuration, read on every insert
    config: QuadTreeConfig,
}

impl QuadTree {
    /// Create a new quadtree over the given world bounds
    ///
    /// The root node is at level 1.
    pub fn new(bounds: Rect, config: QuadTreeConfig) -> Self {
        Self {
            root: QuadTreeNode::new(1, bounds),
            config,
        }
    }

    /// Insert a rectangle under an identity handle
    ///
    /// Rectangles outside the root bounds are accepted structurally but
    /// query results for them carry no guarantee.
    pub fn insert(&mut self, id: ObjectId, rect: Rect) {
        self.root.insert(QuadTreeEntry { id, rect }, &self.config);
    }

    /// Append collision candidates for `rect` to `results`
    ///
    /// `results` is caller-owned and is not cleared; clear it between
    /// queries.
    pub fn retrieve(&self, results: &mut Vec<QuadTreeEntry>, rect: &Rect) {
        self.root.retrieve(results, rect);
    }

    /// Discard every rectangle and reset the tree to a single unsplit root
    pub fn clear(&mut self) {
        self.root = QuadTreeNode::new(1, self.root.bounds);
    }

    /// World bounds covered by the index
    pub fn bounds(&self) -> Rect {
        self.root.bounds
    }

    /// Total rectangles currently in the index
    pub fn object_count(&self) -> usize {
        self.root.object_count()
    }

    /// Current configuration
    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Mutable configuration
    ///
    /// Changing the split threshold or depth cap affects future splits
    /// only; already-split nodes keep their children.
    pub fn config_mut(&mut self) -> &mut QuadTreeConfig {
        &mut self.config
    }

    /// Get all leaf nodes (for visualization)
    pub fn leaves(&self) -> Vec<&QuadTreeNode> {
        let mut leaves = Vec::new();
        self.root.collect_leaves(&mut leaves);
        leaves
    }
}
