//! Forkgraph Layout Engine
//!
//! Places a rollup's proposal history on a plane so the canonical chain reads
//! as a straight horizontal spine and uncles fan out below it.
//!
//! # Pipeline
//!
//! 1. **Window**: keep the `limit` most recent proposals by `proposal_num`.
//! 2. **Projection**: one display node and one parent edge per in-view
//!    proposal.
//! 3. **Heights**: walk parent links from the tip, ranking each level by its
//!    distance from the tip.
//! 4. **Siblings**: walk child links from the oldest proposal, group in-view
//!    proposals by `canonical_num` and order each group with a
//!    [`SiblingOrdering`].
//! 5. **Coordinates**: `x` from the height rank (root side at 0), `y` from the
//!    sibling slot.
//!
//! Everything runs synchronously over borrowed, immutable inputs. Data gaps
//! shrink the output; only a bad [`Limit`] is an error.
//!
//! # Usage
//!
//! ```
//! use forkgraph_chain::{BoundaryIndex, Proposal, ProposalStore};
//! use forkgraph_layout::{compute_layout, Limit, OrderingPolicy};
//!
//! let store: ProposalStore = [
//!     Proposal::new("0xa", 100, 100),
//!     Proposal::new("0xb", 101, 101).with_parent("0xa"),
//! ]
//! .into_iter()
//! .collect();
//! let index = BoundaryIndex::from_store(&store);
//!
//! let layout = compute_layout(&store, &index, Limit::new(10)?, OrderingPolicy::AncestryDegree);
//! assert_eq!(layout.get(&"0xb".into()).map(|p| p.x), Some(180));
//! # Ok::<(), forkgraph_layout::Error>(())
//! ```

mod config;
mod coords;
mod engine;
mod error;
mod height;
mod ordering;
mod projector;
mod window;

pub use config::{
    LayoutConfig, Limit, Spacing, COLUMN_WIDTH, DEFAULT_LIMIT, DEFAULT_MAX_TRAVERSAL_STEPS,
    ROW_HEIGHT,
};
pub use coords::{assemble, column, Layout, Position};
pub use engine::{compute_layout, LayoutEngine};
pub use error::{Error, Result};
pub use height::{resolve_heights, HeightMap};
pub use ordering::{
    assign_slots, collect_rows, AncestryDegree, CanonicalPath, Chronological, OrderingPolicy,
    Placement, SiblingOrdering, SlotMap, UncleDegrees,
};
pub use projector::{compute_edges, compute_nodes, EdgeRecord, NodeRecord};
pub use window::Window;
