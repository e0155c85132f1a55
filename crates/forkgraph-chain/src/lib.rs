//! Forkgraph Chain Model
//!
//! Proposal records and the derived reference data the layout engine reads.
//!
//! # Shape of the data
//!
//! A rollup's proposal history is a tree. Every [`Proposal`] points back at
//! its parent through a block hash. Several proposals can claim the same
//! chain height (`canonical_num`): one is canonical, the rest are uncles.
//!
//! - [`ProposalStore`] holds validated proposals keyed by [`BlockHash`].
//! - [`BoundaryIndex`] is derived from a store: the latest and oldest
//!   proposals plus a parent → children map for forward walks.
//!
//! # Ingestion
//!
//! Raw exports deserialize into [`ProposalRecord`], where every field is
//! optional. [`ProposalStore::ingest`] validates each record once. Rejected
//! records go to a [`DiagnosticSink`] and the rest of the snapshot is kept.

mod boundary;
mod error;
mod hash;
mod proposal;
mod store;

pub use boundary::{Boundary, BoundaryIndex};
pub use error::{Error, RecordDefect, Result};
pub use hash::BlockHash;
pub use proposal::{Proposal, ProposalRecord, RecordHeader};
pub use store::{CollectingSink, DiagnosticSink, ProposalStore, TracingSink};
