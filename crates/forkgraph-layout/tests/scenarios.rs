//! End-to-end layout scenarios on small hand-built histories.

use forkgraph_chain::{Boundary, BlockHash, BoundaryIndex, Proposal, ProposalStore};
use forkgraph_layout::{
    compute_edges, compute_layout, compute_nodes, resolve_heights, EdgeRecord, LayoutConfig,
    LayoutEngine, Limit, OrderingPolicy, Position, Window,
};

/// A:#100 root, B:#101, C:#102 canonical, D:#102 uncle proposed before C.
fn abcd() -> (ProposalStore, BoundaryIndex) {
    let store: ProposalStore = [
        Proposal::new("A", 100, 100).proposed_at(1_000).finalized(),
        Proposal::new("B", 101, 101).with_parent("A").proposed_at(1_010),
        Proposal::new("C", 102, 102).with_parent("B").proposed_at(1_030),
        Proposal::new("D", 102, 102).with_parent("B").proposed_at(1_020).uncle(true),
    ]
    .into_iter()
    .collect();

    let mut index = BoundaryIndex::from_store(&store);
    index.latest_proposal = Boundary::new(vec!["C".into()], 102);
    (store, index)
}

fn hashes<V>(map: &std::collections::BTreeMap<BlockHash, V>) -> Vec<&str> {
    map.keys().map(BlockHash::as_str).collect()
}

#[test]
fn all_four_in_view_with_limit_ten() {
    let (store, index) = abcd();
    let limit = Limit::new(10).unwrap();

    let nodes = compute_nodes(&store, &index.latest_proposal, limit);
    assert_eq!(hashes(&nodes), ["A", "B", "C", "D"]);

    let edges = compute_edges(&store, &index.latest_proposal, limit);
    assert_eq!(
        edges.get("D"),
        Some(&EdgeRecord {
            source: "B".into(),
            target: "D".into()
        })
    );
}

#[test]
fn chronological_puts_earlier_uncle_above() {
    let (store, index) = abcd();
    let layout = compute_layout(&store, &index, Limit::new(10).unwrap(), OrderingPolicy::Chronological);

    let c = layout.get(&"C".into()).unwrap();
    let d = layout.get(&"D".into()).unwrap();
    assert_eq!(c.x, d.x);
    assert!(d.y < c.y);
    assert_eq!(d.y, 80);
}

#[test]
fn ancestry_degree_keeps_canonical_on_row_zero() {
    let (store, index) = abcd();
    let layout = compute_layout(&store, &index, Limit::new(10).unwrap(), OrderingPolicy::AncestryDegree);

    assert_eq!(layout.get(&"A".into()), Some(Position::new(0, 0)));
    assert_eq!(layout.get(&"B".into()), Some(Position::new(180, 0)));
    assert_eq!(layout.get(&"C".into()), Some(Position::new(360, 0)));
    assert_eq!(layout.get(&"D".into()), Some(Position::new(360, 80)));
}

#[test]
fn limit_one_keeps_only_latest_sequence_number() {
    let (store, index) = abcd();
    let limit = Limit::new(1).unwrap();

    // D shares proposal_num 102 with C, so it stays in view.
    let nodes = compute_nodes(&store, &index.latest_proposal, limit);
    assert_eq!(hashes(&nodes), ["C", "D"]);

    let edges = compute_edges(&store, &index.latest_proposal, limit);
    assert_eq!(hashes(&edges), ["C", "D"]);

    let layout = compute_layout(&store, &index, limit, OrderingPolicy::AncestryDegree);
    assert_eq!(layout.len(), 2);
    assert!(layout.get(&"A".into()).is_none());
    assert!(layout.get(&"B".into()).is_none());
    assert_eq!(layout.get(&"C".into()), Some(Position::new(0, 0)));
}

#[test]
fn absent_parent_ends_height_branch() {
    let store: ProposalStore = [
        Proposal::new("X", 5, 5).with_parent("GONE"),
        Proposal::new("Y", 6, 6).with_parent("X"),
    ]
    .into_iter()
    .collect();
    let index = BoundaryIndex::from_store(&store);
    let window = Window::new(&index.latest_proposal, Limit::DEFAULT);

    let heights = resolve_heights(&store, &index.latest_proposal, &window, usize::MAX);
    assert_eq!(heights.total_height(), 2);
    assert_eq!(heights.rank(&"GONE".into()), Some(1));

    let layout = LayoutEngine::new(&store, &index, LayoutConfig::default()).layout();
    assert_eq!(layout.get(&"X".into()), Some(Position::new(0, 0)));
    assert_eq!(layout.get(&"Y".into()), Some(Position::new(180, 0)));
}

#[test]
fn zero_limit_is_rejected_before_traversal() {
    assert!(Limit::new(0).is_err());
    let parsed: Result<LayoutConfig, _> = serde_json::from_str(r#"{"limit": 0}"#);
    assert!(parsed.is_err());
}

/// Canonical R - P1 - P2 - P3, with uncle U2 off P1, U3 off U2 and V3 off P2.
fn uncle_chain(flagged: bool) -> ProposalStore {
    let uncle = |p: Proposal| if flagged { p.uncle(true) } else { p };
    [
        Proposal::new("R", 0, 0),
        Proposal::new("P1", 1, 1).with_parent("R"),
        uncle(Proposal::new("U2", 2, 2).with_parent("P1")),
        Proposal::new("P2", 3, 2).with_parent("P1"),
        uncle(Proposal::new("U3", 4, 3).with_parent("U2")),
        uncle(Proposal::new("V3", 5, 3).with_parent("P2")),
        Proposal::new("P3", 6, 3).with_parent("P2"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn uncle_order_survives_shrinking_window() {
    for flagged in [false, true] {
        let store = uncle_chain(flagged);
        let index = BoundaryIndex::from_store(&store);

        // Limit 4 keeps proposal_num 3..=6 in view, so U2 drops out.
        for limit in [4, 100] {
            let config = LayoutConfig {
                limit: Limit::new(limit).unwrap(),
                ..LayoutConfig::default()
            };
            let engine = LayoutEngine::new(&store, &index, config);
            assert_eq!(engine.ancestry_degree().degrees().degree(&"U3".into()), 2);

            let layout = engine.layout();
            let y = |h: &str| layout.get(&h.into()).unwrap().y;
            assert_eq!((y("P3"), y("V3"), y("U3")), (0, 80, 160), "flagged={flagged} limit={limit}");
        }
    }
}

#[test]
fn uncle_chain_fans_out_by_degree() {
    let store = uncle_chain(false);
    let index = BoundaryIndex::from_store(&store);
    let engine = LayoutEngine::new(&store, &index, LayoutConfig::default());

    let degrees = engine.ancestry_degree();
    assert_eq!(degrees.degrees().degree(&"U3".into()), 2);
    assert_eq!(degrees.degrees().degree(&"V3".into()), 1);

    let layout = engine.layout();
    assert_eq!(layout.get(&"P3".into()).unwrap().y, 0);
    assert_eq!(layout.get(&"V3".into()).unwrap().y, 80);
    assert_eq!(layout.get(&"U3".into()).unwrap().y, 160);

    let xs: Vec<u64> = ["P3", "V3", "U3"]
        .iter()
        .map(|h| layout.get(&BlockHash::from(*h)).unwrap().x)
        .collect();
    assert!(xs.windows(2).all(|w| w[0] == w[1]));
}
