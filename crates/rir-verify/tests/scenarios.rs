//! End-to-end scenarios over small, self-contained FECs: a subpath replace,
//! a link expansion, a device-level forwarding-graph rename, counterexample
//! extraction, prefix-guard branch routing, and disjunction counterexamples.

use rir_core::OrderedSet;
use rir_lang::{Prop, Rel, Spec};
use rir_netchange::{
    any_of_hop, path_from_hops, single_hop, Fec, ForwardingGraph, IpTrafficKey, NetworkChange,
    NetworkState, NodeLevelGraph, PrefixGuard,
};
use rir_verify::{generate_counterexamples, verify};
use std::sync::Arc;

fn sym(s: &str) -> Prop {
    Prop::symbol(s).unwrap()
}

fn fec(before: NetworkState, after: NetworkState) -> Fec {
    Fec {
        ip_traffic_keys: Vec::new(),
        before,
        after,
    }
}

fn paths_fec(before: Vec<Vec<&str>>, after: Vec<Vec<&str>>) -> Fec {
    let to_paths = |rows: Vec<Vec<&str>>| {
        NetworkState::Paths(
            rows.into_iter()
                .map(|hops| path_from_hops(hops.into_iter().map(single_hop)))
                .collect(),
        )
    };
    fec(to_paths(before), to_paths(after))
}

#[test]
fn subpath_replace_holds_via_image_of_a_product() {
    // before: A -> B -> C, after: A -> B2 -> C, with B replaced by B2
    // mid-path. postState should equal preState's image under
    // I(Sigma*) . (B x B2) . I(Sigma*).
    let change_fec = paths_fec(vec![vec!["A", "B", "C"]], vec![vec!["A", "B2", "C"]]);
    let change = NetworkChange::new("subpath-replace", vec![Some(change_fec)]);

    let dot_star = Prop::star(Prop::dot());
    let replace = Rel::concat(vec![
        Rel::identity(dot_star.clone()),
        sym("B") * sym("B2"),
        Rel::identity(dot_star),
    ])
    .unwrap();

    let spec = Prop::PostState.eq_spec(Prop::PreState.image(replace));
    let result = verify(&spec, &change, None);

    assert_eq!(result.passed, OrderedSet::from([0]));
    assert!(result.failed.is_empty());
    assert!(result.skipped.is_empty());
}

#[test]
fn link_expansion_fails_equal_but_passes_subset_eq() {
    // before: a single A-B path. after: the link out of A was widened to two
    // parallel next-hops (B, B2). The postState language now has two words,
    // so exact equality with the old preState fails, but the old path is
    // still present, so preState subseteq postState holds.
    let before_fec = Fec {
        ip_traffic_keys: Vec::new(),
        before: NetworkState::Paths(vec![path_from_hops(vec![single_hop("A"), single_hop("B")])]),
        after: NetworkState::Paths(vec![path_from_hops(vec![
            single_hop("A"),
            any_of_hop(vec![rir_core::Symbol::new("B"), rir_core::Symbol::new("B2")]),
        ])]),
    };
    let change = NetworkChange::new("link-expansion", vec![Some(before_fec)]);

    let equal_spec = Prop::PostState.eq_spec(Prop::PreState);
    let equal_result = verify(&equal_spec, &change, None);
    assert_eq!(equal_result.failed, OrderedSet::from([0]));

    let subset_spec = Prop::PreState.subseteq_spec(Prop::PostState);
    let subset_result = verify(&subset_spec, &change, None);
    assert_eq!(subset_result.passed, OrderedSet::from([0]));
}

fn device_graph(edges: &[(&str, &str)], sources: &[&str], sinks: &[&str]) -> ForwardingGraph {
    let mut adjacency: indexmap::IndexMap<Arc<str>, indexmap::IndexSet<Arc<str>>> =
        indexmap::IndexMap::new();
    for (from, to) in edges {
        adjacency
            .entry(Arc::from(*from))
            .or_default()
            .insert(Arc::from(*to));
    }
    let sources = sources.iter().map(|s| Arc::from(*s)).collect();
    let sinks = sinks.iter().map(|s| Arc::from(*s)).collect();
    ForwardingGraph::Device(NodeLevelGraph::new(adjacency, sources, sinks))
}

#[test]
fn device_level_rename_holds_via_per_border_product_union() {
    // before: R1 forwards to two border devices, BORDER1 and BORDER2. after:
    // the same topology, but both borders were renamed (BORDER1NEW,
    // BORDER2NEW). postState should equal preState's image under a relation
    // that maps each old border to its own new name (not a blind cross
    // product, which would also license BORDER1 -> BORDER2NEW).
    let before = device_graph(&[("R1", "BORDER1"), ("R1", "BORDER2")], &["R1"], &["BORDER1", "BORDER2"]);
    let after = device_graph(
        &[("R1", "BORDER1NEW"), ("R1", "BORDER2NEW")],
        &["R1"],
        &["BORDER1NEW", "BORDER2NEW"],
    );
    let change_fec = fec(NetworkState::Graph(before), NetworkState::Graph(after));
    let change = NetworkChange::new("device-rename", vec![Some(change_fec)]);

    let rename = Rel::union(vec![
        sym("BORDER1") * sym("BORDER1NEW"),
        sym("BORDER2") * sym("BORDER2NEW"),
    ])
    .unwrap();
    let dot_star = Prop::star(Prop::dot());
    let full_rename = Rel::concat(vec![Rel::identity(dot_star.clone()), rename, Rel::identity(dot_star)]).unwrap();

    let spec = Prop::PostState.eq_spec(Prop::PreState.image(full_rename));
    let result = verify(&spec, &change, None);

    assert_eq!(result.passed, OrderedSet::from([0]));
    assert!(result.failed.is_empty());
}

#[test]
fn counterexamples_cover_every_newly_added_device() {
    // before: BORDER1, BORDER2 only. after: the same two, plus two brand-new
    // single-hop devices. Equal(postState, preState) fails, and the
    // counterexample generator should surface exactly the two new paths,
    // one record per distinct starting symbol.
    let change_fec = paths_fec(
        vec![vec!["BORDER1"], vec!["BORDER2"]],
        vec![vec!["BORDER1"], vec!["BORDER2"], vec!["NEWDEVICE1"], vec!["NEWDEVICE2"]],
    );
    let change = NetworkChange::new("new-devices", vec![Some(change_fec)]);

    let spec = Prop::PostState.eq_spec(Prop::PreState);
    let result = verify(&spec, &change, None);
    assert_eq!(result.failed, OrderedSet::from([0]));

    let counterexamples = generate_counterexamples(&spec, &change, &result.failed);
    assert_eq!(counterexamples.len(), 2);

    let mut starts: Vec<String> = counterexamples
        .iter()
        .map(|ce| {
            assert_eq!(ce.left_paths.len(), 1);
            assert!(ce.right_paths.is_empty());
            assert!(ce.before_paths.is_empty());
            ce.left_paths[0][0].as_str().to_string()
        })
        .collect();
    starts.sort();
    assert_eq!(starts, vec!["NEWDEVICE1".to_string(), "NEWDEVICE2".to_string()]);
}

#[test]
fn prefix_guard_routes_each_fec_to_its_own_branch() {
    // fec 0's traffic matches the guard and is unchanged, so the then-branch
    // (expects equality) should pass it. fec 1's traffic falls outside the
    // guard and genuinely changed, so the else-branch (expects inequality)
    // should pass it too. If branch routing were swapped, both would fail.
    let unchanged = Fec {
        ip_traffic_keys: vec![IpTrafficKey {
            src_ip: "10.0.0.5".to_string(),
            dst_ip: "10.1.2.3".to_string(),
            qos: 0,
        }],
        before: NetworkState::Paths(vec![path_from_hops(vec![single_hop("A")])]),
        after: NetworkState::Paths(vec![path_from_hops(vec![single_hop("A")])]),
    };
    let changed = Fec {
        ip_traffic_keys: vec![IpTrafficKey {
            src_ip: "10.0.0.5".to_string(),
            dst_ip: "192.168.1.1".to_string(),
            qos: 0,
        }],
        before: NetworkState::Paths(vec![path_from_hops(vec![single_hop("A")])]),
        after: NetworkState::Paths(vec![path_from_hops(vec![single_hop("B")])]),
    };
    let change = NetworkChange::new("prefix-guard", vec![Some(unchanged), Some(changed)]);

    let guard = PrefixGuard::parse(&["10.0.0.0/8"]).unwrap();
    let then_branch = Prop::PostState.eq_spec(Prop::PreState);
    let else_branch = Spec::Not(Box::new(Prop::PostState.eq_spec(Prop::PreState)));
    let spec = Spec::prefix_ite(then_branch, else_branch, guard);

    let result = verify(&spec, &change, None);
    assert_eq!(result.passed, OrderedSet::from([0, 1]));
    assert!(result.failed.is_empty());
}

#[test]
fn disjunction_counterexamples_require_both_sides_to_fail() {
    // l: postState == preState (unchanged). r: preState subseteq postState
    // (nothing removed). fec 0 breaks both (A replaced wholesale by B), so
    // Or(l, r) fails there and counterexamples are meaningful on both sides.
    // fec 1 only breaks l (B was added, A kept), so r still passes and
    // Or(l, r) passes overall; asking for counterexamples on fec 1 anyway
    // must yield nothing, since it never fails on both sides at once.
    let both_fail = paths_fec(vec![vec!["A"]], vec![vec!["B"]]);
    let only_l_fails = paths_fec(vec![vec!["A"]], vec![vec!["A"], vec!["B"]]);
    let change = NetworkChange::new("disjunction", vec![Some(both_fail), Some(only_l_fails)]);

    let l = Prop::PostState.eq_spec(Prop::PreState);
    let r = Prop::PreState.subseteq_spec(Prop::PostState);
    let spec = l | r;

    let result = verify(&spec, &change, None);
    assert_eq!(result.failed, OrderedSet::from([0]));
    assert_eq!(result.passed, OrderedSet::from([1]));

    let real_counterexamples = generate_counterexamples(&spec, &change, &result.failed);
    assert!(!real_counterexamples.is_empty());
    assert!(real_counterexamples.iter().all(|ce| ce.fec_id == 0));

    let spurious = generate_counterexamples(&spec, &change, &OrderedSet::from([1]));
    assert!(spurious.is_empty());
}
