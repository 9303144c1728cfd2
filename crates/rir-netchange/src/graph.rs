use indexmap::{IndexMap, IndexSet};
use rir_core::Symbol;
use std::sync::Arc;

/// Device-level and device-group-level graphs share this shape: plain
/// `node -> {next_node}` adjacency, no interface names. Device-group graphs
/// are device-level graphs whose node names have already been rewritten by
/// [`crate::precision::rewrite_device_group`] at parse time, so one shape
/// serves both precisions.
#[derive(Debug, Clone)]
pub struct NodeLevelGraph {
    pub(crate) adjacency: IndexMap<Arc<str>, IndexSet<Arc<str>>>,
    pub(crate) sources: IndexSet<Arc<str>>,
    pub(crate) sinks: IndexSet<Arc<str>>,
}

impl NodeLevelGraph {
    pub fn new(
        adjacency: IndexMap<Arc<str>, IndexSet<Arc<str>>>,
        sources: IndexSet<Arc<str>>,
        sinks: IndexSet<Arc<str>>,
    ) -> Self {
        Self {
            adjacency,
            sources,
            sinks,
        }
    }

    pub fn nodes(&self) -> IndexSet<Arc<str>> {
        let mut nodes: IndexSet<Arc<str>> = self.adjacency.keys().cloned().collect();
        nodes.extend(self.sinks.iter().cloned());
        nodes
    }

    /// `{next_node: {edge label}}`; the edge label for a node-level graph is
    /// always the next node's own name.
    pub fn out_edges(&self, node: &str) -> Vec<(Arc<str>, Vec<Arc<str>>)> {
        match self.adjacency.get(node) {
            Some(next_nodes) => next_nodes
                .iter()
                .map(|next| (next.clone(), vec![next.clone()]))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn is_source(&self, node: &str) -> bool {
        self.sources.contains(node)
    }

    pub fn is_sink(&self, node: &str) -> bool {
        self.sinks.contains(node)
    }

    pub fn alphabet(&self) -> IndexSet<Symbol> {
        self.nodes()
            .into_iter()
            .filter_map(|n| Symbol::try_new(n.as_ref()).ok())
            .collect()
    }
}

/// Interface/link-level graphs: `node -> next_node -> [interface names]`.
/// Alphabet symbols on ordinary edges are `"{next_node}|{interface}"`; an
/// edge list with no interfaces means `next_node` is a sink, contributing its
/// bare name instead. Source symbols are the source nodes' bare names (the
/// first hop of a path is already `"device|vrf"` by construction upstream).
#[derive(Debug, Clone)]
pub struct LinkLevelGraph {
    pub(crate) adjacency: IndexMap<Arc<str>, IndexMap<Arc<str>, Vec<Arc<str>>>>,
    pub(crate) sources: IndexSet<Arc<str>>,
    pub(crate) sinks: IndexSet<Arc<str>>,
}

impl LinkLevelGraph {
    pub fn new(
        adjacency: IndexMap<Arc<str>, IndexMap<Arc<str>, Vec<Arc<str>>>>,
        sources: IndexSet<Arc<str>>,
        sinks: IndexSet<Arc<str>>,
    ) -> Self {
        Self {
            adjacency,
            sources,
            sinks,
        }
    }

    pub fn nodes(&self) -> IndexSet<Arc<str>> {
        let mut nodes: IndexSet<Arc<str>> = self.adjacency.keys().cloned().collect();
        nodes.extend(self.sinks.iter().cloned());
        nodes
    }

    pub fn out_edges(&self, node: &str) -> Vec<(Arc<str>, Vec<Arc<str>>)> {
        let Some(next_nodes) = self.adjacency.get(node) else {
            return Vec::new();
        };
        next_nodes
            .iter()
            .map(|(next, interfaces)| {
                if interfaces.is_empty() {
                    (next.clone(), vec![next.clone()])
                } else {
                    let labels = interfaces
                        .iter()
                        .map(|iface| Arc::from(format!("{next}|{iface}")))
                        .collect();
                    (next.clone(), labels)
                }
            })
            .collect()
    }

    pub fn is_source(&self, node: &str) -> bool {
        self.sources.contains(node)
    }

    pub fn is_sink(&self, node: &str) -> bool {
        self.sinks.contains(node)
    }

    pub fn alphabet(&self) -> IndexSet<Symbol> {
        let mut out = IndexSet::new();
        for (_, next_nodes) in &self.adjacency {
            for (next, interfaces) in next_nodes {
                if interfaces.is_empty() {
                    if let Ok(sym) = Symbol::try_new(next.as_ref()) {
                        out.insert(sym);
                    }
                } else {
                    for iface in interfaces {
                        out.insert(Symbol::joined(next, iface));
                    }
                }
            }
        }
        for source in &self.sources {
            if let Ok(sym) = Symbol::try_new(source.as_ref()) {
                out.insert(sym);
            }
        }
        out
    }
}

/// A forwarding graph at one of the three supported precisions, tagged by
/// shape rather than boxed behind a trait object (device-group graphs reuse
/// the node-level shape after their node names have been rewritten).
#[derive(Debug, Clone)]
pub enum ForwardingGraph {
    Device(NodeLevelGraph),
    DeviceGroup(NodeLevelGraph),
    Link(LinkLevelGraph),
}

impl ForwardingGraph {
    pub fn nodes(&self) -> IndexSet<Arc<str>> {
        match self {
            ForwardingGraph::Device(g) | ForwardingGraph::DeviceGroup(g) => g.nodes(),
            ForwardingGraph::Link(g) => g.nodes(),
        }
    }

    pub fn out_edges(&self, node: &str) -> Vec<(Arc<str>, Vec<Arc<str>>)> {
        match self {
            ForwardingGraph::Device(g) | ForwardingGraph::DeviceGroup(g) => g.out_edges(node),
            ForwardingGraph::Link(g) => g.out_edges(node),
        }
    }

    pub fn is_source(&self, node: &str) -> bool {
        match self {
            ForwardingGraph::Device(g) | ForwardingGraph::DeviceGroup(g) => g.is_source(node),
            ForwardingGraph::Link(g) => g.is_source(node),
        }
    }

    pub fn is_sink(&self, node: &str) -> bool {
        match self {
            ForwardingGraph::Device(g) | ForwardingGraph::DeviceGroup(g) => g.is_sink(node),
            ForwardingGraph::Link(g) => g.is_sink(node),
        }
    }

    pub fn alphabet(&self) -> IndexSet<Symbol> {
        match self {
            ForwardingGraph::Device(g) | ForwardingGraph::DeviceGroup(g) => g.alphabet(),
            ForwardingGraph::Link(g) => g.alphabet(),
        }
    }
}
