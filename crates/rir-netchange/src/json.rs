//! The network-change JSON wire format (§6): the only on-disk format the
//! adapter reads. Parsing happens eagerly, per FEC; a single FEC's failure
//! does not abort the file — see [`crate::NetworkChange::from_json`].

use crate::error::NetChangeError;
use crate::graph::{ForwardingGraph, LinkLevelGraph, NodeLevelGraph};
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// `{interface|device|devicegroup}` forwarding-graph precision, selected by
/// the CLI's `-P` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Device,
    Interface,
    DeviceGroup,
}

impl std::str::FromStr for Precision {
    type Err = NetChangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "device" => Ok(Precision::Device),
            "interface" => Ok(Precision::Interface),
            "devicegroup" => Ok(Precision::DeviceGroup),
            other => Err(NetChangeError::UnknownPrecision(other.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IpTrafficKeyJson {
    #[serde(rename = "srcIp")]
    pub src_ip: String,
    #[serde(rename = "dstIp")]
    pub dst_ip: String,
    pub qos: i64,
}

#[derive(Debug, Deserialize)]
pub struct GraphJson {
    #[serde(rename = "nodeToOutEdgesMap")]
    pub node_to_out_edges_map: IndexMap<String, IndexMap<String, Vec<String>>>,
    #[serde(rename = "sourceNodes")]
    pub source_nodes: Vec<String>,
    #[serde(rename = "sinkNodes")]
    pub sink_nodes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FecJson {
    #[serde(rename = "ipTrafficKeys")]
    pub ip_traffic_keys: Vec<IpTrafficKeyJson>,
    #[serde(rename = "graphBefore")]
    pub graph_before: GraphJson,
    #[serde(rename = "graphAfter")]
    pub graph_after: GraphJson,
}

pub fn parse_network_change_json(data: &str) -> Result<Vec<FecJson>, NetChangeError> {
    serde_json::from_str(data).map_err(|e| NetChangeError::Json(e.to_string()))
}

pub fn parse_device_group_mapping(data: &str) -> Result<HashMap<String, String>, NetChangeError> {
    serde_json::from_str(data).map_err(|e| NetChangeError::Json(e.to_string()))
}

/// Replaces the leading `device` component of a `"device|vrf"` node name
/// using `mapping`, leaving the `vrf` suffix untouched. Node names that do
/// not split into exactly two `|`-separated parts pass through unchanged.
fn rewrite_device_group(node: &str, mapping: &HashMap<String, String>) -> Arc<str> {
    match node.split_once('|') {
        Some((device, vrf)) => {
            let group = mapping.get(device).map(String::as_str).unwrap_or(device);
            Arc::from(format!("{group}|{vrf}"))
        }
        None => Arc::from(node),
    }
}

fn parse_device_level(graph: &GraphJson) -> NodeLevelGraph {
    let adjacency = graph
        .node_to_out_edges_map
        .iter()
        .map(|(node, out_edges)| {
            let next_nodes: IndexSet<Arc<str>> =
                out_edges.keys().map(|n| Arc::from(n.as_str())).collect();
            (Arc::from(node.as_str()), next_nodes)
        })
        .collect();
    NodeLevelGraph::new(
        adjacency,
        graph.source_nodes.iter().map(|n| Arc::from(n.as_str())).collect(),
        graph.sink_nodes.iter().map(|n| Arc::from(n.as_str())).collect(),
    )
}

fn parse_device_group_level(graph: &GraphJson, mapping: &HashMap<String, String>) -> NodeLevelGraph {
    let mut adjacency: IndexMap<Arc<str>, IndexSet<Arc<str>>> = IndexMap::new();
    for (node, out_edges) in &graph.node_to_out_edges_map {
        let rewritten_node = rewrite_device_group(node, mapping);
        let entry = adjacency.entry(rewritten_node).or_default();
        for next_node in out_edges.keys() {
            entry.insert(rewrite_device_group(next_node, mapping));
        }
    }
    let sources = graph
        .source_nodes
        .iter()
        .map(|n| rewrite_device_group(n, mapping))
        .collect();
    let sinks = graph
        .sink_nodes
        .iter()
        .map(|n| rewrite_device_group(n, mapping))
        .collect();
    NodeLevelGraph::new(adjacency, sources, sinks)
}

fn parse_link_level(graph: &GraphJson) -> LinkLevelGraph {
    let adjacency = graph
        .node_to_out_edges_map
        .iter()
        .map(|(node, out_edges)| {
            let next_nodes: IndexMap<Arc<str>, Vec<Arc<str>>> = out_edges
                .iter()
                .map(|(next, interfaces)| {
                    (
                        Arc::from(next.as_str()),
                        interfaces.iter().map(|i| Arc::from(i.as_str())).collect(),
                    )
                })
                .collect();
            (Arc::from(node.as_str()), next_nodes)
        })
        .collect();
    LinkLevelGraph::new(
        adjacency,
        graph.source_nodes.iter().map(|n| Arc::from(n.as_str())).collect(),
        graph.sink_nodes.iter().map(|n| Arc::from(n.as_str())).collect(),
    )
}

pub fn parse_graph(
    graph: &GraphJson,
    precision: Precision,
    mapping: Option<&HashMap<String, String>>,
) -> Result<ForwardingGraph, NetChangeError> {
    match precision {
        Precision::Device => Ok(ForwardingGraph::Device(parse_device_level(graph))),
        Precision::Interface => Ok(ForwardingGraph::Link(parse_link_level(graph))),
        Precision::DeviceGroup => {
            let mapping = mapping.ok_or(NetChangeError::MappingRequired)?;
            Ok(ForwardingGraph::DeviceGroup(parse_device_group_level(
                graph, mapping,
            )))
        }
    }
}
