//! The network-change adapter (C7): a uniform `NetworkChange -> iter<Fec>`
//! view over the three supported forwarding-graph precisions, the §6 JSON
//! wire format, and the `IpTrafficKey`/`PrefixGuard` helpers used by the
//! prefix-guard combinator. This crate owns the external-boundary data model;
//! lowering a FEC's states into automata is C4's job, in `rir-lang`.

pub mod error;
pub mod fec;
pub mod graph;
pub mod ip;
pub mod json;
pub mod networkchange;

pub use error::NetChangeError;
pub use fec::{Fec, Hop, IpTrafficKey, NetworkPath, NetworkState};
pub use graph::{ForwardingGraph, LinkLevelGraph, NodeLevelGraph};
pub use ip::PrefixGuard;
pub use json::Precision;
pub use networkchange::{any_of_hop, path_from_hops, single_hop, NetworkChange};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"[
        {
            "ipTrafficKeys": [{"srcIp": "1.2.3.4", "dstIp": "10.0.0.1", "qos": 0}],
            "graphBefore": {
                "nodeToOutEdgesMap": {"A": {"B": []}},
                "sourceNodes": ["A"],
                "sinkNodes": ["B"]
            },
            "graphAfter": {
                "nodeToOutEdgesMap": {"A": {"C": []}},
                "sourceNodes": ["A"],
                "sinkNodes": ["C"]
            }
        }
    ]"#;

    #[test]
    fn device_level_roundtrip_builds_one_fec() {
        let change =
            NetworkChange::from_json("sample.json", SAMPLE, Precision::Device, None).unwrap();
        assert_eq!(change.count_fec(), 1);
        let fec = change.get(0).unwrap();
        assert_eq!(fec.ip_traffic_keys.len(), 1);
        let alphabet = fec.compute_alphabet();
        assert!(alphabet.iter().any(|s| s.as_str() == "B"));
        assert!(alphabet.iter().any(|s| s.as_str() == "C"));
    }

    #[test]
    fn devicegroup_without_mapping_is_fatal() {
        let err = NetworkChange::from_json("sample.json", SAMPLE, Precision::DeviceGroup, None);
        // the top-level call still succeeds: the per-FEC error becomes a
        // placeholder rather than aborting the file.
        let change = err.unwrap();
        assert_eq!(change.count_fec(), 1);
        assert!(change.get(0).is_none());
    }

    #[test]
    fn devicegroup_rewrites_device_component() {
        let mapping: HashMap<String, String> =
            [("A".to_string(), "GROUP".to_string())].into_iter().collect();
        let data = r#"[{
            "ipTrafficKeys": [],
            "graphBefore": {
                "nodeToOutEdgesMap": {"A|vrf": {"B|vrf": []}},
                "sourceNodes": ["A|vrf"],
                "sinkNodes": ["B|vrf"]
            },
            "graphAfter": {
                "nodeToOutEdgesMap": {"A|vrf": {"B|vrf": []}},
                "sourceNodes": ["A|vrf"],
                "sinkNodes": ["B|vrf"]
            }
        }]"#;
        let change =
            NetworkChange::from_json("sample.json", data, Precision::DeviceGroup, Some(&mapping))
                .unwrap();
        let fec = change.get(0).unwrap();
        let alphabet = fec.compute_alphabet();
        assert!(alphabet.iter().any(|s| s.as_str() == "GROUP|vrf"));
    }
}
