use crate::error::NetChangeError;
use crate::fec::{Fec, Hop, NetworkPath, NetworkState};
use crate::json::{parse_graph, parse_network_change_json, FecJson, IpTrafficKeyJson, Precision};
use rir_core::Symbol;
use std::collections::HashMap;

fn lower_ip_key(key: IpTrafficKeyJson) -> crate::fec::IpTrafficKey {
    crate::fec::IpTrafficKey {
        src_ip: key.src_ip,
        dst_ip: key.dst_ip,
        qos: key.qos,
    }
}

fn try_lower_fec(
    fec: FecJson,
    precision: Precision,
    mapping: Option<&HashMap<String, String>>,
) -> Result<Fec, NetChangeError> {
    let before = parse_graph(&fec.graph_before, precision, mapping)?;
    let after = parse_graph(&fec.graph_after, precision, mapping)?;
    Ok(Fec {
        ip_traffic_keys: fec.ip_traffic_keys.into_iter().map(lower_ip_key).collect(),
        before: NetworkState::Graph(before),
        after: NetworkState::Graph(after),
    })
}

/// An ordered collection of FECs with a human-readable name (§4.7). A FEC
/// that failed to parse leaves a `None` placeholder at its index rather than
/// shifting later indices; that index is always skipped during verification.
#[derive(Debug, Clone)]
pub struct NetworkChange {
    name: String,
    slices: Vec<Option<Fec>>,
}

impl NetworkChange {
    pub fn new(name: impl Into<String>, slices: Vec<Option<Fec>>) -> Self {
        Self {
            name: name.into(),
            slices,
        }
    }

    /// Parses the §6 network-change JSON format. Each FEC is parsed
    /// independently; a failure logs a warning (carrying the FEC index and
    /// `name`) and leaves a placeholder rather than aborting the whole file.
    pub fn from_json(
        name: impl Into<String>,
        data: &str,
        precision: Precision,
        mapping: Option<&HashMap<String, String>>,
    ) -> Result<Self, NetChangeError> {
        let name = name.into();
        let fecs = parse_network_change_json(data)?;
        let mut slices = Vec::with_capacity(fecs.len());
        for (i, fec) in fecs.into_iter().enumerate() {
            match try_lower_fec(fec, precision, mapping) {
                Ok(fec) => slices.push(Some(fec)),
                Err(err) => {
                    tracing::warn!(fec_index = i, file = %name, error = %err, "failed to parse FEC, skipping");
                    slices.push(None);
                }
            }
        }
        Ok(Self::new(name, slices))
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn count_fec(&self) -> usize {
        self.slices.len()
    }

    pub fn get(&self, index: usize) -> Option<&Fec> {
        self.slices.get(index).and_then(|slot| slot.as_ref())
    }

    /// Iterates `(index, fec)` in natural order, skipping placeholder slots.
    pub fn iterate(&self) -> impl Iterator<Item = (usize, &Fec)> {
        self.slices
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|fec| (i, fec)))
    }
}

/// Expands a user-facing path (whose hops may be symbol sets) into the
/// `NetworkPath` shape used by [`NetworkState::Paths`].
pub fn path_from_hops(hops: impl IntoIterator<Item = Hop>) -> NetworkPath {
    hops.into_iter().collect()
}

pub fn single_hop(symbol: impl Into<Symbol>) -> Hop {
    Hop::Single(symbol.into())
}

pub fn any_of_hop(symbols: impl IntoIterator<Item = Symbol>) -> Hop {
    Hop::AnyOf(symbols.into_iter().collect())
}
