use crate::graph::ForwardingGraph;
use indexmap::IndexSet;
use rir_core::Symbol;

/// A user-facing path hop: a single location, or a set of locations denoting
/// "any of these at this position" (expanded to a union at construction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hop {
    Single(Symbol),
    AnyOf(Vec<Symbol>),
}

pub type NetworkPath = Vec<Hop>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpTrafficKey {
    pub src_ip: String,
    pub dst_ip: String,
    pub qos: i64,
}

/// Either side (before/after) of a [`Fec`]: an explicit path set, or a
/// forwarding graph at one of the three supported precisions.
#[derive(Debug, Clone)]
pub enum NetworkState {
    Paths(Vec<NetworkPath>),
    Graph(ForwardingGraph),
}

impl NetworkState {
    fn alphabet(&self) -> IndexSet<Symbol> {
        match self {
            NetworkState::Paths(paths) => {
                let mut out = IndexSet::new();
                for path in paths {
                    for hop in path {
                        match hop {
                            Hop::Single(s) => {
                                out.insert(s.clone());
                            }
                            Hop::AnyOf(symbols) => out.extend(symbols.iter().cloned()),
                        }
                    }
                }
                out
            }
            NetworkState::Graph(g) => g.alphabet(),
        }
    }
}

/// A forwarding equivalence class: a before/after pair of network states,
/// plus the IP traffic keys used only by the prefix-guard combinator.
#[derive(Debug, Clone)]
pub struct Fec {
    pub ip_traffic_keys: Vec<IpTrafficKey>,
    pub before: NetworkState,
    pub after: NetworkState,
}

impl Fec {
    pub fn compute_alphabet(&self) -> IndexSet<Symbol> {
        let mut alphabet = self.before.alphabet();
        alphabet.extend(self.after.alphabet());
        alphabet
    }

    /// Destination IPs of this FEC's traffic keys, the only field the
    /// prefix-guard combinator consults.
    pub fn ip_traffic_keys(&self) -> impl Iterator<Item = &str> {
        self.ip_traffic_keys.iter().map(|k| k.dst_ip.as_str())
    }
}
