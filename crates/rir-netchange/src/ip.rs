use ipnet::IpNet;
use std::net::IpAddr;
use std::str::FromStr;

/// The `IPGuard` of `spec.md` §1/§4.5: a small list of CIDR prefixes, tested
/// only against a FEC's destination IPs by `SPrefixITE` resolution. A thin
/// adapter over `ipnet`, not new algebraic machinery.
#[derive(Debug, Clone)]
pub struct PrefixGuard {
    prefixes: Vec<IpNet>,
}

impl PrefixGuard {
    pub fn new(prefixes: impl IntoIterator<Item = IpNet>) -> Self {
        Self {
            prefixes: prefixes.into_iter().collect(),
        }
    }

    pub fn parse(prefixes: &[impl AsRef<str>]) -> Result<Self, ipnet::AddrParseError> {
        let prefixes = prefixes
            .iter()
            .map(|p| IpNet::from_str(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(prefixes))
    }

    /// True iff `ip` (a dotted-decimal address) falls inside any configured
    /// prefix. A malformed address never matches.
    pub fn contains(&self, ip: &str) -> bool {
        match IpAddr::from_str(ip) {
            Ok(addr) => self.prefixes.iter().any(|net| net.contains(&addr)),
            Err(_) => false,
        }
    }
}

impl std::fmt::Display for PrefixGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, p) in self.prefixes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_contained_address() {
        let guard = PrefixGuard::parse(&["10.0.0.0/8"]).unwrap();
        assert!(guard.contains("10.1.2.3"));
        assert!(!guard.contains("192.168.0.1"));
    }

    #[test]
    fn malformed_address_never_matches() {
        let guard = PrefixGuard::parse(&["10.0.0.0/8"]).unwrap();
        assert!(!guard.contains("not-an-ip"));
    }
}
