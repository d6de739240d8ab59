use std::collections::HashSet;

use crate::error::NodeError;

/// Known peer nodes, kept as a deduplicated set of `host:port` authorities.
/// Consulted only during consensus resolution.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    peers: HashSet<String>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self {
            peers: HashSet::new(),
        }
    }

    /// Parse `address` and insert its authority. Returns whether the peer
    /// was newly added; re-registering is a no-op. A malformed address is
    /// rejected without touching the set.
    pub fn register(&mut self, address: &str) -> Result<bool, NodeError> {
        let authority = parse_peer_address(address)?;
        Ok(self.peers.insert(authority))
    }

    /// Register a batch of addresses. Every address is parsed before any is
    /// inserted, so a single malformed entry rejects the whole batch and
    /// leaves the set untouched.
    pub fn register_all<'a, I>(&mut self, addresses: I) -> Result<(), NodeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let parsed: Vec<String> = addresses
            .into_iter()
            .map(parse_peer_address)
            .collect::<Result<_, _>>()?;
        self.peers.extend(parsed);
        Ok(())
    }

    /// Snapshot of all registered authorities, sorted for stable output.
    pub fn snapshot(&self) -> Vec<String> {
        let mut peers: Vec<String> = self.peers.iter().cloned().collect();
        peers.sort();
        peers
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

/// Extract the `host:port` authority from a peer address. An `http://` or
/// `https://` scheme and any trailing path are accepted and stripped; the
/// port is mandatory.
pub fn parse_peer_address(address: &str) -> Result<String, NodeError> {
    let err = |reason| NodeError::AddressFormat(address.to_string(), reason);

    let rest = address.trim();
    let rest = rest
        .strip_prefix("http://")
        .or_else(|| rest.strip_prefix("https://"))
        .unwrap_or(rest);
    let authority = rest.split('/').next().unwrap_or_default();

    let (host, port) = authority
        .rsplit_once(':')
        .ok_or_else(|| err("missing port"))?;
    if host.is_empty() {
        return Err(err("empty host"));
    }
    if port.parse::<u16>().is_err() {
        return Err(err("invalid port"));
    }
    Ok(format!("{host}:{port}"))
}

#[cfg(test)]
mod tests {
    use super::{PeerRegistry, parse_peer_address};

    #[test]
    fn registering_twice_keeps_one_entry() {
        let mut registry = PeerRegistry::new();
        assert!(registry.register("10.0.0.2:5000").unwrap());
        assert!(!registry.register("10.0.0.2:5000").unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn scheme_and_path_are_stripped() {
        assert_eq!(
            parse_peer_address("http://10.0.0.2:5000/api/v1/chain/").unwrap(),
            "10.0.0.2:5000"
        );
        assert_eq!(
            parse_peer_address("https://node.example:8080").unwrap(),
            "node.example:8080"
        );
    }

    #[test]
    fn same_authority_in_different_forms_is_one_peer() {
        let mut registry = PeerRegistry::new();
        registry.register("http://10.0.0.2:5000").unwrap();
        registry.register("10.0.0.2:5000").unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn batch_with_one_malformed_address_is_rejected_whole() {
        let mut registry = PeerRegistry::new();
        let result = registry.register_all(["10.0.0.2:5000", "not-an-address"]);
        assert!(result.is_err());
        assert!(registry.is_empty());

        registry
            .register_all(["10.0.0.2:5000", "10.0.0.3:5000"])
            .unwrap();
        assert_eq!(registry.snapshot(), vec!["10.0.0.2:5000", "10.0.0.3:5000"]);
    }

    #[test]
    fn malformed_addresses_are_rejected_without_mutation() {
        let mut registry = PeerRegistry::new();
        for bad in ["", "   ", "10.0.0.2", ":5000", "10.0.0.2:notaport", "http://"] {
            assert!(registry.register(bad).is_err(), "accepted {bad:?}");
        }
        assert!(registry.is_empty());
    }
}
