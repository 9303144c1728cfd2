/// Errors raised while building the network-change adapter's own data model
/// (graph/FEC construction). Per-FEC JSON parse failures are *not* reported
/// through this type: they are caught by the caller, logged, and turned into
/// a placeholder slot in [`crate::NetworkChange`] instead (see
/// `NetworkChange::from_json`).
#[derive(Debug, Clone, thiserror::Error)]
pub enum NetChangeError {
    #[error("device-group precision requires a device->group mapping file")]
    MappingRequired,
    #[error("unknown forwarding-graph precision {0:?}, expected interface, device or devicegroup")]
    UnknownPrecision(String),
    #[error("malformed network-change JSON: {0}")]
    Json(String),
}
