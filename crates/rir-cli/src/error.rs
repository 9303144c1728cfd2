use rir_lang::RirError;
use rir_netchange::NetChangeError;
use rir_verify::VerifyError;

/// Errors fatal to the whole CLI invocation (§7 bullet 6): raised before any
/// FEC-level work starts, never folded into a `skipped`/`error_cases` bucket.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("devicegroup precision requires -m/--mapping")]
    MappingRequired,
    #[error(transparent)]
    NetChange(#[from] NetChangeError),
    #[error(transparent)]
    Rir(#[from] RirError),
    #[error(transparent)]
    Verify(#[from] VerifyError),
}
