use serde::Deserialize;

/// Audit stamping configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AuditConfig {
    /// User name recorded when no caller identity is available. Default: "system".
    #[serde(default = "default_auditor")]
    pub default_auditor: String,
}

fn default_auditor() -> String {
    "system".into()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            default_auditor: default_auditor(),
        }
    }
}

/// Settings for the PDF conversion backlog query.
#[derive(Debug, Deserialize, Clone)]
pub struct ConversionConfig {
    /// Maximum files handed to the conversion collaborator per poll. Default: 100.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_batch_size() -> usize {
    100
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}
