use common::config::AuditConfig;

/// Supplies the user name written into `createdBy` / `modifiedBy`.
pub trait Auditor: Send + Sync {
    fn current_auditor(&self) -> Option<String>;
}

/// Always reports the same user.
#[derive(Debug, Clone)]
pub struct FixedAuditor {
    name: String,
}

impl FixedAuditor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn from_config(config: &AuditConfig) -> Self {
        Self::new(config.default_auditor.clone())
    }
}

impl Auditor for FixedAuditor {
    fn current_auditor(&self) -> Option<String> {
        Some(self.name.clone())
    }
}
