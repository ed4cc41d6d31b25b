use std::path::PathBuf;

/// What a generation step did to the site tree
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    /// Pages left untouched because they already exist
    pub skipped: Vec<PathBuf>,
    pub copied: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }
}
