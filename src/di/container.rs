//! Service container for dependency injection

use super::traits::{ReleaseProvider, Reporter};
use crate::config::Config;
use crate::core::ReleaseResult;
use crate::github::GitHubClient;
use crate::report::WorkflowReporter;
use std::sync::Arc;

/// Holds the collaborators a run needs as trait objects
///
/// # Example (Production)
///
/// ```no_run
/// use release_assets::config::Config;
/// use release_assets::di::ServiceContainer;
/// use release_assets::github::Repository;
///
/// # fn example() -> release_assets::core::ReleaseResult<()> {
/// let config = Config::new(Repository::parse("octo/widgets")?);
/// let container = ServiceContainer::new(&config)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ServiceContainer {
    pub provider: Arc<dyn ReleaseProvider>,
    pub reporter: Arc<dyn Reporter>,
}

impl ServiceContainer {
    /// Production services: the GitHub REST client and the workflow file reporter
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (e.g. the token
    /// is not a valid header value).
    pub fn new(config: &Config) -> ReleaseResult<Self> {
        Ok(Self {
            provider: Arc::new(GitHubClient::new(config)?),
            reporter: Arc::new(WorkflowReporter::from_env()),
        })
    }

    /// Custom implementations, mostly for tests
    pub fn with_providers(provider: Arc<dyn ReleaseProvider>, reporter: Arc<dyn Reporter>) -> Self {
        Self { provider, reporter }
    }

    pub fn provider(&self) -> &dyn ReleaseProvider {
        self.provider.as_ref()
    }

    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }
}
