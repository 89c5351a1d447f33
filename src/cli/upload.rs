use release_assets::config::{Config, Inputs, RawInputs};
use release_assets::core::ReleaseResult;
use release_assets::di::ServiceContainer;
use release_assets::github::Repository;
use release_assets::publish::Publisher;
use std::env;
use std::path::PathBuf;

/// Everything the upload command receives from the command line or environment
pub struct UploadOptions {
    pub inputs: RawInputs,
    pub repository: Option<String>,
    pub token: Option<String>,
    pub api_url: Option<String>,
    pub timeout_secs: u64,
    pub workspace: Option<PathBuf>,
}

pub async fn run(options: UploadOptions) -> ReleaseResult<()> {
    // Validate everything before touching the network
    let inputs = Inputs::parse(&options.inputs)?;
    let repo = Repository::parse(options.repository.as_deref().unwrap_or_default())?;

    let config = Config::new(repo.clone())
        .with_api_url(options.api_url.as_deref())
        .with_token(options.token)
        .with_timeout_secs(options.timeout_secs);

    let workspace = match options.workspace.filter(|w| !w.as_os_str().is_empty()) {
        Some(dir) => dir,
        None => env::current_dir()?,
    };

    let services = ServiceContainer::new(&config)?;
    let result = Publisher::new(&services, repo.clone(), &workspace)
        .publish(&inputs)
        .await?;

    println!("✓ Uploaded {} asset(s) to {}", result.uploads.len(), repo);
    Ok(())
}
