use clap::Parser;
use release_assets::config::{RawInputs, DEFAULT_TIMEOUT_SECS};
use release_assets::format_error_with_help;
use release_assets::report::escape_command_data;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

/// Every flag can also be supplied through the environment, which is how
/// the workflow engine passes step inputs.
#[derive(Parser)]
#[command(name = "release-assets")]
#[command(about = "Upload files to a GitHub release")]
#[command(version)]
struct Cli {
    /// JSON array of path patterns, e.g. '["dist/*.tar.gz"]'
    #[arg(long, env = "INPUT_ASSET_PATHS")]
    asset_paths: Option<String>,

    /// Tag of the target release (defaults to the triggering tag)
    #[arg(long, env = "INPUT_RELEASE_TAG")]
    release_tag: Option<String>,

    /// Name of the target release
    #[arg(long, env = "INPUT_RELEASE_NAME")]
    release_name: Option<String>,

    /// Fail instead of replacing assets that already exist [default: true]
    #[arg(long, env = "INPUT_DENY_OVERWRITE")]
    deny_overwrite: Option<String>,

    /// Triggering ref, e.g. refs/tags/v1.0.0
    #[arg(long = "ref", env = "GITHUB_REF")]
    git_ref: Option<String>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// REST API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "RELEASE_ASSETS_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Directory relative patterns are resolved against
    #[arg(long, env = "GITHUB_WORKSPACE")]
    workspace: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing; stdout is reserved for workflow commands
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("release_assets=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = cli::upload::run(cli::upload::UploadOptions {
        inputs: RawInputs {
            asset_paths: cli.asset_paths.unwrap_or_default(),
            release_tag: cli.release_tag,
            release_name: cli.release_name,
            deny_overwrite: cli.deny_overwrite,
            git_ref: cli.git_ref,
        },
        repository: cli.repository,
        token: cli.token,
        api_url: cli.api_url,
        timeout_secs: cli.timeout_secs,
        workspace: cli.workspace,
    })
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Annotation for the workflow UI, then the full message with help
            println!("::error::{}", escape_command_data(&e.to_string()));
            eprintln!("\n{}", format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
