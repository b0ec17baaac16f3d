use anyhow::Result;
use clap::Parser;
use lab_editor::install::{InstallOptions, install};
use std::path::PathBuf;

/// lab-editor-install - Lab Editor installer
///
/// Downloads the prebuilt lab-editor binary for macOS and installs it to
/// /usr/local/bin, or to ~/.local/bin when a system-wide install is not
/// permitted. On Linux and Windows it prints build-from-source instructions.
///
/// No arguments are required; every option is an override.
#[derive(Parser, Debug)]
#[command(
    name = "lab-editor-install",
    author,
    version = env!("LAB_EDITOR_VERSION"),
    about
)]
struct Cli {
    /// Operating system identifier to install for (defaults to this system)
    #[arg(long, env = "LAB_EDITOR_OS", value_name = "OS")]
    os: Option<String>,

    /// Release download host (defaults to https://github.com)
    #[arg(long = "base-url", env = "LAB_EDITOR_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    /// Repository publishing the release, "owner/repo"
    #[arg(long, env = "LAB_EDITOR_REPO", value_name = "OWNER/REPO")]
    repo: Option<String>,

    /// System-wide binary directory (defaults to /usr/local/bin)
    #[arg(long = "system-dir", env = "LAB_EDITOR_SYSTEM_DIR", value_name = "PATH")]
    system_dir: Option<PathBuf>,

    /// Never ask for elevated privileges
    #[arg(
        long = "no-sudo",
        env = "LAB_EDITOR_NO_SUDO",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    no_sudo: bool,
}

impl From<Cli> for InstallOptions {
    fn from(cli: Cli) -> Self {
        InstallOptions {
            os: cli.os,
            base_url: cli.base_url,
            repo: cli.repo,
            system_dir: cli.system_dir,
            no_sudo: cli.no_sudo,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = lab_editor::runtime::RealRuntime;

    install(runtime, cli.into()).await?;
    Ok(())
}
