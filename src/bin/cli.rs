use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::prelude::*;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_log::LogTracer;
use anyhow::{anyhow, Context, Result};
use pkce_challenge_check as lib;
use lib::authorize::AuthorizationRequest;
use lib::config::ClientConfig;
use lib::pkce;

#[derive(Parser)]
#[command(name = "pkce-check", version)]
struct Cli {
    /// Path to client config TOML
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Without a subcommand the stored fixture challenge is checked
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the code_challenge for a verifier
    Challenge {
        verifier: String,
        #[arg(long, default_value = "S256")]
        method: String,
    },
    /// Check a verifier against a stored challenge
    Verify {
        #[arg(long)]
        challenge: String,
        #[arg(long)]
        verifier: String,
        #[arg(long, default_value = "S256")]
        method: String,
    },
    /// Generate a fresh verifier and its challenge
    Generate {
        #[arg(long, default_value_t = pkce::DEFAULT_VERIFIER_LEN)]
        length: usize,
    },
    /// Print an authorization URL built from --config
    AuthorizeUrl,
}

fn init_logging(cfg: Option<&ClientConfig>) -> Result<Option<WorkerGuard>> {
    let _ = LogTracer::init();

    // Honor RUST_LOG if set; stdout is reserved for command output.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let log_target = cfg.and_then(|c| c.log_dir.as_ref().map(|d| (d, &c.log_file_name)));
    let (file_layer, guard) = match log_target {
        Some((dir, name)) => {
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(name)
                .build(dir)
                .with_context(|| format!("creating log dir {}", dir.display()))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().with_writer(non_blocking).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber)
        .context("setting global tracing subscriber")?;
    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => Some(
            ClientConfig::from_path(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
        ),
        None => None,
    };
    let _guard = init_logging(cfg.as_ref())?;

    match cli.command {
        None => {
            let received = lib::demo::run_demo().context("checking stored challenge")?;
            println!("received challenge {}", received);
            println!("code_verifier is valid !");
        }
        Some(Commands::Challenge { verifier, method }) => {
            let challenge = pkce::compute_challenge(&verifier, &method)?;
            println!("{}", challenge);
        }
        Some(Commands::Verify { challenge, verifier, method }) => {
            pkce::verify_challenge(&challenge, &verifier, &method)?;
            println!("code_verifier is valid !");
        }
        Some(Commands::Generate { length }) => {
            let pair = pkce::PkcePair::generate_with_len(length)?;
            println!("code_verifier {}", pair.verifier);
            println!("code_challenge {}", pair.challenge);
            println!("code_challenge_method {}", pair.method);
        }
        Some(Commands::AuthorizeUrl) => {
            let cfg = cfg.ok_or_else(|| anyhow!("authorize-url requires --config"))?;
            let req = AuthorizationRequest::new(&cfg, pkce::generate_code_verifier())?;
            println!("{}", req.url()?);
            println!("state {}", req.state);
            println!("code_verifier {}", req.verifier);
        }
    }

    Ok(())
}
