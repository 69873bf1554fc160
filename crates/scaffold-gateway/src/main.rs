//! scaffold-agent command line
//!
//! - `serve`: accept signed triggers over HTTP
//! - `run`: apply instructions to a spec locally
//! - `keygen`: print a fresh Ed25519 key pair
//! - `sign`: sign a request body for testing

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgMatches, Command};
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use scaffold_gateway::{build_pipeline, build_state, routes, telemetry, GatewayConfig, RunRequest};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .default_value("scaffold.toml")
        .value_parser(value_parser!(PathBuf))
        .help("Path to the TOML config file")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Command::new("scaffold-agent")
        .version(scaffold_gateway::VERSION)
        .about("Specification-driven Spring Boot scaffolding agent")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("serve")
                .about("Serve the signed trigger API")
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("run")
                .about("Apply an instruction locally and regenerate the project")
                .arg(config_arg())
                .arg(
                    Arg::new("spec")
                        .long("spec")
                        .value_parser(value_parser!(PathBuf))
                        .help("Spec file (defaults to paths.default_spec)"),
                )
                .arg(
                    Arg::new("instruction")
                        .required(true)
                        .help("Instruction text, one instruction per line"),
                ),
        )
        .subcommand(Command::new("keygen").about("Generate an Ed25519 keypair"))
        .subcommand(
            Command::new("sign")
                .about("Sign a request body for the trigger API")
                .arg(
                    Arg::new("key")
                        .long("key")
                        .required(true)
                        .help("Hex private key"),
                )
                .arg(
                    Arg::new("timestamp")
                        .long("timestamp")
                        .help("Timestamp header value (defaults to now)"),
                )
                .arg(
                    Arg::new("body")
                        .long("body")
                        .required(true)
                        .help("Exact request body"),
                ),
        )
        .get_matches();

    match cli.subcommand() {
        Some(("serve", args)) => serve(args).await,
        Some(("run", args)) => run(args).await,
        Some(("keygen", _)) => {
            keygen();
            Ok(())
        }
        Some(("sign", args)) => sign(args),
        _ => bail!("unknown command"),
    }
}

fn load_config(args: &ArgMatches) -> anyhow::Result<GatewayConfig> {
    let path = args
        .get_one::<PathBuf>("config")
        .context("config path missing")?;
    let config = GatewayConfig::load(path)
        .with_context(|| format!("loading {}", path.display()))?;
    telemetry::init_tracing(&config.logging)?;
    Ok(config)
}

async fn serve(args: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let state = build_state(&config)?;

    let (addr, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(config.server.bind, shutdown_signal())
        .with_context(|| format!("binding {}", config.server.bind))?;

    tracing::info!(%addr, version = scaffold_gateway::VERSION, "gateway listening");
    server.await;
    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

async fn run(args: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let spec_path = args
        .get_one::<PathBuf>("spec")
        .cloned()
        .unwrap_or_else(|| config.paths.resolved_default_spec());
    let instruction = args
        .get_one::<String>("instruction")
        .context("instruction missing")?;

    let pipeline = build_pipeline(&config)?;
    let outcome = pipeline.run(&RunRequest::new(spec_path, instruction.as_str())).await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    if !outcome.is_success() {
        bail!(outcome.message());
    }
    Ok(())
}

fn keygen() {
    let key = SigningKey::generate(&mut OsRng);
    println!("private_key = {}", hex::encode(key.to_bytes()));
    println!("public_key  = {}", hex::encode(key.verifying_key().to_bytes()));
}

fn sign(args: &ArgMatches) -> anyhow::Result<()> {
    let key_hex = args.get_one::<String>("key").context("key missing")?;
    let body = args.get_one::<String>("body").context("body missing")?;
    let timestamp = match args.get_one::<String>("timestamp") {
        Some(ts) => ts.clone(),
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)?
            .as_secs()
            .to_string(),
    };

    let bytes: [u8; 32] = hex::decode(key_hex.trim())
        .context("private key is not hex")?
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("private key must be 32 bytes, got {}", b.len()))?;
    let key = SigningKey::from_bytes(&bytes);

    let mut message = timestamp.as_bytes().to_vec();
    message.extend_from_slice(body.as_bytes());
    let signature = key.sign(&message);

    println!("X-Signature-Timestamp: {timestamp}");
    println!("X-Signature-Ed25519: {}", hex::encode(signature.to_bytes()));
    Ok(())
}
