use anyhow::Context;
use clap::{Parser, Subcommand};
use music3_client::error::{Error, Result as ClientResult};
use music3_client::provider::{read_keypair, WALLET_ENV};
use futures::StreamExt;
use music3_client::{logging, AccountWatcher, ApiClient, Program, Provider, Workspace};
use solana_sdk::pubkey::Pubkey;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "music3", version, about = "Call the music3 program and backend")]
struct Cli {
    /// Directory to search for Anchor.toml (defaults to the current directory)
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    /// Program name as listed in Anchor.toml
    #[arg(long, global = true, default_value = "music3_program")]
    program: String,

    /// Use this program id instead of looking it up
    #[arg(long, global = true)]
    program_id: Option<Pubkey>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Invoke `initialize` and print the transaction signature
    Initialize,
    /// Invoke `create_candy_machine` and print the transaction signature
    CreateCandyMachine,
    /// Print the account stored at an address
    Account {
        /// Account address
        pubkey: Pubkey,
    },
    /// Stream changes to accounts owned by the program until interrupted
    Watch,
    /// Obtain a backend JWT by signing a challenge with the wallet
    Login {
        /// Backend address
        #[arg(long, env = "MUSIC3_API_URL", default_value = music3_client::api::DEFAULT_API_URL)]
        api_url: String,
        /// Token lifetime in seconds
        #[arg(long, default_value_t = 3600)]
        duration: u64,
    },
    /// Upload a music file to the backend
    Upload {
        /// Backend address
        #[arg(long, env = "MUSIC3_API_URL", default_value = music3_client::api::DEFAULT_API_URL)]
        api_url: String,
        /// Token from `login`
        #[arg(long, env = "MUSIC3_JWT")]
        jwt: String,
        /// File to upload
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    match &cli.command {
        Command::Initialize => {
            let program = resolve_program(&cli)?;
            let tx = program.methods().initialize().rpc().await?;
            println!("Your transaction signature {tx}");
        }
        Command::CreateCandyMachine => {
            let program = resolve_program(&cli)?;
            let tx = program.methods().create_candy_machine().rpc().await?;
            println!("Your transaction signature {tx}");
        }
        Command::Account { pubkey } => {
            let provider = resolve_provider(&discover(&cli)?)?;
            let account = provider.account(pubkey).await?;
            println!("{account:#?}");
        }
        Command::Watch => {
            let program = resolve_program(&cli)?;
            let watcher = AccountWatcher::connect(program.provider().cluster()).await?;
            let (mut updates, unsubscribe) =
                watcher.program_subscribe(&program.id(), None).await?;
            loop {
                tokio::select! {
                    update = updates.next() => match update {
                        Some(update) => {
                            println!("{} {} {:?}", update.slot, update.pubkey, update.account)
                        }
                        None => break,
                    },
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
            drop(updates);
            unsubscribe().await;
            watcher.shutdown().await?;
        }
        Command::Login { api_url, duration } => {
            let wallet = std::env::var(WALLET_ENV).map_err(|_| Error::MissingEnv(WALLET_ENV))?;
            let keypair = read_keypair(Path::new(&wallet))?;
            let grant = ApiClient::new(api_url)?.login(&keypair, *duration).await?;
            println!("{}", grant.jwt);
        }
        Command::Upload { api_url, jwt, file } => {
            let bytes = tokio::fs::read(file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let receipt = ApiClient::new(api_url)?.upload(jwt, bytes).await?;
            tracing::info!(file = %file.display(), stored = ?receipt.files, "uploaded");
            for name in receipt.files {
                println!("{name}");
            }
        }
    }
    Ok(())
}

fn discover(cli: &Cli) -> anyhow::Result<ClientResult<Workspace>> {
    let start = match &cli.workspace {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    Ok(Workspace::discover(&start))
}

/// Environment provider first; the workspace's `[provider]` when the
/// environment does not name one.
fn resolve_provider(workspace: &ClientResult<Workspace>) -> ClientResult<Provider> {
    Provider::env_or_else(|name| match workspace {
        Ok(workspace) => workspace.provider(),
        Err(_) => Err(Error::MissingEnv(name)),
    })
}

fn resolve_program(cli: &Cli) -> anyhow::Result<Program> {
    let workspace = discover(cli)?;
    let provider = resolve_provider(&workspace)?;
    if let Some(id) = cli.program_id {
        return Ok(Program::new(id, provider));
    }
    let workspace = workspace.context("cannot resolve the program id")?;
    Ok(workspace.program(&provider, &cli.program)?)
}
