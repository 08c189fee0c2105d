//! DPoS wallet command line: inspect and refresh the local account cache.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use dpos_peer::PeerClient;
use dpos_store_lmdb::LmdbEnvironment;
use dpos_types::{format_units, parse_units, Address, Timestamp, VotedDelegate};
use dpos_utils::{humanize_elapsed, LogFormat};
use dpos_wallet_core::{AccountService, WalletConfig};

type Service = AccountService<PeerClient, LmdbEnvironment>;

#[derive(Parser)]
#[command(name = "dpos-wallet", about = "DPoS wallet account cache")]
struct Cli {
    /// Base URL of the peer HTTP API.
    #[arg(long, env = "DPOS_PEER_URL")]
    peer_url: Option<String>,

    /// Directory holding the LMDB cache.
    #[arg(long, env = "DPOS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Upper bound on a single peer request, in seconds.
    #[arg(long, env = "DPOS_REQUEST_TIMEOUT")]
    request_timeout_secs: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "DPOS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "DPOS_LOG_FORMAT")]
    log_format: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "DPOS_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Cached accounts.
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Recent transactions of an account, newest first.
    Transactions {
        address: Address,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// Delegate lookups.
    Delegate {
        #[command(subcommand)]
        action: DelegateAction,
    },
    /// Votes cast by an account.
    Votes {
        #[command(subcommand)]
        action: VotesAction,
    },
    /// Virtual ledger folders.
    Folder {
        #[command(subcommand)]
        action: FolderAction,
    },
    /// Resolve the published sponsor delegates.
    Sponsors {
        /// Override the sponsor list location.
        #[arg(long)]
        url: Option<String>,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[derive(clap::Subcommand)]
enum AccountAction {
    /// Fetch an account from the peer and cache it.
    Fetch {
        address: Address,
        /// Fetch without writing the cache.
        #[arg(long)]
        forget: bool,
    },
    /// Show the cached record of an account.
    Show { address: Address },
    /// List accounts with a name or a virtual ledger.
    List,
    /// Remove an account and everything cached for it.
    Delete { address: Address },
    /// Give an account a local name.
    Name { address: Address, username: String },
}

#[derive(clap::Subcommand)]
enum DelegateAction {
    /// Look a delegate up by public key or username.
    Get {
        #[arg(long, conflicts_with = "username", required_unless_present = "username")]
        public_key: Option<String>,
        #[arg(long)]
        username: Option<String>,
    },
    /// Search delegates by name fragment.
    Search { term: String },
}

#[derive(clap::Subcommand)]
enum VotesAction {
    /// Fetch the delegates an account votes for.
    Refresh { address: Address },
    /// Plan the vote batches that move the cached vote set to `target`.
    Plan {
        address: Address,
        /// Delegate usernames, comma-separated. Omit to unvote everything.
        #[arg(long, value_delimiter = ',')]
        target: Vec<String>,
    },
}

#[derive(clap::Subcommand)]
enum FolderAction {
    /// Budget an amount (in coins) into a folder.
    Set {
        address: Address,
        folder: String,
        amount: String,
    },
    /// Remove a folder.
    Delete { address: Address, folder: String },
}

/// Merge the optional config file with flag and env overrides.
///
/// Returns the effective config and, when the file could not be used, the
/// reason, so it can be logged once tracing is up.
fn resolve_config(cli: &Cli) -> (WalletConfig, Option<String>) {
    let (mut config, warning) = match &cli.config {
        Some(path) => match WalletConfig::from_toml_file(&path.to_string_lossy()) {
            Ok(config) => (config, None),
            Err(e) => (
                WalletConfig::default(),
                Some(format!("ignoring config file {}: {e}", path.display())),
            ),
        },
        None => (WalletConfig::default(), None),
    };

    if let Some(peer_url) = &cli.peer_url {
        config.peer_url = peer_url.clone();
    }
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(secs) = cli.request_timeout_secs {
        config.request_timeout_secs = secs;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    (config, warning)
}

fn open_service(config: &WalletConfig) -> anyhow::Result<Service> {
    let env = LmdbEnvironment::open(&config.data_dir, config.map_size_bytes())
        .with_context(|| format!("opening cache at {}", config.data_dir.display()))?;
    let peer = PeerClient::new(
        config.peer_url.clone(),
        config.request_timeout(),
        config.connect_timeout(),
    )?;
    Ok(AccountService::new(peer, env, config.request_timeout()))
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn signed_units(total: i64) -> String {
    let sign = if total < 0 { "-" } else { "" };
    format!("{sign}{}", format_units(total.unsigned_abs()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, warning) = resolve_config(&cli);

    let format: LogFormat = config.log_format.parse()?;
    dpos_utils::init_tracing(&config.log_level, format)?;
    if let Some(warning) = warning {
        tracing::warn!("{warning}");
    }

    if let Command::Config = cli.command {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let service = open_service(&config)?;
    tracing::debug!(peer = %config.peer_url, data_dir = %config.data_dir.display(), "wallet ready");
    run(&service, &config, cli.command, cli.json).await
}

async fn run(
    service: &Service,
    config: &WalletConfig,
    command: Command,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        Command::Account { action } => match action {
            AccountAction::Fetch { address, forget } => {
                let account = if forget {
                    service.fetch_account_and_forget(&address).await?
                } else {
                    service.fetch_account(&address).await?
                };
                emit(json, &account, || {
                    format!("{}  {}", account.address, format_units(account.balance))
                })?;
            }
            AccountAction::Show { address } => {
                let account = service
                    .get_account(&address)?
                    .with_context(|| format!("{address} is not cached"))?;
                emit(json, &account, || {
                    let mut out = format!(
                        "address:  {}\nbalance:  {}\nname:     {}",
                        account.address,
                        format_units(account.balance),
                        account.username.as_deref().unwrap_or("-"),
                    );
                    if account.is_cold() {
                        out.push_str("\n(cold wallet)");
                    }
                    if let Some(delegate) = &account.delegate {
                        out.push_str(&format!("\ndelegate: {} (rank {})", delegate.username, delegate.rank));
                    }
                    if let Some(ledger) = &account.virtual_ledger {
                        for folder in ledger.folders() {
                            let amount = ledger.display_amount(folder).unwrap_or_default();
                            out.push_str(&format!("\nfolder {folder}: {amount}"));
                        }
                    }
                    out
                })?;
            }
            AccountAction::List => {
                let accounts = service.load_all_accounts()?;
                emit(json, &accounts, || {
                    accounts
                        .iter()
                        .map(|a| {
                            format!(
                                "{}  {:>16}  {}",
                                a.address,
                                format_units(a.balance),
                                a.username.as_deref().unwrap_or("")
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                })?;
            }
            AccountAction::Delete { address } => {
                let account = service.get_account(&address)?;
                let deleted = service.delete_account(account)?;
                emit(json, &deleted, || match &deleted {
                    Some(a) => format!("deleted {}", a.address),
                    None => format!("{address} was not cached"),
                })?;
            }
            AccountAction::Name { address, username } => {
                service.set_username(&address, &username)?;
                let name = service.get_username(&address)?;
                emit(json, &name, || format!("{address} is now {name}"))?;
            }
        },
        Command::Transactions {
            address,
            offset,
            limit,
        } => {
            let transactions = service.get_transactions(&address, offset, limit).await?;
            let now = Timestamp::now();
            emit(json, &transactions, || {
                transactions
                    .iter()
                    .map(|tx| {
                        format!(
                            "{:<14} {:>18}  {}  {}",
                            tx.label,
                            signed_units(tx.total),
                            humanize_elapsed(tx.timestamp, now),
                            tx.id
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Command::Delegate { action } => match action {
            DelegateAction::Get {
                public_key,
                username,
            } => {
                let delegate = match (public_key, username) {
                    (Some(pk), _) => service.get_delegate(&pk).await?,
                    (None, Some(name)) => service.get_delegate_by_username(&name).await?,
                    (None, None) => anyhow::bail!("pass --public-key or --username"),
                };
                emit(json, &delegate, || {
                    format!(
                        "{} #{}  {}  votes {}  productivity {:.2}%",
                        delegate.username,
                        delegate.rank,
                        delegate.address,
                        format_units(delegate.vote),
                        delegate.productivity
                    )
                })?;
            }
            DelegateAction::Search { term } => {
                let delegates = service.search_delegates(&term).await?;
                emit(json, &delegates, || {
                    delegates
                        .iter()
                        .map(|d| format!("#{:<4} {:<20} {}", d.rank, d.username, d.public_key))
                        .collect::<Vec<_>>()
                        .join("\n")
                })?;
            }
        },
        Command::Votes { action } => match action {
            VotesAction::Refresh { address } => {
                let voted = service.get_voted_delegates(&address).await?;
                emit(json, &voted, || {
                    voted
                        .iter()
                        .map(|d| format!("{:<20} {}", d.username, d.public_key))
                        .collect::<Vec<_>>()
                        .join("\n")
                })?;
            }
            VotesAction::Plan { address, target } => {
                let mut delegates = Vec::with_capacity(target.len());
                for username in &target {
                    let info = service.get_delegate_by_username(username).await?;
                    delegates.push(VotedDelegate::from(info));
                }
                let batches = service.plan_vote_diff(&address, &delegates)?;
                emit(json, &batches, || {
                    if batches.is_empty() {
                        return "votes already match".to_string();
                    }
                    batches
                        .iter()
                        .enumerate()
                        .map(|(i, batch)| {
                            let votes: Vec<String> = batch
                                .iter()
                                .map(|a| format!("{}{}", a.vote, a.username))
                                .collect();
                            format!("batch {}: {}", i + 1, votes.join(" "))
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                })?;
            }
        },
        Command::Folder { action } => match action {
            FolderAction::Set {
                address,
                folder,
                amount,
            } => {
                let units = parse_units(&amount)?;
                let ledger = service.set_to_folder(&address, &folder, units)?;
                emit(json, &ledger, || {
                    format!("{folder} set, {} budgeted", format_units(ledger.total()))
                })?;
            }
            FolderAction::Delete { address, folder } => {
                let ledger = service.delete_folder(&address, &folder)?;
                emit(json, &ledger, || {
                    format!("{} folders left", ledger.folders().len())
                })?;
            }
        },
        Command::Sponsors { url } => {
            let url = url.unwrap_or_else(|| config.sponsors_url.clone());
            let report = service.get_sponsors(&url).await?;
            for failure in &report.failures {
                tracing::warn!(public_key = %failure.public_key, reason = %failure.reason, "sponsor skipped");
            }
            emit(json, &report, || {
                report
                    .delegates
                    .iter()
                    .map(|d| format!("#{:<4} {}", d.rank, d.username))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Command::Config => {}
    }
    Ok(())
}
