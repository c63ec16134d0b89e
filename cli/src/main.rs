//! votable — command-line front end for a token kept in a snapshot file.
//!
//! Every command loads the snapshot, runs one operation and, if the
//! operation changed state, writes the snapshot back. Results are printed
//! to stdout as JSON; logs go to stderr.

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use votable_token::{TokenConfig, TokenSnapshot, TokenStatus, Vault, VotableToken};
use votable_types::{
    Address, Clock, CurrencyAmount, Price, ReferralChain, SystemClock, Timestamp, TokenAmount,
};
use votable_utils::{format_duration, init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "votable", about = "Buy, sell and vote on the price of a votable token")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "VOTABLE_CONFIG")]
    config: Option<PathBuf>,

    /// Snapshot file holding the token state.
    #[arg(long, env = "VOTABLE_STATE_FILE")]
    state_file: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VOTABLE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VOTABLE_LOG_FORMAT")]
    log_format: Option<String>,

    /// Treat this Unix time (seconds) as "now" instead of the system clock.
    #[arg(long, env = "VOTABLE_NOW")]
    now: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create a new token and write its snapshot.
    Init {
        /// Owner (0x-hex or label); defaults to the configured owner.
        #[arg(long)]
        owner: Option<String>,

        /// Overwrite an existing snapshot.
        #[arg(long)]
        force: bool,
    },
    /// Buy tokens with currency at the current price.
    Buy {
        payer: String,
        value: u128,
        #[arg(long = "referrer")]
        referrers: Vec<String>,
    },
    /// Sell tokens back to the treasury.
    Sell {
        seller: String,
        amount: u128,
        #[arg(long = "referrer")]
        referrers: Vec<String>,
    },
    /// Vote for a price with the voter's whole balance.
    Vote {
        voter: String,
        price: u128,
        #[arg(long = "referrer")]
        referrers: Vec<String>,
    },
    /// Finalize the current voting epoch (owner only).
    EndVote {
        /// Caller; defaults to the owner.
        #[arg(long)]
        caller: Option<String>,
    },
    /// Burn the pending fee revenue.
    BurnFee,
    /// Move tokens between holders.
    Transfer { from: String, to: String, amount: u128 },
    /// Show a holder's balance and vote.
    Balance { holder: String },
    /// Show the current token price.
    Price,
    /// List the proposals of the current epoch, heaviest first.
    Prices,
    /// Summarize the token state.
    Status,
}

/// Wall clock, or a fixed instant for scripting.
enum CliClock {
    System(SystemClock),
    Fixed(Timestamp),
}

impl CliClock {
    fn new(fixed: Option<u64>) -> Self {
        match fixed {
            Some(secs) => Self::Fixed(Timestamp::new(secs)),
            None => Self::System(SystemClock),
        }
    }
}

impl Clock for CliClock {
    fn now(&self) -> Timestamp {
        match self {
            Self::System(clock) => clock.now(),
            Self::Fixed(now) => *now,
        }
    }
}

#[derive(Serialize)]
struct BalanceView {
    holder: Address,
    balance: TokenAmount,
    voted_price: Option<Price>,
    credited_referrer: Address,
}

#[derive(Serialize)]
struct PriceView {
    price: Price,
}

#[derive(Serialize)]
struct PricesView {
    prices: Vec<Price>,
    weights: Vec<TokenAmount>,
    total_votes: TokenAmount,
}

#[derive(Serialize)]
struct StatusView {
    #[serde(flatten)]
    status: TokenStatus,
    epoch_remaining: String,
}

fn holder(reference: &str) -> anyhow::Result<Address> {
    Address::resolve(reference).with_context(|| format!("bad holder reference {reference:?}"))
}

fn referral_chain(referrers: &[String]) -> anyhow::Result<ReferralChain> {
    let addresses = referrers
        .iter()
        .map(|r| holder(r))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(ReferralChain::new(addresses)?)
}

fn load_config(cli: &Cli) -> anyhow::Result<TokenConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = TokenConfig::from_toml_file(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            tracing::debug!("Loaded config from {}", path.display());
            config
        }
        None => TokenConfig::default(),
    };
    if let Some(state_file) = &cli.state_file {
        config.state_file = state_file.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    Ok(config)
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Run one command and return its JSON output.
fn run(cli: Cli, config: &TokenConfig) -> anyhow::Result<String> {
    let clock = CliClock::new(cli.now);
    let state_file = &config.state_file;

    if let Command::Init { owner, force } = &cli.command {
        if state_file.exists() && !force {
            anyhow::bail!(
                "{} already exists; pass --force to overwrite",
                state_file.display()
            );
        }
        let owner = match owner {
            Some(reference) => holder(reference)?,
            None => config.owner_address()?,
        };
        let params = config.protocol_params()?;
        let vault = Vault::with_reserve(config.treasury_reserve());
        let token = VotableToken::new(owner, params, vault, clock)?;
        token.snapshot().save_to(state_file)?;
        tracing::info!(path = %state_file.display(), %owner, "token initialized");
        return to_json(&token.status());
    }

    let snapshot = TokenSnapshot::load_from(state_file).with_context(|| {
        format!(
            "no token state at {}; run `votable init` first",
            state_file.display()
        )
    })?;
    let mut token = VotableToken::restore(snapshot, clock)?;

    let (output, changed) = match cli.command {
        Command::Init { .. } => anyhow::bail!("init does not operate on existing state"),
        Command::Buy {
            payer,
            value,
            referrers,
        } => {
            let receipt = token.buy(
                &holder(&payer)?,
                CurrencyAmount::new(value),
                &referral_chain(&referrers)?,
            )?;
            (to_json(&receipt)?, true)
        }
        Command::Sell {
            seller,
            amount,
            referrers,
        } => {
            let receipt = token.sell(
                &holder(&seller)?,
                TokenAmount::new(amount),
                &referral_chain(&referrers)?,
            )?;
            (to_json(&receipt)?, true)
        }
        Command::Vote {
            voter,
            price,
            referrers,
        } => {
            let receipt = token.vote(&holder(&voter)?, price, &referral_chain(&referrers)?)?;
            (to_json(&receipt)?, true)
        }
        Command::EndVote { caller } => {
            let caller = match caller {
                Some(reference) => holder(&reference)?,
                None => token.owner(),
            };
            (to_json(&token.end_vote(&caller)?)?, true)
        }
        Command::BurnFee => (to_json(&token.burn_fee()?)?, true),
        Command::Transfer { from, to, amount } => {
            let receipt = token.transfer(&holder(&from)?, &holder(&to)?, TokenAmount::new(amount))?;
            (to_json(&receipt)?, true)
        }
        Command::Balance { holder: reference } => {
            let address = holder(&reference)?;
            let view = BalanceView {
                holder: address,
                balance: token.balance_of(&address),
                voted_price: token.voter(&address).map(|record| record.price),
                credited_referrer: token.credited_referrer(&address),
            };
            (to_json(&view)?, false)
        }
        Command::Price => (
            to_json(&PriceView {
                price: token.token_price(),
            })?,
            false,
        ),
        Command::Prices => {
            let (prices, weights) = token.prices_list();
            let view = PricesView {
                prices,
                weights,
                total_votes: token.total_votes_counted(),
            };
            (to_json(&view)?, false)
        }
        Command::Status => {
            let status = token.status();
            let epoch_remaining = format_duration(status.epoch.remaining_secs(status.now));
            (
                to_json(&StatusView {
                    status,
                    epoch_remaining,
                })?,
                false,
            )
        }
    };

    if changed {
        token.snapshot().save_to(state_file)?;
    }
    Ok(output)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let format: LogFormat = config.log_format.parse()?;
    init_logging(format, &config.log_level)?;

    let output = run(cli, &config)?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use votable_types::SECONDS_PER_WEEK;

    const T0: u64 = 1_700_000_000;

    fn exec(state: &std::path::Path, now: u64, args: &[&str]) -> anyhow::Result<serde_json::Value> {
        let mut argv = vec![
            "votable".to_string(),
            "--state-file".to_string(),
            state.display().to_string(),
            "--now".to_string(),
            now.to_string(),
        ];
        argv.extend(args.iter().map(|a| a.to_string()));
        let cli = Cli::try_parse_from(argv)?;
        let config = load_config(&cli)?;
        let output = run(cli, &config)?;
        Ok(serde_json::from_str(&output)?)
    }

    #[test]
    fn init_then_status() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state.bin");
        exec(&state, T0, &["init"]).unwrap();

        let status = exec(&state, T0, &["status"]).unwrap();
        assert_eq!(status["price"], 2);
        assert_eq!(status["total_supply"], 50_000);
        assert_eq!(status["owner"], Address::from_label("owner").to_string());
        assert_eq!(status["epoch_remaining"], "7d 0h");
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state.bin");
        exec(&state, T0, &["init"]).unwrap();
        assert!(exec(&state, T0, &["init"]).is_err());
        assert!(exec(&state, T0, &["init", "--force"]).is_ok());
    }

    #[test]
    fn commands_persist_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state.bin");
        exec(&state, T0, &["init"]).unwrap();

        let bought = exec(&state, T0, &["buy", "alice", "1000"]).unwrap();
        assert_eq!(bought["tokens_out"], 500);

        let balance = exec(&state, T0, &["balance", "alice"]).unwrap();
        assert_eq!(balance["balance"], 500);

        exec(&state, T0, &["vote", "owner", "5", "--referrer", "bob"]).unwrap();
        let prices = exec(&state, T0, &["prices"]).unwrap();
        assert_eq!(prices["prices"][0], 5);

        let balance = exec(&state, T0, &["balance", "owner"]).unwrap();
        assert_eq!(balance["credited_referrer"], Address::from_label("bob").to_string());

        exec(&state, T0 + SECONDS_PER_WEEK, &["end-vote"]).unwrap();
        let price = exec(&state, T0 + SECONDS_PER_WEEK, &["price"]).unwrap();
        assert_eq!(price["price"], 5);

        let burned = exec(&state, T0 + SECONDS_PER_WEEK, &["burn-fee"]).unwrap();
        assert_eq!(burned["burned"], 5);
    }

    #[test]
    fn failed_command_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state.bin");
        exec(&state, T0, &["init"]).unwrap();
        let before = std::fs::read(&state).unwrap();

        let err = exec(&state, T0, &["sell", "alice", "1"]).unwrap_err();
        assert_eq!(err.to_string(), "Insufficient balance");
        assert_eq!(std::fs::read(&state).unwrap(), before);
    }

    #[test]
    fn missing_state_points_at_init() {
        let dir = tempfile::tempdir().unwrap();
        let err = exec(&dir.path().join("missing.bin"), T0, &["price"]).unwrap_err();
        assert!(err.to_string().contains("votable init"));
    }

    #[test]
    fn too_many_referrers_is_rejected() {
        let chain: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert!(referral_chain(&chain).is_err());
        assert_eq!(referral_chain(&chain[..3]).unwrap().len(), 3);
    }

    #[test]
    fn fixed_clock_overrides_system_time() {
        assert_eq!(CliClock::new(Some(42)).now(), Timestamp::new(42));
    }
}
