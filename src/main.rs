use std::path::PathBuf;

use alloy::primitives::Address;
use alloy::rpc::types::TransactionRequest;
use clap::{Parser, Subcommand};
use eyre::{bail, eyre, Result};
use itertools::Itertools;
use log::info;

use swapdesk::chain::account::fetch_wallet_snapshot;
use swapdesk::chain::pools::{fetch_pools, refresh_reserves};
use swapdesk::chain::router_info::get_router_info;
use swapdesk::config::Config;
use swapdesk::exchange::index::{available_tokens, counterpart_tokens, TokenNames};
use swapdesk::exchange::pool::{pools_from_json, pools_to_json, Pool};
use swapdesk::exchange::quote::FeeRate;
use swapdesk::exchange::router::unix_now;
use swapdesk::exchange::session::{SessionView, SwapSession};
use swapdesk::utils::app_context::AppContext;
use swapdesk::utils::format::{format_amount, parse_amount, shorten_address};
use swapdesk::utils::logger::setup_logger;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON-RPC endpoint, overrides `SWAPDESK_RPC_URL`
    #[arg(long, global = true)]
    rpc_url: Option<String>,
    /// Uniswap V2 router, overrides `SWAPDESK_ROUTER_ADDRESS`
    #[arg(long, global = true)]
    router: Option<Address>,
    /// Pools JSON file used instead of factory discovery, overrides `SWAPDESK_POOLS_FILE`
    #[arg(long, global = true)]
    pools: Option<PathBuf>,
    /// Share of the input that reaches the pool, e.g. `997/1000`
    #[arg(long, global = true, default_value = "997/1000")]
    fee: FeeRate,
    /// Maximum number of pairs read from the factory
    #[arg(long, global = true, default_value_t = 100)]
    limit: usize,
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the factory behind the router
    RouterInfo,
    /// Discover pools and print them as JSON
    Pools,
    /// List tradable tokens
    Tokens,
    /// List tokens that can be bought with a token
    Counterparts {
        /// Token to sell
        from: Address,
    },
    /// Quote a swap
    Quote {
        /// Token to sell
        from: Address,
        /// Token to buy
        to: Address,
        /// Amount to sell, e.g. 1.5
        amount: String,
    },
    /// Check eligibility for an account and print the call it should submit
    PlanSwap {
        /// Token to sell
        from: Address,
        /// Token to buy
        to: Address,
        /// Amount to sell, e.g. 1.5
        amount: String,
        /// Account that signs and receives
        #[arg(long)]
        account: Address,
        /// Slippage tolerance for `amountOutMin`, in basis points
        #[arg(long)]
        slippage_bps: Option<u16>,
    },
    /// Re-quote a swap every time reserves are polled
    Watch {
        /// Token to sell
        from: Address,
        /// Token to buy
        to: Address,
        /// Amount to sell, e.g. 1.5
        amount: String,
    },
}

impl Cli {
    /// Environment configuration with command line overrides applied.
    fn config(&self) -> Result<Config> {
        let mut config = Config::from_env()?;
        if let Some(rpc_url) = &self.rpc_url {
            config.rpc_url.clone_from(rpc_url);
        }
        if let Some(router) = self.router {
            config.router_address = router;
        }
        if let Some(pools) = &self.pools {
            config.pools_file = Some(pools.clone());
        }
        Ok(config)
    }
}

/// Loads pools from the pools file, or discovers them through the router's factory.
async fn load_pools(config: &Config, limit: usize) -> Result<Vec<Pool>> {
    if let Some(path) = &config.pools_file {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| eyre!("Failed to read {}: {e}", path.display()))?;
        let pools = pools_from_json(&json)?;
        info!("Loaded {} pools from {}", pools.len(), path.display());
        return Ok(pools);
    }

    let ctx = AppContext::new(config.clone())?;
    let router = get_router_info(&ctx, config.router_address).await?;
    fetch_pools(&ctx, router.factory, limit).await
}

/// A session with the tokens and amount selected.
async fn open_session(
    config: &Config,
    (limit, fee): (usize, FeeRate),
    from: Address,
    to: Address,
    amount: &str,
) -> Result<SwapSession> {
    // The session ignores amounts it cannot parse
    parse_amount(amount).map_err(|e| eyre!("Invalid amount {amount:?}: {e}"))?;

    let mut session =
        SwapSession::new(load_pools(config, limit).await?, config.router_address).with_fee(fee);
    session.select_from_token(from);
    session.select_to_token(to);
    session.set_input(amount);
    Ok(session)
}

fn print_tokens(tokens: &TokenNames) {
    for (address, name) in tokens.iter().sorted_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(b.0))) {
        println!("{address}  {name}");
    }
}

fn token_label(view: &SessionView, token: Option<Address>) -> String {
    token.map_or_else(
        || "-".to_string(),
        |token| {
            view.tokens
                .get(&token)
                .cloned()
                .unwrap_or_else(|| shorten_address(&token))
        },
    )
}

fn print_view(view: &SessionView) {
    let from = token_label(view, view.from_token);
    let to = token_label(view, view.to_token);

    match &view.pool {
        Some(pool) => println!("Pool:        {} ({from}/{to})", pool.address),
        None => println!("Pool:        none for {from}/{to}"),
    }
    println!("Amount in:   {} {from}", format_amount(view.amount_in));
    println!("Amount out:  {} {to}", format_amount(view.amount_out));
    if let Some(balance) = view.from_balance {
        println!("Balance:     {} {from}", format_amount(balance));
    }
    if let Some(balance) = view.to_balance {
        println!("Balance:     {} {to}", format_amount(balance));
    }
    let enabled = if view.eligibility.action.is_approval() {
        view.eligibility.can_approve
    } else {
        view.swap_enabled()
    };
    println!(
        "Action:      {} ({})",
        view.eligibility.action,
        if enabled { "enabled" } else { "disabled" }
    );
    if let Some(message) = &view.message {
        println!("Message:     {message}");
    }
}

fn print_request(label: &str, request: &TransactionRequest) -> Result<()> {
    if let Some(input) = request.input.input() {
        if input.len() >= 4 {
            println!("{label} selector: 0x{}", hex::encode(&input[..4]));
        }
    }
    println!("{}", serde_json::to_string_pretty(request)?);
    Ok(())
}

async fn plan_swap(
    config: &Config,
    (limit, fee): (usize, FeeRate),
    (from, to, amount): (Address, Address, &str),
    account: Address,
    slippage_bps: Option<u16>,
) -> Result<()> {
    let mut session = open_session(config, (limit, fee), from, to, amount).await?;

    let ctx = AppContext::new(config.clone())?;
    let wallet = fetch_wallet_snapshot(&ctx, account, &[from, to], config.router_address).await;
    session.update_wallet(wallet);

    let view = session.view();
    print_view(&view);

    if let Some(request) = session.approve_request() {
        return print_request("approve", &request);
    }
    if let Some(request) = session.swap_request(account, unix_now(), slippage_bps) {
        return print_request("swapExactTokensForTokens", &request);
    }
    println!("Nothing to submit");
    Ok(())
}

async fn watch(
    config: &Config,
    (limit, fee): (usize, FeeRate),
    (from, to, amount): (Address, Address, &str),
) -> Result<()> {
    let mut session = open_session(config, (limit, fee), from, to, amount).await?;
    let Some(pool) = session.view().pool else {
        bail!("No pool pairs {from} and {to}");
    };
    session.update_pools(vec![pool]);

    let ctx = AppContext::new(config.clone())?;
    let mut interval = tokio::time::interval(config.poll_interval);
    info!("Watching {from} -> {to} every {:?}", config.poll_interval);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let pools = refresh_reserves(&ctx, session.pools()).await;
                session.update_pools(pools);
                let view = session.view();
                let (reserve_in, reserve_out) = view
                    .quote
                    .as_ref()
                    .map(|quote| quote.reserves())
                    .unwrap_or_default();
                info!(
                    "{} in -> {} out (reserves {} / {})",
                    format_amount(view.amount_in),
                    format_amount(view.amount_out),
                    format_amount(reserve_in),
                    format_amount(reserve_out)
                );
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                return Ok(());
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.verbose)?;
    let config = cli.config()?;

    match cli.command {
        Commands::RouterInfo => {
            let ctx = AppContext::new(config.clone())?;
            let info = get_router_info(&ctx, config.router_address).await?;
            println!("Router:  {}", info.router);
            println!("Factory: {}", info.factory);
        }
        Commands::Pools => {
            let pools = load_pools(&config, cli.limit).await?;
            println!("{}", pools_to_json(&pools)?);
        }
        Commands::Tokens => {
            let pools = load_pools(&config, cli.limit).await?;
            print_tokens(&available_tokens(&pools));
        }
        Commands::Counterparts { from } => {
            let pools = load_pools(&config, cli.limit).await?;
            print_tokens(&counterpart_tokens(&pools, &from));
        }
        Commands::Quote { from, to, amount } => {
            let session = open_session(&config, (cli.limit, cli.fee), from, to, &amount).await?;
            print_view(&session.view());
        }
        Commands::PlanSwap {
            from,
            to,
            amount,
            account,
            slippage_bps,
        } => {
            plan_swap(&config, (cli.limit, cli.fee), (from, to, &amount), account, slippage_bps).await?;
        }
        Commands::Watch { from, to, amount } => {
            watch(&config, (cli.limit, cli.fee), (from, to, &amount)).await?;
        }
    }

    Ok(())
}
