use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use tradebook::TradebookError;
use tradebook::config::fetch_config;
use tradebook::dashboard::{self, DashboardView};
use tradebook::fees::{TradeQuote, compute_trade};
use tradebook::format::npr;
use tradebook::models::TradeType;
use tradebook::models::trade::{Trade, TradeOrder};
use tradebook::store::{HttpTradeStore, TradeStore};

#[derive(Parser, Debug)]
#[command(name = "tradebook")]
#[command(about = "NEPSE trade journal: fee calculator and portfolio dashboard", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price an order locally without saving it
    Calc(OrderArgs),
    /// Print the active fee schedule
    Schedule,
    #[command(flatten)]
    Remote(RemoteCommand),
}

/// Commands that talk to the trade store.
#[derive(Subcommand, Debug)]
enum RemoteCommand {
    /// Save an order to the trade store
    Add(OrderArgs),
    /// List saved trades, newest first
    Trades,
    /// Show a single saved trade
    Show {
        /// Trade id
        id: u64,
    },
    /// Re-price and replace a saved trade
    Edit {
        /// Trade id
        id: u64,
        #[command(flatten)]
        order: OrderArgs,
    },
    /// Delete a saved trade
    Delete {
        /// Trade id
        id: u64,
    },
    /// Fetch trades and print dashboard statistics
    Dashboard,
    /// Print the statistics computed by the trade store itself
    Stats,
}

#[derive(Args, Debug)]
struct OrderArgs {
    /// Ticker symbol, e.g. NABIL
    #[arg(short, long)]
    symbol: String,

    /// BUY or SELL
    #[arg(short = 't', long = "type")]
    trade_type: TradeType,

    /// Number of shares
    #[arg(short, long, allow_hyphen_values = true)]
    quantity: i64,

    /// Price per share
    #[arg(short, long, allow_hyphen_values = true)]
    price: Decimal,

    /// Acquisition price (SELL only)
    #[arg(short, long)]
    buy_price: Option<Decimal>,
}

impl From<OrderArgs> for TradeOrder {
    fn from(args: OrderArgs) -> Self {
        TradeOrder {
            symbol: args.symbol,
            trade_type: args.trade_type,
            quantity: args.quantity,
            price: args.price,
            buy_price: args.buy_price,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), TradebookError> {
    // Initialize tracing subscriber for logging output (honours RUST_LOG).
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let app_config = fetch_config()?;
    let schedule = app_config.fee_schedule()?;

    match cli.command {
        Commands::Calc(args) => {
            let quote = compute_trade(&args.into(), &schedule)?;
            print_quote(&quote);
        }
        Commands::Schedule => print!("{}", schedule.describe()),
        Commands::Remote(command) => {
            let store = HttpTradeStore::new(&app_config.api, schedule)?;
            run_remote(command, &store).await?;
        }
    }

    Ok(())
}

async fn run_remote(command: RemoteCommand, store: &HttpTradeStore) -> Result<(), TradebookError> {
    match command {
        RemoteCommand::Add(args) => {
            let trade = store.create_trade(&args.into()).await?;
            print_trade_row(&trade);
        }
        RemoteCommand::Trades => {
            let trades = store.list_trades().await?;
            if trades.is_empty() {
                println!("No trades recorded");
            }
            for trade in &trades {
                print_trade_row(trade);
            }
        }
        RemoteCommand::Show { id } => {
            let trade = store.get_trade(id).await?;
            print_trade_row(&trade);
        }
        RemoteCommand::Edit { id, order } => {
            let trade = store.update_trade(id, &order.into()).await?;
            print_trade_row(&trade);
        }
        RemoteCommand::Delete { id } => {
            store.delete_trade(id).await?;
            println!("Deleted trade {id}");
        }
        RemoteCommand::Dashboard => {
            let view = dashboard::refresh(store).await?;
            print!("{view}");
        }
        RemoteCommand::Stats => {
            let view = DashboardView::from_snapshot(store.fetch_stats().await?);
            print!("{view}");
        }
    }
    Ok(())
}

fn print_quote(quote: &TradeQuote) {
    println!("{} {} x {} @ {}", quote.trade_type, quote.symbol, quote.quantity, quote.price);
    println!("  Gross amount:       {:>20}", npr(quote.gross_amount));
    println!("  Broker commission:  {:>20}", npr(quote.broker_commission));
    println!("  SEBON fee:          {:>20}", npr(quote.sebon_fee));
    println!("  DP charge:          {:>20}", npr(quote.dp_charge));
    println!("  Capital gain tax:   {:>20}", npr(quote.capital_gain_tax));
    println!("  Net amount:         {:>20}", npr(quote.net_amount));
}

fn print_trade_row(trade: &Trade) {
    println!(
        "#{:<5} {} {:<4} {:<8} {:>6} @ {:>10}  net {:>18}",
        trade.id,
        trade.created_at.format("%Y-%m-%d %H:%M"),
        trade.trade_type,
        trade.symbol,
        trade.quantity,
        trade.price,
        npr(trade.net_amount)
    );
}

