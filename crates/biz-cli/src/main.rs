// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BIZCHAIN CLI - Commission & Pricing Calculator
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use biz_core::{CompensationPlan, PlanConfig};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

mod commands;

#[derive(Parser)]
#[command(name = "bizchain-cli")]
#[command(about = "BizChain - Pricing, Commission & Reward Calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Compensation plan file, TOML or JSON (reads BIZ_PLAN_FILE env var;
    /// the standard plan is used when unset)
    #[arg(short, long, env = "BIZ_PLAN_FILE")]
    plan: Option<PathBuf>,

    /// Override the checkout member discount, in basis points (takes
    /// precedence over BIZ_MEMBER_DISCOUNT_BPS)
    #[arg(long, global = true)]
    member_discount_bps: Option<u32>,

    /// Print machine-readable JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote a checkout (product discount, then member discount)
    Checkout {
        /// List price in USD (e.g. 249.99)
        #[arg(long, conflicts_with = "product", required_unless_present = "product")]
        price: Option<String>,

        /// Product discount in percent (e.g. 20)
        #[arg(long, default_value = "0")]
        discount: String,

        /// Quote a catalog product by id instead
        #[arg(long)]
        product: Option<u32>,
    },

    /// Split a payment into three-level referral commissions
    Commission {
        /// Payment amount in USD
        payment: String,

        /// Referral counts per level (e.g. 12,8,3) to total the whole network
        #[arg(long, value_delimiter = ',')]
        referrals: Option<Vec<u32>>,
    },

    /// Daily return schedule
    Daily {
        #[command(subcommand)]
        action: DailyCommands,
    },

    /// Weekly reward pool
    Pool {
        #[command(subcommand)]
        action: PoolCommands,
    },

    /// Weekly salary rank for a direct-referral count
    Salary {
        /// Direct referrals
        referrals: u32,
    },

    /// Wallet breakdown and withdrawals
    Wallet {
        #[command(subcommand)]
        action: WalletCommands,
    },

    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },

    /// Order submission and verification
    Order {
        #[command(subcommand)]
        action: OrderCommands,
    },

    /// Inspect, export or validate the compensation plan
    Plan {
        #[command(subcommand)]
        action: PlanCommands,
    },

    /// Project rate, ranks and salary for an account
    Account {
        /// Account id
        id: String,

        /// Active days elapsed
        #[arg(short, long)]
        days: u64,

        /// Referral counts per level (e.g. 12,8,3)
        #[arg(short, long, value_delimiter = ',', default_value = "0,0,0")]
        referrals: Vec<u32>,
    },
}

#[derive(Subcommand)]
enum DailyCommands {
    /// Rate for an active-day count
    Rate {
        /// Active days elapsed
        days: u64,
    },

    /// Accrue returns over a run of days
    Accrue {
        /// Principal in USD
        #[arg(short, long)]
        principal: String,

        /// First active day of the run
        #[arg(short, long, default_value = "1")]
        from: u64,

        /// Number of days to accrue
        #[arg(short, long)]
        days: u64,
    },

    /// Print the tier table
    Tiers,
}

#[derive(Subcommand)]
enum PoolCommands {
    /// Rank for a referral count
    Rank {
        /// Direct referrals
        referrals: u32,
    },

    /// Weekly share of a pool for a referral count
    Share {
        /// Pool total in USD
        #[arg(short, long)]
        total: String,

        /// Direct referrals
        #[arg(short, long)]
        referrals: u32,
    },

    /// Split a contribution across the pool buckets
    Split {
        /// Contribution in USD
        amount: String,
    },

    /// Split the $0.50 contributions of a batch of new members
    Joinings {
        /// Number of new members
        new_members: u64,
    },

    /// Plan a weekly distribution for accounts listed in a JSON file
    Plan {
        /// Pool total in USD
        #[arg(short, long)]
        total: String,

        /// JSON array of accounts
        #[arg(short, long)]
        accounts: PathBuf,
    },
}

#[derive(Subcommand)]
enum WalletCommands {
    /// Break a balance into earnings, global pool and tax
    Split {
        /// Balance in USD
        balance: String,
    },

    /// Quote a withdrawal: minimum, processing fee and net payout
    Withdraw {
        /// Amount in USD
        #[arg(short, long)]
        amount: String,

        /// Available balance in USD
        #[arg(long)]
        available: String,
    },
}

#[derive(Subcommand)]
enum CatalogCommands {
    /// List products
    List {
        /// Filter by category ("all" for everything)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,

        /// Only featured products
        #[arg(long)]
        featured: bool,
    },

    /// Show one product with its checkout quote
    Show {
        /// Product id
        id: u32,
    },
}

#[derive(Subcommand)]
enum OrderCommands {
    /// Submit an order with payment proof and save it as JSON
    Submit {
        /// Product id
        #[arg(short, long)]
        product: u32,

        /// Blockchain transaction id of the payment
        #[arg(short, long)]
        tx: String,

        /// Payment screenshot file
        #[arg(short, long)]
        screenshot: Option<PathBuf>,

        /// Where to write the order
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Move a saved order to its next status
    Advance {
        /// Order JSON file
        file: PathBuf,
    },

    /// Show a saved order
    Status {
        /// Order JSON file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum PlanCommands {
    /// Print the active plan
    Show,

    /// Write the active plan to a TOML file
    Export {
        /// Output file path
        output: PathBuf,
    },

    /// Validate a plan file without using it
    Validate {
        /// Plan file path
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if !cli.json {
        print_banner();
    }

    if let Err(e) = run(cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let plan = load_plan(cli.plan.as_deref(), cli.member_discount_bps)?;
    let ctx = commands::Context {
        plan,
        json: cli.json,
    };

    match cli.command {
        Commands::Checkout {
            price,
            discount,
            product,
        } => commands::checkout::handle(price.as_deref(), &discount, product, &ctx)?,
        Commands::Commission { payment, referrals } => {
            commands::commission::handle(&payment, referrals.as_deref(), &ctx)?
        }
        Commands::Daily { action } => commands::daily::handle(action, &ctx)?,
        Commands::Pool { action } => commands::pool::handle(action, &ctx)?,
        Commands::Salary { referrals } => commands::pool::salary(referrals, &ctx)?,
        Commands::Wallet { action } => commands::wallet::handle(action, &ctx)?,
        Commands::Catalog { action } => commands::catalog::handle(action, &ctx)?,
        Commands::Order { action } => commands::order::handle(action, &ctx)?,
        Commands::Plan { action } => commands::plan::handle(action, &ctx)?,
        Commands::Account {
            id,
            days,
            referrals,
        } => commands::plan::project(&id, days, &referrals, &ctx)?,
    }

    Ok(())
}

/// Resolve the plan: the file from `--plan` or `BIZ_PLAN_FILE`, otherwise the
/// standard plan. `BIZ_MEMBER_DISCOUNT_BPS` applies to either, and the flag
/// override applies last.
fn load_plan(
    path: Option<&Path>,
    member_discount_bps: Option<u32>,
) -> Result<CompensationPlan, Box<dyn std::error::Error>> {
    load_plan_with(path, member_discount_bps, |key| std::env::var(key).ok())
}

fn load_plan_with<F>(
    path: Option<&Path>,
    member_discount_bps: Option<u32>,
    env: F,
) -> Result<CompensationPlan, Box<dyn std::error::Error>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => PlanConfig::load_from_file(path)
            .map_err(|e| format!("Failed to load plan {}: {}", path.display(), e))?,
        None => PlanConfig::default(),
    };
    config.apply_overrides_from(env)?;
    if let Some(bps) = member_discount_bps {
        config.member_discount_bps = bps;
    }
    Ok(config.into_plan()?)
}

fn print_banner() {
    println!(
        "{}",
        "╔═══════════════════════════════════════════════╗".cyan()
    );
    println!(
        "{}",
        "║        BIZCHAIN - Reward Calculator           ║"
            .cyan()
            .bold()
    );
    println!(
        "{}",
        "║     Shop | Refer | Earn Daily | Weekly Pool   ║".cyan()
    );
    println!(
        "{}",
        "╚═══════════════════════════════════════════════╝".cyan()
    );
    println!();
}

fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

fn print_info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

fn print_warning(msg: &str) {
    println!("{} {}", "⚠".yellow().bold(), msg);
}

// ─────────────────────────────────────────────────────────────────
// UNIT TESTS
// ─────────────────────────────────────────────────────────────────
