use clap::{Parser, Subcommand};
use splitledger::commands;
use splitledger::config::CONFIG;
use splitledger::{InMemoryLedger, LedgerError, SettlementService, UserId, ZeroTransferPolicy};
use std::error::Error;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "splitledger")]
#[command(about = "Settle shared expenses with as few transfers as possible")]
struct Cli {
    /// Ledger snapshot (JSON). Falls back to `LEDGER_PATH`.
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    /// Leave zero-amount transfers out of the output.
    #[arg(long, global = true)]
    skip_zero: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Settle a JSON list of `{"user_id", "net"}` balances.
    Settle {
        balances: PathBuf,
        /// Reject duplicate users and balances that do not sum to zero.
        #[arg(long)]
        strict: bool,
    },
    /// Settle a single expense from the ledger.
    Expense { expense_id: String },
    /// Settle every expense of a group together.
    Group { group_id: String },
    /// Show what each counterparty owes a user across all expenses.
    Balance { user_id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(CONFIG.log_level.as_str())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let policy = commands::zero_transfer_policy(cli.skip_zero, CONFIG.zero_transfers);

    if let Err(e) = run(cli, policy).await {
        error!("{}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(cli: Cli, policy: ZeroTransferPolicy) -> Result<(), Box<dyn Error>> {
    let output = match cli.command {
        Command::Settle { balances, strict } => {
            let raw = tokio::fs::read_to_string(&balances).await?;
            commands::settle_balances(&raw, strict, policy)?
        }
        Command::Expense { expense_id } => {
            let service = load_service(cli.ledger, policy).await?;
            commands::settle_expense(&service, &expense_id).await?
        }
        Command::Group { group_id } => {
            let service = load_service(cli.ledger, policy).await?;
            commands::settle_group(&service, &group_id).await?
        }
        Command::Balance { user_id } => {
            let service = load_service(cli.ledger, policy).await?;
            commands::user_balances(&service, &UserId(user_id)).await?
        }
    };

    println!("{}", output);
    Ok(())
}

async fn load_service(
    ledger: Option<PathBuf>,
    policy: ZeroTransferPolicy,
) -> Result<SettlementService<InMemoryLedger>, Box<dyn Error>> {
    let path = ledger
        .or_else(|| CONFIG.ledger_path.as_ref().map(PathBuf::from))
        .ok_or_else(|| LedgerError::SnapshotError("No ledger snapshot given (use --ledger or LEDGER_PATH)".to_string()))?;

    let json = tokio::fs::read_to_string(&path).await?;
    let ledger = InMemoryLedger::from_json(&json)?;
    info!("Loaded ledger from {}", path.display());
    Ok(SettlementService::with_policy(ledger, policy))
}
