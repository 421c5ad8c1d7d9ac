//! Gateway CLI
//!
//! Command-line interface for the payment gateway API, for manual runs
//! against the sandbox. Credentials come from SANDBOX_API_KEY /
//! LIVE_API_KEY / MODE.

use anyhow::Result;
use clap::{Parser, Subcommand};

use gateway_client::GatewayClient;
use gateway_types::{
    Amount, Credentials, PaymentRequest, Response, SimulateTransferRequest, TransferRequest,
};

#[derive(Parser)]
#[command(name = "gateway")]
#[command(author, version, about = "Payment gateway CLI client", long_about = None)]
struct Cli {
    /// Override the gateway base URL (defaults per mode)
    #[arg(long, env = "GATEWAY_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Card payment operations
    Pay {
        #[command(subcommand)]
        action: PayCommands,
    },
    /// Bank transfer operations
    Transfer {
        #[command(subcommand)]
        action: TransferCommands,
    },
}

#[derive(Subcommand)]
enum PayCommands {
    /// Initiate a card payment and print the checkout URL payload
    Initiate {
        /// Amount as a decimal string, e.g. 50 or 49.99
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "NGN")]
        currency: String,
        #[arg(long)]
        email: String,
        /// Customer display name
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        meta: String,
        /// URL the customer is redirected to after checkout
        #[arg(long)]
        callback: String,
    },
    /// Confirm the status of an initiated payment
    Confirm {
        /// Transaction reference from a prior initiation
        tx_ref: String,
    },
}

#[derive(Subcommand)]
enum TransferCommands {
    /// Initiate a bank transfer and print the virtual account details
    Initiate {
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "NGN")]
        currency: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        meta: String,
        #[arg(long)]
        callback: String,
    },
    /// Simulate settlement of an initiated transfer (sandbox only)
    Simulate {
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "NGN")]
        currency: String,
        /// Transaction reference from the transfer initiation
        #[arg(long = "ref")]
        client_transaction_ref: String,
    },
}

fn parse_amount(s: &str) -> Result<Amount> {
    s.parse()
        .map_err(|e| anyhow::anyhow!("Invalid amount {s:?}: {e}"))
}

fn print_response(response: &Response) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let credentials = Credentials::from_env()?;
    let mut client = GatewayClient::new(credentials);
    if let Some(base_url) = cli.base_url {
        client = client.with_base_url(base_url);
    }

    match cli.command {
        Commands::Pay { action } => match action {
            PayCommands::Initiate {
                amount,
                currency,
                email,
                name,
                meta,
                callback,
            } => {
                let request = PaymentRequest {
                    amount: parse_amount(&amount)?,
                    currency,
                    email,
                    customer_name: name,
                    meta,
                    callback_url: callback,
                    is_api: true,
                };
                let response = client.initiate_payment(&request).await?;
                print_response(&response)?;
            }
            PayCommands::Confirm { tx_ref } => {
                let response = client.confirm_payment(&tx_ref).await?;
                print_response(&response)?;
            }
        },

        Commands::Transfer { action } => match action {
            TransferCommands::Initiate {
                amount,
                currency,
                email,
                name,
                description,
                meta,
                callback,
            } => {
                let request = TransferRequest {
                    amount: parse_amount(&amount)?,
                    currency,
                    email,
                    customer_name: name,
                    description,
                    meta,
                    callback_url: callback,
                };
                let response = client.initiate_transfer(&request).await?;
                print_response(&response)?;
            }
            TransferCommands::Simulate {
                amount,
                currency,
                client_transaction_ref,
            } => {
                let request = SimulateTransferRequest {
                    amount: parse_amount(&amount)?,
                    currency,
                    client_transaction_ref,
                };
                let response = client.simulate_transfer(&request).await?;
                print_response(&response)?;
            }
        },
    }

    Ok(())
}
