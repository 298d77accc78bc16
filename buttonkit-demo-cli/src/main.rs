//! Buttonkit Demo CLI
//!
//! Command-line interface for exploring Buttonkit render decisions.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "buttonkit-demo")]
#[command(about = "Buttonkit Demo CLI - Explore payment button render decisions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Session identifier used for deterministic experiment bucketing
    #[arg(long, global = true, default_value = "demo-session")]
    session: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide which payment buttons render for a merchant setup
    Buttons {
        /// Platform preset: desktop, ios-safari, android-chrome, headless
        #[arg(short, long, default_value = "desktop")]
        platform: String,

        /// Funding source marked eligible by the SDK (repeatable)
        #[arg(short, long, value_name = "SOURCE")]
        eligible: Vec<String>,

        /// Funding source explicitly enabled on the SDK URL (repeatable)
        #[arg(long, value_name = "SOURCE")]
        enable: Vec<String>,

        /// Pin one funding source to the front of the render list
        #[arg(long, value_name = "SOURCE")]
        funding_source: Option<String>,

        /// Report host Apple Pay support to the resolver
        #[arg(long)]
        apple_pay: bool,

        /// Vault a billing agreement during checkout
        #[arg(long)]
        billing_agreement: bool,

        /// Set up a subscription during checkout
        #[arg(long)]
        subscription: bool,

        /// Load the SDK configuration from a JSON file instead of flags
        #[arg(long, value_name = "FILE")]
        config: Option<String>,
    },

    /// Resolve the checkout flow for a set of merchant intents
    Flow {
        /// Vault a billing agreement during checkout
        #[arg(long)]
        billing_agreement: bool,

        /// Set up a subscription during checkout
        #[arg(long)]
        subscription: bool,
    },

    /// Show the Venmo experiment enrollment for an environment
    Experiment {
        /// Platform preset: desktop, ios-safari, android-chrome, headless
        #[arg(short, long, default_value = "ios-safari")]
        platform: String,

        /// Mark Venmo eligible in the SDK eligibility table
        #[arg(long)]
        eligible: bool,

        /// Explicitly enable Venmo on the SDK URL
        #[arg(long)]
        enable: bool,
    },

    /// Walk a scripted Apple Pay session through the sheet lifecycle
    ApplePay {
        /// Merchant country code
        #[arg(long, default_value = "US")]
        country: String,

        /// Transaction currency code
        #[arg(long, default_value = "USD")]
        currency: String,

        /// Grand total shown on the sheet
        #[arg(long, default_value = "24.99")]
        amount: String,

        /// Label shown next to the total
        #[arg(long, default_value = "Demo Store")]
        label: String,

        /// Reject the selected shipping contact with a validation error
        #[arg(long)]
        reject_contact: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("buttonkit_demo_cli=debug,buttonkit_lib=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("buttonkit_demo_cli=info,buttonkit_lib=warn")
            .init();
    }

    // Dispatch commands
    match cli.command {
        Commands::Buttons {
            platform,
            eligible,
            enable,
            funding_source,
            apple_pay,
            billing_agreement,
            subscription,
            config,
        } => {
            commands::buttons::run(
                &platform,
                &eligible,
                &enable,
                funding_source.as_deref(),
                apple_pay,
                billing_agreement,
                subscription,
                config.as_deref(),
                &cli.session,
                cli.verbose,
            )?;
        }
        Commands::Flow {
            billing_agreement,
            subscription,
        } => {
            commands::flow::run(billing_agreement, subscription, cli.verbose)?;
        }
        Commands::Experiment {
            platform,
            eligible,
            enable,
        } => {
            commands::experiment::run(&platform, eligible, enable, &cli.session, cli.verbose)?;
        }
        Commands::ApplePay {
            country,
            currency,
            amount,
            label,
            reject_contact,
        } => {
            commands::apple_pay::run(
                &country,
                &currency,
                &amount,
                &label,
                reject_contact,
                cli.verbose,
            )?;
        }
    }

    Ok(())
}
