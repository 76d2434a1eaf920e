use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "voltbill")]
#[command(about = "Utility billing manager for clients, meters, readings and invoices")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Use the in-memory storage backend (nothing is persisted)
    #[arg(long)]
    pub memory: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage clients
    Client {
        #[command(subcommand)]
        command: ClientCommands,
    },

    /// Manage meters
    Meter {
        #[command(subcommand)]
        command: MeterCommands,
    },

    /// Manage consumption readings
    Reading {
        #[command(subcommand)]
        command: ReadingCommands,
    },

    /// Emit, list and export invoices
    Invoice {
        #[command(subcommand)]
        command: InvoiceCommands,
    },
}

#[derive(Subcommand)]
pub enum ClientCommands {
    /// Register a new client
    Add {
        /// Tax id (RUT) of the client
        tax_id: String,

        /// Full name
        #[arg(short, long)]
        name: String,

        /// Contact email
        #[arg(short, long)]
        email: String,

        /// Billing address (addresses mentioning "empresa" or "local" are
        /// billed with the commercial tariff)
        #[arg(short, long)]
        address: String,
    },

    /// List clients, optionally filtered by name or tax id
    List {
        /// Substring to match against name or tax id
        filter: Option<String>,
    },

    /// Show one client
    Show { tax_id: String },

    /// Remove a client and their meters (readings and invoices are kept)
    Rm { tax_id: String },
}

#[derive(Subcommand)]
pub enum MeterCommands {
    /// Register a new meter for a client
    Add {
        /// Meter code
        code: String,

        /// Tax id of the owning client
        #[arg(short, long)]
        client: String,

        /// Supply address
        #[arg(short, long)]
        address: String,

        /// Maximum power in kW
        #[arg(short, long)]
        max_power: f64,

        /// Register a three-phase meter instead of a single-phase one
        #[arg(long)]
        three_phase: bool,

        /// Power factor (three-phase meters only)
        #[arg(long)]
        power_factor: Option<f64>,
    },

    /// List the meters of a client
    List {
        /// Tax id of the client
        client: String,
    },
}

#[derive(Subcommand)]
pub enum ReadingCommands {
    /// Register the consumption reading of a meter for one period
    Add {
        /// Meter code
        meter: String,

        /// Billing year
        #[arg(short, long)]
        year: i32,

        /// Billing month (1-12)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,

        /// Kilowatt-hours read
        #[arg(short, long)]
        kwh: f64,
    },

    /// Show the most recent reading of a meter
    Latest {
        /// Meter code
        meter: String,
    },
}

#[derive(Subcommand)]
pub enum InvoiceCommands {
    /// Emit the invoice for a client and period (idempotent)
    Emit {
        /// Tax id of the client
        client: String,

        /// Billing year
        #[arg(short, long)]
        year: i32,

        /// Billing month (1-12)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },

    /// List the invoices of a client
    List {
        /// Tax id of the client
        client: String,
    },

    /// Export invoices to a PDF file
    Export {
        /// Tax id of the client
        client: String,

        /// Billing year (exports every stored invoice when omitted)
        #[arg(short, long, requires = "month")]
        year: Option<i32>,

        /// Billing month (1-12)
        #[arg(short, long, requires = "year", value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}
