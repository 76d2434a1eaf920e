use anyhow::Context;
use clap::Parser;
use tracing::info;

use voltbill::app::{AppConfig, AppContainer, StorageBackend};
use voltbill::domain::{format_amount, Client, Meter, Reading};
use voltbill::platform::AppPaths;
use voltbill::Error;

mod cli;

use cli::{Cli, ClientCommands, Commands, InvoiceCommands, MeterCommands, ReadingCommands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_directive = if cli.debug { "voltbill=debug" } else { "voltbill=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_directive.parse().expect("static directive parses")),
        )
        .with_writer(std::io::stderr)
        .init();

    let paths = AppPaths::new()?;
    paths.ensure_dirs_exist()?;

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load configuration from {:?}", path))?,
        None => AppConfig::load(&paths)?,
    };
    if cli.memory {
        config.storage.backend = StorageBackend::Memory;
    }
    info!("Configuration loaded");

    let container = AppContainer::new(&config, &paths)?;
    run(&cli.command, &container)?;
    Ok(())
}

fn run(command: &Commands, container: &AppContainer) -> anyhow::Result<()> {
    match command {
        Commands::Client { command } => run_client(command, container),
        Commands::Meter { command } => run_meter(command, container),
        Commands::Reading { command } => run_reading(command, container),
        Commands::Invoice { command } => run_invoice(command, container),
    }
}

fn run_client(command: &ClientCommands, container: &AppContainer) -> anyhow::Result<()> {
    match command {
        ClientCommands::Add {
            tax_id,
            name,
            email,
            address,
        } => {
            let client = Client::new(tax_id, name, email, address);
            container.clients.create(&client)?;
            println!("Registered client {} ({})", client.name, client.tax_id);
        }
        ClientCommands::List { filter } => {
            let clients = container.clients.list(filter.as_deref().unwrap_or(""))?;
            if clients.is_empty() {
                println!("No clients found");
            }
            for client in clients {
                println!(
                    "{}  {}  {}  [{}]",
                    client.tax_id, client.name, client.billing_address, client.status
                );
            }
        }
        ClientCommands::Show { tax_id } => {
            let client = container
                .clients
                .get_by_tax_id(tax_id)
                .ok_or_else(|| Error::not_found(format!("client with tax id {}", tax_id)))?;
            println!("Tax id:  {}", client.tax_id);
            println!("Name:    {}", client.name);
            println!("Email:   {}", client.email);
            println!("Address: {}", client.billing_address);
            println!("Status:  {}", client.status);
            for meter in container.meters.list_by_client(tax_id) {
                println!(
                    "Meter:   {} ({}) at {}",
                    meter.code(),
                    meter.kind(),
                    meter.supply_address()
                );
            }
        }
        ClientCommands::Rm { tax_id } => {
            if container.invoice_service.delete_client_cascade(tax_id)? {
                println!("Removed client {} and their meters", tax_id);
            } else {
                println!("No client with tax id {}", tax_id);
            }
        }
    }
    Ok(())
}

fn run_meter(command: &MeterCommands, container: &AppContainer) -> anyhow::Result<()> {
    match command {
        MeterCommands::Add {
            code,
            client,
            address,
            max_power,
            three_phase,
            power_factor,
        } => {
            container
                .clients
                .get_by_tax_id(client)
                .ok_or_else(|| Error::not_found(format!("client with tax id {}", client)))?;
            let meter = if *three_phase {
                let power_factor = power_factor.ok_or_else(|| {
                    Error::validation("--power-factor is required for three-phase meters")
                })?;
                Meter::three_phase(code, address, *max_power, power_factor)
            } else {
                if power_factor.is_some() {
                    return Err(
                        Error::validation("--power-factor only applies to three-phase meters")
                            .into(),
                    );
                }
                Meter::single_phase(code, address, *max_power)
            };
            container.meters.create(&meter, client)?;
            println!("Registered {} meter {} for client {}", meter.kind(), code, client);
        }
        MeterCommands::List { client } => {
            let meters = container.meters.list_by_client(client);
            if meters.is_empty() {
                println!("No meters for client {}", client);
            }
            for meter in meters {
                println!(
                    "{}  {}  {}  max {} kW{}",
                    meter.code(),
                    meter.kind(),
                    meter.supply_address(),
                    meter.max_power_kw(),
                    if meter.is_active() { "" } else { "  (inactive)" }
                );
            }
        }
    }
    Ok(())
}

fn run_reading(command: &ReadingCommands, container: &AppContainer) -> anyhow::Result<()> {
    match command {
        ReadingCommands::Add {
            meter,
            year,
            month,
            kwh,
        } => {
            container
                .meters
                .get_by_code(meter)
                .ok_or_else(|| Error::not_found(format!("meter with code {}", meter)))?;
            container
                .readings
                .register(&Reading::new(meter, *year, *month, *kwh))?;
            println!("Registered {} kWh for meter {} in {}/{}", kwh, meter, month, year);
        }
        ReadingCommands::Latest { meter } => match container.readings.latest(meter) {
            Some(reading) => println!(
                "{}/{}: {} kWh",
                reading.month, reading.year, reading.kwh
            ),
            None => println!("No readings for meter {}", meter),
        },
    }
    Ok(())
}

fn run_invoice(command: &InvoiceCommands, container: &AppContainer) -> anyhow::Result<()> {
    match command {
        InvoiceCommands::Emit {
            client,
            year,
            month,
        } => {
            let invoice = container.invoice_service.emit_invoice(client, *year, *month)?;
            println!("Invoice {} [{}]", invoice.id, invoice.status);
            println!("  Consumption: {} kWh", format_amount(invoice.total_kwh));
            println!("  Subtotal:    {}", format_amount(invoice.breakdown.subtotal));
            println!("  Charges:     {}", format_amount(invoice.breakdown.charges));
            println!("  Tax:         {}", format_amount(invoice.breakdown.tax));
            println!("  Total:       {}", format_amount(invoice.breakdown.total));
        }
        InvoiceCommands::List { client } => {
            let invoices = container.invoice_service.client_invoices(client)?;
            if invoices.is_empty() {
                println!("No invoices for client {}", client);
            }
            for invoice in invoices {
                println!(
                    "{}/{}  {} kWh  total {}  [{}]",
                    invoice.month,
                    invoice.year,
                    format_amount(invoice.total_kwh),
                    format_amount(invoice.breakdown.total),
                    invoice.status
                );
            }
        }
        InvoiceCommands::Export {
            client,
            year,
            month,
            output,
        } => {
            let bytes = match (year, month) {
                (Some(year), Some(month)) => container
                    .invoice_service
                    .export_invoice_pdf(client, *year, *month)?,
                _ => container.invoice_service.export_client_pdf(client)?,
            };
            std::fs::write(output, &bytes)
                .with_context(|| format!("failed to write PDF to {:?}", output))?;
            println!("Wrote {} bytes to {}", bytes.len(), output.display());
        }
    }
    Ok(())
}
