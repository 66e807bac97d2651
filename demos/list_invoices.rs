use anyhow::Context;
use futures::TryStreamExt;
use starkbank_rust::{
    apis::invoice::InvoiceBuilder, client::Environment, credential::Credential, query::Query,
    StarkClient,
};

#[derive(serde::Deserialize, Debug)]
struct Config {
    project_id: String,
    private_key: String,
    #[serde(default)]
    production: bool,
}

impl Config {
    fn read() -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("STARK"))
            .build()?
            .try_deserialize()
            .context("Failed to assemble the required configuration")
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::read()?;
    let environment = if config.production {
        Environment::Production
    } else {
        Environment::Sandbox
    };

    // Setup Stark Bank client
    let stark = StarkClient::new(Credential::project(
        config.project_id,
        config.private_key,
        environment,
    )?)?;

    // Create a new invoice
    let created = stark
        .invoices
        .create(&[InvoiceBuilder::default()
            .amount(400000)
            .tax_id("012.345.678-90")
            .name("Iron Bank S.A.")
            .tags(vec!["demo".to_string()])
            .build()?])
        .await?;
    for invoice in &created {
        tracing::info!("Created invoice {:?}: {:?}", invoice.id, invoice.brcode);
    }

    // List the most recent demo invoices, fetching pages lazily
    let mut invoices = stark
        .invoices
        .query(&Query::new().limit(30).tags(vec!["demo".to_string()]));
    while let Some(invoice) = invoices.try_next().await? {
        tracing::info!(
            "Invoice {:?}: {:.2} BRL, status {:?}",
            invoice.id,
            invoice.amount as f64 / 100.0,
            invoice.status
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

    if let Err(e) = run().await {
        tracing::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}
