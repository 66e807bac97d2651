use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use anyhow::Context;
use starkbank_rust::{
    client::Environment, credential::Credential, StarkClient, Error, DIGITAL_SIGNATURE_HEADER,
};

#[derive(serde::Deserialize, Debug)]
struct Config {
    project_id: String,
    private_key: String,
    #[serde(default = "default_bind_address")]
    bind_address: String,
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
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

/// POST /webhook
async fn receive_event(
    stark: web::Data<StarkClient>,
    request: HttpRequest,
    body: String,
) -> HttpResponse {
    let signature = request
        .headers()
        .get(DIGITAL_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    match stark.events.parse(&body, signature).await {
        Ok(event) => {
            tracing::info!(
                "Received event {} for subscription {:?}",
                event.id,
                event.subscription
            );
            HttpResponse::Ok().finish()
        }
        Err(Error::InvalidSignature) => {
            tracing::warn!("Rejected webhook with an invalid signature");
            HttpResponse::Unauthorized().finish()
        }
        Err(e) => {
            tracing::error!("Failed to handle webhook: {:?}", e);
            HttpResponse::BadRequest().finish()
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::read()?;

    let stark = StarkClient::new(Credential::project(
        config.project_id,
        config.private_key,
        Environment::Sandbox,
    )?)?;

    tracing::info!("Listening for webhooks on {}", config.bind_address);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(stark.clone()))
            .service(web::resource("/webhook").route(web::post().to(receive_event)))
    })
    .bind(&config.bind_address)?
    .run()
    .await?;

    Ok(())
}

#[actix_web::main]
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
