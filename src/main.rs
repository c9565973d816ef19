use std::sync::Arc;

use clap::Parser;
use restack::api::{AccountApi, ApiError, Gw2Client};
use restack::config::Config;
use restack::messaging::{LogListener, Messaging};
use restack::model::Model;
use restack::models::ItemForDisplay;

#[derive(Debug, Parser)]
#[command(name = "restack", version, about = "GW2 inventory cleanup advisor")]
struct Cli {
    /// GW2 account API keys; falls back to GW2_API_KEYS (comma separated)
    api_keys: Vec<String>,

    /// Also consider Food/Utility consumables for stack-merge advice
    #[arg(long)]
    include_consumables: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let env_cfg = Config::from_env()?;

    let api_keys = if cli.api_keys.is_empty() {
        env_cfg.api_keys
    } else {
        cli.api_keys
    };
    if api_keys.is_empty() {
        anyhow::bail!("no API keys given; pass them as arguments or set GW2_API_KEYS");
    }
    let include_consumables = cli.include_consumables || env_cfg.include_consumables;

    let mut apis: Vec<Arc<dyn AccountApi>> = Vec::new();
    for key in &api_keys {
        match Gw2Client::connect(key.clone()).await {
            Ok(client) => apis.push(Arc::new(client)),
            Err(ApiError::InvalidAccessToken) => {
                anyhow::bail!("API key is invalid: {key}");
            }
            Err(ApiError::MissingPermission(permission)) => {
                anyhow::bail!("API key {key} lacks the '{permission}' permission");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let messaging = Arc::new(Messaging::new());
    messaging.add_listener(Arc::new(LogListener));

    let mut model = Model::new(apis, messaging, include_consumables);

    // Ctrl-C cancels the load; partial results are discarded.
    let abort = model.abort_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            abort.abort();
        }
    });

    tracing::info!("Starting to load account data");
    match model.load().await {
        Ok(()) => tracing::info!("Account data loaded"),
        Err(e) if e.is_aborted() => {
            tracing::info!("Aborted by user");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    print_advice("Restack", model.advice_stacks());
    print_advice("Gobble", model.gobble_advice());
    print_advice("Sell to vendor", model.vendor_advice());
    print_advice("Rare salvage", model.rare_salvage_advice());
    print_advice("Craft luck", model.craft_luck_advice());
    print_advice("Play", model.play_to_consume_advice());
    print_advice("Delete", model.just_delete_advice());
    print_advice("Misc", model.misc_advice());
    print_advice("Karma", model.karma_advice());
    print_advice("Salvage", model.just_salvage_advice());
    print_advice("Living story currencies", model.ls_currency_advice());
    print_advice("Craft ingredients away", model.craft_advice());

    Ok(())
}

fn print_advice(name: &str, advices: &[ItemForDisplay]) {
    println!("----------");
    println!("{name}");
    println!("----------");
    for entry in advices {
        let name = entry
            .item
            .name
            .clone()
            .unwrap_or_else(|| format!("item {}", entry.item.item_id));
        println!("{name}");
        if let Some(advice) = &entry.advice {
            println!("\tAdvice: {advice}");
        }
        println!("\tSources:");
        for source in &entry.sources {
            println!("\t\t{} {}@{}", source.count, source.place, source.account);
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, prelude::*};

    color_eyre::install().unwrap();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::uptime()),
        )
        .with(tracing_error::ErrorLayer::default())
        .init();
}
