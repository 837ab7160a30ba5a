use anyhow::Result;
use retail_banking_chain::{
    Error, app,
    chain::Stage,
    config::{self, BackendKind, Config},
};
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::info;

fn init_tracing(config: &Config) {
    // RUST_LOG overrides the configured level; logs go to stderr so stdout
    // only carries the chain output.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logs.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.logs.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn banner(backend: BackendKind) -> &'static str {
    match backend {
        BackendKind::Local => "Retail Banking Assistant - Local Model Chain",
        BackendKind::Hosted => "Retail Banking Assistant - Prompt Chain",
    }
}

async fn run(config: Config) -> Result<()> {
    println!("{}", banner(config.backend));

    let setup = match app::prepare(&config).await {
        Ok(setup) => setup,
        Err(e) if e.is_preflight() => {
            eprintln!("Error: {}", e);
            if let Some(hint) = app::remediation(&e) {
                eprintln!("   {}", hint);
            }
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    if !setup.available_models.is_empty() {
        println!("Available models: {}", setup.available_models.join(", "));
    }
    for stage in Stage::ALL {
        println!("Using {} for {}", setup.chain.backend(stage).model, stage);
    }

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(b"\nEnter customer details or query: ")
        .await?;
    stdout.flush().await?;

    let mut stdin = BufReader::new(tokio::io::stdin());
    let input = app::read_customer_input(&mut stdin).await?;

    let chain = &setup.chain;
    let result = chain
        .run_with_observer(&input, |stage, completion| {
            let model = &chain.backend(stage).model;
            println!("{}", app::format_stage_output(stage, model, completion));
        })
        .await;

    match result {
        Ok(result) => {
            info!(
                "Chain finished (recommendations fallback: {}, risk analysis fallback: {})",
                result.recommendations.is_fallback(),
                result.risk_analysis.is_fallback()
            );
            Ok(())
        }
        Err(Error::EmptyInput) => {
            println!("Please provide customer information to proceed.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);
    info!("Configuration loaded, backend: {:?}", config.backend);

    tokio::select! {
        result = run(config) => {
            if let Err(e) = result {
                eprintln!("Application error: {}", e);
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nGoodbye!");
            // A pending stdin read sits on a blocking thread that runtime
            // shutdown would wait for, so leave without unwinding the runtime.
            std::process::exit(0);
        }
    }

    Ok(())
}
