use clap::Parser;
use phone_billing::utils::error::ErrorSeverity;
use phone_billing::utils::{logger, validation::Validate};
use phone_billing::{BillingError, BillingPipeline, CliConfig, EtlEngine, LocalStorage};

fn exit_code(e: &BillingError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(stage: &str, e: BillingError) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        stage,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting phone-billing");

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => fail("Failed to load configuration", e),
    };
    tracing::debug!("Effective config: {:?}", config);

    if let Err(e) = config.validate() {
        fail("Configuration validation failed", e);
    }

    let storage = LocalStorage::new(config.base_dir.clone());
    let pipeline = BillingPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Billing run completed successfully!");
            println!("📁 Report saved to: {}", output_path);
        }
        Err(e) => fail("Billing run failed", e),
    }

    Ok(())
}
