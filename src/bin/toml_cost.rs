use clap::Parser;
use landed_cost::config::toml_config::CostConfig;
use landed_cost::core::ConfigProvider;
use landed_cost::utils::{logger, validation::Validate};
use landed_cost::CostingEngine;
use landed_cost::CostingPipeline;
use landed_cost::LocalStorage;

#[derive(Parser)]
#[command(name = "toml-cost")]
#[command(about = "Landed cost calculator with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "cost-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override output path from config
    #[arg(long)]
    output_path: Option<String>,

    /// Dry run - show what would be calculated without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based landed cost tool");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match CostConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(output_path) = &args.output_path {
        config.export.output_path = output_path.clone();
        tracing::info!("🔧 Output path overridden to: {}", output_path);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和管道
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = CostingPipeline::new(storage, config);

    // 創建分攤引擎並運行
    let engine = CostingEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Cost report completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Cost report completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Cost report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                landed_cost::utils::error::ErrorSeverity::Low => 0, // 警告，但成功
                landed_cost::utils::error::ErrorSeverity::Medium => 2, // 輸入內容錯誤
                landed_cost::utils::error::ErrorSeverity::High => 1, // 處理錯誤
                landed_cost::utils::error::ErrorSeverity::Critical => 3, // 系統錯誤
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &CostConfig, args: &Args) {
    let currency = config.currency_rate();

    println!("📋 Configuration Summary:");
    println!(
        "  Project: {} v{}",
        config.project.name, config.project.version
    );
    println!(
        "  Currency: {} -> {} @ {}",
        currency.base, currency.quote, currency.rate
    );

    let inline_count = config.catalog_entries().len();
    match config.catalog_file() {
        Some(file) if inline_count == 0 => println!("  Catalog: file '{}'", file),
        _ if inline_count > 0 => println!("  Catalog: {} inline items", inline_count),
        _ => println!("  Catalog: built-in demo catalog"),
    }

    let adjustments = config.adjustments();
    if !adjustments.is_empty() {
        println!("  Adjustments: {}", adjustments.len());
    }

    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.export.output_formats.join(", "));

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(config: &CostConfig) -> Result<(), Box<dyn std::error::Error>> {
    let currency = config.currency_rate();
    let surcharges = config.surcharges();

    println!("🔍 Dry Run Analysis:");
    println!();

    // 附加費換算分析
    println!("💰 Surcharge Breakdown ({}):", currency.base);
    println!("  Shipping: {:.2}", surcharges.shipping);
    println!("  Fees: {:.2}", surcharges.fees);

    for extra in &surcharges.extras {
        println!(
            "  {}: {:.2} {} -> {:.2} {}",
            extra.name,
            extra.amount,
            currency.quote,
            currency.to_base(extra.amount),
            currency.base
        );
    }

    let total = surcharges.total_in_base(&currency);
    println!("  Total to distribute: {:.2} {}", total, currency.base);

    // 目錄來源分析
    println!();
    println!("📦 Catalog Source:");
    let inline = config.catalog_entries();
    if !inline.is_empty() {
        println!("  {} inline items", inline.len());
        let subtotal: f64 = inline.iter().map(|e| e.base).sum();
        println!("  Inline subtotal: {:.2} {}", subtotal, currency.base);
    } else if let Some(file) = config.catalog_file() {
        println!("  CSV file: {}", file);
    } else if config.demo_fallback() {
        println!("  Built-in demo catalog (18 items)");
    } else {
        println!("  ⚠️ Empty catalog and demo fallback disabled - run would fail");
    }

    // 調整分析
    let adjustments = config.adjustments();
    if !adjustments.is_empty() {
        println!();
        println!("🔧 Adjustments:");
        for adjustment in &adjustments {
            match (adjustment.amount, adjustment.fixed) {
                (Some(amount), Some(true)) => {
                    println!("  {} -> {:.2}, fixed", adjustment.name, amount)
                }
                (Some(amount), _) => println!("  {} -> {:.2}", adjustment.name, amount),
                (None, Some(true)) => println!("  {} -> fixed", adjustment.name),
                _ => println!("  {} -> no-op", adjustment.name),
            }
        }
    }

    // 輸出分析
    println!();
    println!("💾 Output Configuration:");
    println!("  Path: {}", config.output_path());
    println!("  Formats: {}", config.export.output_formats.join(", "));

    let options = config.export_options();
    if let Some(zip) = &options.zip {
        println!("  Compression: {} (ZIP)", zip);
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
