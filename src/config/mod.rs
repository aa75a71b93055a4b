pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{
    Adjustment, CatalogEntry, ConfigProvider, CurrencyRate, ExportOptions, SurchargeExtra,
    SurchargeSet,
};
#[cfg(feature = "cli")]
use crate::domain::model::{ReportFilenames, DEFAULT_USD_TO_INR};
#[cfg(feature = "cli")]
use crate::utils::error::{CostError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// 快速模式：所有輸入都走命令列旗標，目錄可用 CSV 或內建示範目錄
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "landed-cost")]
#[command(about = "Distributes shipping and fee surcharges across a product catalog")]
pub struct CliConfig {
    /// 運費（基準幣）
    #[arg(long, default_value = "85.0")]
    pub shipping: f64,

    /// 手續費（基準幣）
    #[arg(long, default_value = "6.67")]
    pub fees: f64,

    /// 額外費用一（報價幣，換算後計入）
    #[arg(long, default_value = "360.62")]
    pub extra1: f64,

    /// 額外費用二（報價幣，換算後計入）
    #[arg(long, default_value = "242.24")]
    pub extra2: f64,

    /// 末端配送費（報價幣，換算後計入）
    #[arg(long, default_value = "4680.0")]
    pub delivery: f64,

    /// USD 對 INR 匯率
    #[arg(long, default_value_t = DEFAULT_USD_TO_INR)]
    pub rate: f64,

    /// 固定項目名單,不參與分攤
    #[arg(long, value_delimiter = ',')]
    pub fix: Vec<String>,

    /// 目錄 CSV 檔（欄位：name,base）
    #[arg(long)]
    pub catalog: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub formats: Vec<String>,

    #[arg(long, help = "Bundle exports into a single ZIP file")]
    pub zip: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system resource monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn catalog_entries(&self) -> Vec<CatalogEntry> {
        // 快速模式不帶內嵌目錄，走 CSV 或示範目錄
        Vec::new()
    }

    fn catalog_file(&self) -> Option<String> {
        self.catalog.clone()
    }

    fn adjustments(&self) -> Vec<Adjustment> {
        self.fix
            .iter()
            .map(|name| Adjustment {
                name: name.clone(),
                amount: None,
                fixed: Some(true),
            })
            .collect()
    }

    fn surcharges(&self) -> SurchargeSet {
        SurchargeSet {
            shipping: self.shipping,
            fees: self.fees,
            extras: vec![
                SurchargeExtra::new("Extra 1", self.extra1),
                SurchargeExtra::new("Extra 2", self.extra2),
                SurchargeExtra::new("Delivery", self.delivery),
            ],
        }
    }

    fn currency(&self) -> CurrencyRate {
        CurrencyRate::new("USD", "INR", self.rate)
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            formats: self.formats.clone(),
            zip: self.zip.then(|| "cost_report.zip".to_string()),
            filenames: ReportFilenames::default(),
        }
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn demo_fallback(&self) -> bool {
        true
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_positive_amount("rate", self.rate)?;
        crate::utils::validation::validate_non_negative_amount("shipping", self.shipping)?;
        crate::utils::validation::validate_non_negative_amount("fees", self.fees)?;
        crate::utils::validation::validate_path("output-path", &self.output_path)?;

        if let Some(catalog) = &self.catalog {
            crate::utils::validation::validate_file_extension("catalog", catalog, &["csv"])?;
        }

        for format in &self.formats {
            if !toml_config::SUPPORTED_FORMATS.contains(&format.as_str()) {
                return Err(CostError::InvalidConfigValueError {
                    field: "formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        toml_config::SUPPORTED_FORMATS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig::parse_from(["landed-cost"])
    }

    #[test]
    fn test_cli_defaults_match_stock_order() {
        let config = base_config();

        assert_eq!(config.shipping, 85.0);
        assert_eq!(config.fees, 6.67);
        assert_eq!(config.rate, DEFAULT_USD_TO_INR);

        let surcharges = config.surcharges();
        assert_eq!(surcharges.extras.len(), 3);
        assert_eq!(surcharges.extras[2].amount, 4680.0);
    }

    #[test]
    fn test_fix_flag_becomes_fixed_adjustments() {
        let config = CliConfig::parse_from(["landed-cost", "--fix", "Item A,Item B"]);

        let adjustments = config.adjustments();
        assert_eq!(adjustments.len(), 2);
        assert_eq!(adjustments[0].name, "Item A");
        assert_eq!(adjustments[0].fixed, Some(true));
        assert_eq!(adjustments[1].name, "Item B");
    }

    #[test]
    fn test_zip_flag_enables_bundling() {
        let config = CliConfig::parse_from(["landed-cost", "--zip"]);

        let options = config.export_options();
        assert_eq!(options.zip, Some("cost_report.zip".to_string()));
    }

    #[test]
    fn test_validate_rejects_bad_rate() {
        let config = CliConfig::parse_from(["landed-cost", "--rate", "0"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let config = CliConfig::parse_from(["landed-cost", "--formats", "csv,parquet"]);
        assert!(config.validate().is_err());
    }
}
