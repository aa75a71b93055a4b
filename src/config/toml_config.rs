use crate::core::{
    Adjustment, CatalogEntry, ConfigProvider, CurrencyRate, ExportOptions, SurchargeExtra,
    SurchargeSet,
};
use crate::domain::model::ReportFilenames;
use crate::utils::error::{CostError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUPPORTED_FORMATS: [&str; 3] = ["csv", "tsv", "json"];

const DEFAULT_ZIP_FILENAME: &str = "cost_report.zip";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostConfig {
    pub project: ProjectConfig,
    pub source: Option<SourceConfig>,
    pub currency: Option<CurrencyConfig>,
    pub catalog: Option<Vec<CatalogEntryConfig>>,
    pub surcharges: Option<SurchargesConfig>,
    pub adjustments: Option<Vec<AdjustmentConfig>>,
    pub export: ExportConfig,
    pub monitoring: Option<MonitoringConfig>,
    pub error_handling: Option<ErrorHandlingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub catalog_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    pub base: String,
    pub quote: String,
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntryConfig {
    pub name: String,
    pub base: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurchargesConfig {
    pub shipping: f64,
    pub fees: f64,
    pub extras: Option<Vec<ExtraConfig>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraConfig {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentConfig {
    pub name: String,
    pub amount: Option<f64>,
    pub fixed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub csv: Option<String>,
    pub tsv: Option<String>,
    pub json: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    /// 目錄為空時的行為：use_demo_catalog（預設）或 fail
    pub on_empty_catalog: Option<String>,
}

impl CostConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CostError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CostError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        // 使用正規表達式匹配 ${VAR_NAME} 格式
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        // 驗證輸出路徑
        crate::utils::validation::validate_path("export.output_path", &self.export.output_path)?;

        // 驗證輸出格式
        if self.export.output_formats.is_empty() {
            return Err(CostError::MissingConfigError {
                field: "export.output_formats".to_string(),
            });
        }
        for format in &self.export.output_formats {
            if !SUPPORTED_FORMATS.contains(&format.as_str()) {
                return Err(CostError::InvalidConfigValueError {
                    field: "export.output_formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        SUPPORTED_FORMATS.join(", ")
                    ),
                });
            }
        }

        // 驗證匯率
        if let Some(currency) = &self.currency {
            crate::utils::validation::validate_positive_amount("currency.rate", currency.rate)?;
            crate::utils::validation::validate_non_empty_string("currency.base", &currency.base)?;
            crate::utils::validation::validate_non_empty_string("currency.quote", &currency.quote)?;
        }

        // 驗證目錄項目
        if let Some(catalog) = &self.catalog {
            for entry in catalog {
                crate::utils::validation::validate_non_empty_string("catalog.name", &entry.name)?;
                crate::utils::validation::validate_non_negative_amount("catalog.base", entry.base)?;
            }
        }

        // 驗證目錄檔案副檔名
        if let Some(file) = self.source.as_ref().and_then(|s| s.catalog_file.as_deref()) {
            crate::utils::validation::validate_file_extension("source.catalog_file", file, &["csv"])?;
        }

        // 驗證附加費
        if let Some(surcharges) = &self.surcharges {
            crate::utils::validation::validate_non_negative_amount(
                "surcharges.shipping",
                surcharges.shipping,
            )?;
            crate::utils::validation::validate_non_negative_amount(
                "surcharges.fees",
                surcharges.fees,
            )?;
            for extra in surcharges.extras.iter().flatten() {
                crate::utils::validation::validate_non_negative_amount(
                    "surcharges.extras.amount",
                    extra.amount,
                )?;
            }
        }

        // 驗證調整後金額
        for adjustment in self.adjustments.iter().flatten() {
            if let Some(amount) = adjustment.amount {
                crate::utils::validation::validate_non_negative_amount(
                    "adjustments.amount",
                    amount,
                )?;
            }
        }

        // 驗證空目錄策略
        if let Some(policy) = self
            .error_handling
            .as_ref()
            .and_then(|e| e.on_empty_catalog.as_deref())
        {
            if policy != "use_demo_catalog" && policy != "fail" {
                return Err(CostError::InvalidConfigValueError {
                    field: "error_handling.on_empty_catalog".to_string(),
                    value: policy.to_string(),
                    reason: "Valid policies: use_demo_catalog, fail".to_string(),
                });
            }
        }

        Ok(())
    }

    /// 取得輸出路徑
    pub fn output_path(&self) -> &str {
        &self.export.output_path
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    /// 取得匯率設定
    pub fn currency_rate(&self) -> CurrencyRate {
        self.currency
            .as_ref()
            .map(|c| CurrencyRate::new(&c.base, &c.quote, c.rate))
            .unwrap_or_default()
    }

    /// 取得附加費設定；整節缺漏時採用內建示範值
    pub fn surcharge_set(&self) -> SurchargeSet {
        self.surcharges
            .as_ref()
            .map(|s| SurchargeSet {
                shipping: s.shipping,
                fees: s.fees,
                extras: s
                    .extras
                    .iter()
                    .flatten()
                    .map(|e| SurchargeExtra::new(&e.name, e.amount))
                    .collect(),
            })
            .unwrap_or_default()
    }
}

impl ConfigProvider for CostConfig {
    fn catalog_entries(&self) -> Vec<CatalogEntry> {
        self.catalog
            .iter()
            .flatten()
            .map(|entry| CatalogEntry::new(&entry.name, entry.base))
            .collect()
    }

    fn catalog_file(&self) -> Option<String> {
        self.source.as_ref().and_then(|s| s.catalog_file.clone())
    }

    fn adjustments(&self) -> Vec<Adjustment> {
        self.adjustments
            .iter()
            .flatten()
            .map(|a| Adjustment {
                name: a.name.clone(),
                amount: a.amount,
                fixed: a.fixed,
            })
            .collect()
    }

    fn surcharges(&self) -> SurchargeSet {
        self.surcharge_set()
    }

    fn currency(&self) -> CurrencyRate {
        self.currency_rate()
    }

    fn export_options(&self) -> ExportOptions {
        let defaults = ReportFilenames::default();
        let filenames = match &self.export.filenames {
            Some(names) => ReportFilenames {
                csv: names.csv.clone().unwrap_or(defaults.csv),
                tsv: names.tsv.clone().unwrap_or(defaults.tsv),
                json: names.json.clone().unwrap_or(defaults.json),
            },
            None => defaults,
        };

        let zip = self.export.compression.as_ref().and_then(|c| {
            c.enabled.then(|| {
                c.filename
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ZIP_FILENAME.to_string())
            })
        });

        ExportOptions {
            formats: self.export.output_formats.clone(),
            zip,
            filenames,
        }
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn demo_fallback(&self) -> bool {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_empty_catalog.as_deref())
            .map(|policy| policy != "fail")
            .unwrap_or(true)
    }
}

impl Validate for CostConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::DEFAULT_USD_TO_INR;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[project]
name = "keycap-order"
description = "Group buy landed cost"
version = "1.0.0"

[export]
output_path = "./test-output"
output_formats = ["csv", "json"]
"#;

        let config = CostConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.project.name, "keycap-order");
        assert_eq!(config.output_path(), "./test-output");
        assert!(config.demo_fallback());
        assert!(!config.monitoring_enabled());

        // 未設定 [currency] 時使用內建匯率
        let rate = config.currency_rate();
        assert_eq!(rate.base, "USD");
        assert_eq!(rate.quote, "INR");
        assert_eq!(rate.rate, DEFAULT_USD_TO_INR);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[project]
name = "full"
description = "Full config"
version = "1.0"

[source]
catalog_file = "items.csv"

[currency]
base = "USD"
quote = "INR"
rate = 88.5

[[catalog]]
name = "Keycap Set A"
base = 24.5

[[catalog]]
name = "Keycap Set B"
base = 19.9

[surcharges]
shipping = 40.0
fees = 3.5

[[surcharges.extras]]
name = "Delivery"
amount = 900.0

[[adjustments]]
name = "Keycap Set A"
amount = 22.0

[[adjustments]]
name = "Keycap Set B"
fixed = true

[export]
output_path = "./out"
output_formats = ["csv", "tsv", "json"]

[export.compression]
enabled = true

[export.filenames]
csv = "costs.csv"

[monitoring]
enabled = true

[error_handling]
on_empty_catalog = "fail"
"#;

        let config = CostConfig::from_toml_str(toml_content).unwrap();
        config.validate().unwrap();

        assert_eq!(config.catalog_entries().len(), 2);
        assert_eq!(config.catalog_file(), Some("items.csv".to_string()));
        assert_eq!(config.currency_rate().rate, 88.5);

        let surcharges = config.surcharge_set();
        assert_eq!(surcharges.shipping, 40.0);
        assert_eq!(surcharges.extras.len(), 1);

        let adjustments = config.adjustments();
        assert_eq!(adjustments[0].amount, Some(22.0));
        assert_eq!(adjustments[1].fixed, Some(true));

        let options = config.export_options();
        assert_eq!(options.zip, Some("cost_report.zip".to_string()));
        assert_eq!(options.filenames.csv, "costs.csv");
        assert_eq!(options.filenames.json, "summary.json");

        assert!(config.monitoring_enabled());
        assert!(!config.demo_fallback());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_COST_OUTPUT_DIR", "./env-output");

        let toml_content = r#"
[project]
name = "test"
description = "test"
version = "1.0"

[export]
output_path = "${TEST_COST_OUTPUT_DIR}"
output_formats = ["csv"]
"#;

        let config = CostConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_path(), "./env-output");

        std::env::remove_var("TEST_COST_OUTPUT_DIR");
    }

    #[test]
    fn test_validation_rejects_unknown_format() {
        let toml_content = r#"
[project]
name = "test"
description = "test"
version = "1.0"

[export]
output_path = "./output"
output_formats = ["csv", "xlsx"]
"#;

        let config = CostConfig::from_toml_str(toml_content).unwrap();
        let result = config.validate();

        assert!(matches!(
            result,
            Err(CostError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_empty_formats() {
        let toml_content = r#"
[project]
name = "test"
description = "test"
version = "1.0"

[export]
output_path = "./output"
output_formats = []
"#;

        let config = CostConfig::from_toml_str(toml_content).unwrap();

        assert!(matches!(
            config.validate(),
            Err(CostError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_non_positive_rate() {
        let toml_content = r#"
[project]
name = "test"
description = "test"
version = "1.0"

[currency]
base = "USD"
quote = "INR"
rate = 0.0

[export]
output_path = "./output"
output_formats = ["csv"]
"#;

        let config = CostConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unknown_fallback_policy() {
        let toml_content = r#"
[project]
name = "test"
description = "test"
version = "1.0"

[export]
output_path = "./output"
output_formats = ["csv"]

[error_handling]
on_empty_catalog = "explode"
"#;

        let config = CostConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_surcharges_default_to_stock_values() {
        let toml_content = r#"
[project]
name = "test"
description = "test"
version = "1.0"

[export]
output_path = "./output"
output_formats = ["csv"]
"#;

        let config = CostConfig::from_toml_str(toml_content).unwrap();
        let surcharges = config.surcharge_set();

        assert_eq!(surcharges.shipping, 85.0);
        assert_eq!(surcharges.fees, 6.67);
        assert_eq!(surcharges.extras.len(), 3);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[project]
name = "file-test"
description = "File test"
version = "1.0"

[export]
output_path = "./output"
output_formats = ["csv"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = CostConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.project.name, "file-test");
    }
}
