use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 目錄中的一個商品：名稱 + 基礎價格（基準貨幣）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub base: f64,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, base: f64) -> Self {
        Self {
            name: name.into(),
            base,
        }
    }
}

/// 分攤計算的輸入項目
///
/// `amount` 是可編輯金額，預設等於 `base_amount`；
/// `fixed` 項目不參與附加費分攤。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub base_amount: f64,
    pub amount: f64,
    #[serde(default)]
    pub fixed: bool,
}

impl LineItem {
    pub fn new(name: impl Into<String>, base_amount: f64) -> Self {
        Self {
            name: name.into(),
            base_amount,
            amount: base_amount,
            fixed: false,
        }
    }
}

impl From<CatalogEntry> for LineItem {
    fn from(entry: CatalogEntry) -> Self {
        LineItem::new(entry.name, entry.base)
    }
}

/// 對單一項目的調整：改金額、標記固定，或兩者
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub name: String,
    pub amount: Option<f64>,
    pub fixed: Option<bool>,
}

/// 基準貨幣與報價貨幣之間的靜態匯率
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub base: String,
    pub quote: String,
    pub rate: f64,
}

/// 出廠預設的 USD→INR 匯率
pub const DEFAULT_USD_TO_INR: f64 = 90.51799464;

impl CurrencyRate {
    pub fn new(base: impl Into<String>, quote: impl Into<String>, rate: f64) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
            rate,
        }
    }

    /// 基準貨幣 → 報價貨幣
    pub fn to_quote(&self, base_amount: f64) -> f64 {
        base_amount * self.rate
    }

    /// 報價貨幣 → 基準貨幣
    pub fn to_base(&self, quote_amount: f64) -> f64 {
        quote_amount / self.rate
    }
}

impl Default for CurrencyRate {
    fn default() -> Self {
        Self::new("USD", "INR", DEFAULT_USD_TO_INR)
    }
}

/// 報價貨幣計價的附加費（例如當地配送費）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurchargeExtra {
    pub name: String,
    pub amount: f64,
}

impl SurchargeExtra {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// 要分攤到商品上的全部附加費
///
/// `shipping` 與 `fees` 以基準貨幣計價，`extras` 以報價貨幣計價，
/// 加總前先按匯率換算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurchargeSet {
    pub shipping: f64,
    pub fees: f64,
    #[serde(default)]
    pub extras: Vec<SurchargeExtra>,
}

impl SurchargeSet {
    /// 換算成單一基準貨幣金額
    pub fn total_in_base(&self, currency: &CurrencyRate) -> f64 {
        let extras_quote: f64 = self.extras.iter().map(|e| e.amount).sum();
        self.shipping + self.fees + currency.to_base(extras_quote)
    }
}

impl Default for SurchargeSet {
    fn default() -> Self {
        // 出廠預設附加費
        Self {
            shipping: 85.0,
            fees: 6.67,
            extras: vec![
                SurchargeExtra::new("Extra 1", 360.62),
                SurchargeExtra::new("Extra 2", 242.24),
                SurchargeExtra::new("Delivery", 4680.0),
            ],
        }
    }
}

/// 單項分攤結果，順序與輸入一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocatedItem {
    pub name: String,
    pub final_amount: f64,
}

/// 附加費是否實際被分攤出去
///
/// 沒有可變項目（或可變小計不為正）時分攤會被跳過，
/// 附加費保持未分配；這是合法結果，不是錯誤。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DistributionOutcome {
    Applied,
    Skipped { undistributed: f64 },
}

impl DistributionOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, DistributionOutcome::Skipped { .. })
    }

    pub fn undistributed(&self) -> f64 {
        match self {
            DistributionOutcome::Applied => 0.0,
            DistributionOutcome::Skipped { undistributed } => *undistributed,
        }
    }
}

/// `allocate` 的輸出，每次呼叫重新計算
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationResult {
    pub items: Vec<AllocatedItem>,
    pub ratio: f64,
    pub total_final: f64,
    pub outcome: DistributionOutcome,
}

/// 成本報表的一列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub name: String,
    pub base_amount: f64,
    pub amount: f64,
    pub fixed: bool,
    pub final_amount: f64,
    pub final_quote: f64,
}

/// transform 階段的輸出：分攤後的完整成本報表
#[derive(Debug, Clone)]
pub struct CostReport {
    pub rows: Vec<ReportRow>,
    pub ratio: f64,
    pub surcharge_total: f64,
    pub total_final: f64,
    pub total_quote: f64,
    pub currency: CurrencyRate,
    pub outcome: DistributionOutcome,
    pub generated_at: DateTime<Utc>,
}

/// 輸出檔名，未設定時使用預設值
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFilenames {
    pub csv: String,
    pub tsv: String,
    pub json: String,
}

impl Default for ReportFilenames {
    fn default() -> Self {
        Self {
            csv: "report.csv".to_string(),
            tsv: "report.tsv".to_string(),
            json: "summary.json".to_string(),
        }
    }
}

/// load 階段的輸出設定
///
/// `zip` 為 Some 時所有檔案打包成單一 ZIP。
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub formats: Vec<String>,
    pub zip: Option<String>,
    pub filenames: ReportFilenames,
}
