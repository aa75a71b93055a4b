use crate::domain::model::{
    Adjustment, CatalogEntry, CostReport, CurrencyRate, ExportOptions, LineItem, SurchargeSet,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 成本計算所需的全部輸入，由 CLI 或 TOML 配置提供
pub trait ConfigProvider: Send + Sync {
    fn catalog_entries(&self) -> Vec<CatalogEntry>;
    fn catalog_file(&self) -> Option<String>;
    fn adjustments(&self) -> Vec<Adjustment>;
    fn surcharges(&self) -> SurchargeSet;
    fn currency(&self) -> CurrencyRate;
    fn export_options(&self) -> ExportOptions;
    fn output_path(&self) -> &str;
    /// 目錄為空時是否退回內建示範目錄
    fn demo_fallback(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<LineItem>>;
    async fn transform(&self, items: Vec<LineItem>) -> Result<CostReport>;
    async fn load(&self, report: CostReport) -> Result<String>;
}
