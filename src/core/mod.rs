pub mod allocator;
pub mod engine;

pub use crate::domain::model::{
    Adjustment, AllocatedItem, AllocationResult, CatalogEntry, CostReport, CurrencyRate,
    DistributionOutcome, ExportOptions, LineItem, ReportRow, SurchargeExtra, SurchargeSet,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
