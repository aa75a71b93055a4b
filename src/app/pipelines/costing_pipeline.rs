use crate::core::allocator::allocate;
use crate::core::{
    CatalogEntry, ConfigProvider, CostReport, DistributionOutcome, LineItem, Pipeline, ReportRow,
    Storage,
};
use crate::domain::catalog::demo_catalog;
use crate::utils::error::{CostError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// 成本分攤管道：收集目錄與調整 → 分攤附加費 → 匯出報表
pub struct CostingPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CostingPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CostingPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<LineItem>> {
        // 目錄來源優先序：配置內嵌 → CSV 檔 → 內建示範目錄
        let mut entries = self.config.catalog_entries();

        if entries.is_empty() {
            if let Some(path) = self.config.catalog_file() {
                tracing::info!("📂 Reading catalog from: {}", path);
                let bytes = self.storage.read_file(&path).await?;
                entries = parse_catalog_csv(&bytes)?;
                tracing::debug!("Catalog file yielded {} entries", entries.len());
            }
        }

        if entries.is_empty() {
            if self.config.demo_fallback() {
                tracing::warn!("📝 No catalog configured, using the built-in demo catalog");
                entries = demo_catalog();
            } else {
                return Err(CostError::ValidationError {
                    message: "catalog is empty and demo fallback is disabled".to_string(),
                });
            }
        }

        let mut items: Vec<LineItem> = entries.into_iter().map(LineItem::from).collect();

        // 套用調整：改金額、標記固定；同名取第一個
        for adjustment in self.config.adjustments() {
            match items.iter_mut().find(|i| i.name == adjustment.name) {
                Some(item) => {
                    if let Some(amount) = adjustment.amount {
                        tracing::debug!(
                            "Adjusting '{}' amount: {} -> {}",
                            item.name,
                            item.amount,
                            amount
                        );
                        item.amount = amount;
                    }
                    if let Some(fixed) = adjustment.fixed {
                        item.fixed = fixed;
                    }
                }
                None => tracing::warn!(
                    "⚠️ Adjustment references unknown item '{}', skipping",
                    adjustment.name
                ),
            }
        }

        let fixed_count = items.iter().filter(|i| i.fixed).count();
        if fixed_count > 0 {
            tracing::info!("📌 {} of {} items marked as fixed", fixed_count, items.len());
        }

        Ok(items)
    }

    async fn transform(&self, items: Vec<LineItem>) -> Result<CostReport> {
        let currency = self.config.currency();
        let surcharges = self.config.surcharges();
        let surcharge_total = surcharges.total_in_base(&currency);

        tracing::info!(
            "💰 Surcharge total: {:.2} {} (shipping {:.2}, fees {:.2}, {} extras)",
            surcharge_total,
            currency.base,
            surcharges.shipping,
            surcharges.fees,
            surcharges.extras.len()
        );

        let allocation = allocate(&items, surcharge_total);

        if let DistributionOutcome::Skipped { undistributed } = allocation.outcome {
            tracing::warn!(
                "⚠️ No variable items with a positive subtotal; {:.2} {} left undistributed",
                undistributed,
                currency.base
            );
        }

        let rows: Vec<ReportRow> = items
            .iter()
            .zip(allocation.items.iter())
            .map(|(item, allocated)| ReportRow {
                name: item.name.clone(),
                base_amount: item.base_amount,
                amount: item.amount,
                fixed: item.fixed,
                final_amount: allocated.final_amount,
                final_quote: currency.to_quote(allocated.final_amount),
            })
            .collect();

        let total_quote = currency.to_quote(allocation.total_final);

        Ok(CostReport {
            rows,
            ratio: allocation.ratio,
            surcharge_total,
            total_final: allocation.total_final,
            total_quote,
            currency,
            outcome: allocation.outcome,
            generated_at: chrono::Utc::now(),
        })
    }

    async fn load(&self, report: CostReport) -> Result<String> {
        let options = self.config.export_options();
        let mut files: Vec<(String, Vec<u8>)> = Vec::new();

        for format in &options.formats {
            match format.as_str() {
                "csv" => files.push((
                    options.filenames.csv.clone(),
                    render_delimited(&report, b',')?,
                )),
                "tsv" => files.push((
                    options.filenames.tsv.clone(),
                    render_delimited(&report, b'\t')?,
                )),
                "json" => files.push((options.filenames.json.clone(), render_summary(&report)?)),
                other => tracing::warn!("⚠️ Unknown export format '{}', skipping", other),
            }
        }

        if files.is_empty() {
            return Err(CostError::MissingConfigError {
                field: "export.formats".to_string(),
            });
        }

        if let Some(zip_name) = &options.zip {
            tracing::debug!("Bundling {} files into {}", files.len(), zip_name);
            let zip_data = bundle_zip(&files)?;

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(zip_name, &zip_data).await?;

            Ok(format!("{}/{}", self.config.output_path(), zip_name))
        } else {
            for (name, data) in &files {
                tracing::debug!("Writing {} ({} bytes)", name, data.len());
                self.storage.write_file(name, data).await?;
            }
            Ok(self.config.output_path().to_string())
        }
    }
}

fn parse_catalog_csv(bytes: &[u8]) -> Result<Vec<CatalogEntry>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut entries = Vec::new();

    for record in reader.deserialize() {
        let entry: CatalogEntry = record?;
        entries.push(entry);
    }

    Ok(entries)
}

fn render_delimited(report: &CostReport, delimiter: u8) -> Result<Vec<u8>> {
    // 每列都帶匯率欄位，報表單獨流通時也能還原換算
    #[derive(serde::Serialize)]
    struct Row<'a> {
        name: &'a str,
        base_amount: f64,
        amount: f64,
        fixed: bool,
        final_amount: f64,
        final_quote: f64,
        rate: f64,
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for row in &report.rows {
        writer.serialize(Row {
            name: &row.name,
            base_amount: row.base_amount,
            amount: row.amount,
            fixed: row.fixed,
            final_amount: row.final_amount,
            final_quote: row.final_quote,
            rate: report.currency.rate,
        })?;
    }

    writer.into_inner().map_err(|e| CostError::ProcessingError {
        message: format!("CSV buffer error: {}", e),
    })
}

fn render_summary(report: &CostReport) -> Result<Vec<u8>> {
    #[derive(serde::Serialize)]
    struct Summary<'a> {
        generated_at: chrono::DateTime<chrono::Utc>,
        base_currency: &'a str,
        quote_currency: &'a str,
        rate: f64,
        item_count: usize,
        fixed_count: usize,
        surcharge_total: f64,
        ratio: f64,
        total_final: f64,
        total_quote: f64,
        distribution: DistributionOutcome,
    }

    let summary = Summary {
        generated_at: report.generated_at,
        base_currency: &report.currency.base,
        quote_currency: &report.currency.quote,
        rate: report.currency.rate,
        item_count: report.rows.len(),
        fixed_count: report.rows.iter().filter(|r| r.fixed).count(),
        surcharge_total: report.surcharge_total,
        ratio: report.ratio,
        total_final: report.total_final,
        total_quote: report.total_quote,
        distribution: report.outcome,
    };

    Ok(serde_json::to_vec_pretty(&summary)?)
}

fn bundle_zip(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for (name, data) in files {
        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
