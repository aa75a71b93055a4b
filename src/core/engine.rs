use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct CostingEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> CostingEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting cost distribution run");

        tracing::info!("📋 Gathering catalog and adjustments");
        let items = self.pipeline.extract().await?;
        tracing::info!("📊 Extracted {} line items", items.len());
        self.monitor.log_stats("extract");

        tracing::info!("🧮 Distributing surcharges");
        let report = self.pipeline.transform(items).await?;
        tracing::info!(
            "🧮 Ratio {:.4}, grand total {:.2} {} ({:.2} {})",
            report.ratio,
            report.total_final,
            report.currency.base,
            report.total_quote,
            report.currency.quote
        );
        if report.outcome.is_skipped() {
            tracing::warn!(
                "⚠️ Surcharge of {:.2} {} was NOT distributed (no variable items with a positive subtotal)",
                report.outcome.undistributed(),
                report.currency.base
            );
        }
        self.monitor.log_stats("transform");

        tracing::info!("💾 Exporting report");
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("📁 Output saved to: {}", output_path);
        self.monitor.log_stats("load");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
