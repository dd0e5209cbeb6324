use crate::core::Pipeline;
use crate::domain::model::LoadStats;
use crate::utils::error::Result;

/// Runs a pipeline once: load inputs, compute charges, write the report.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Returns the path of the written report.
    pub async fn run(&self) -> Result<String> {
        let (output_path, _) = self.run_with_stats().await?;
        Ok(output_path)
    }

    pub async fn run_with_stats(&self) -> Result<(String, LoadStats)> {
        tracing::info!("Starting billing run");

        tracing::info!("Loading customers and call records...");
        let input = self.pipeline.extract().await?;

        tracing::info!("Computing charges...");
        let report = self.pipeline.transform(input).await?;
        let stats = report.stats.clone();
        tracing::info!("Billed {} customers", report.summaries.len());

        tracing::info!("Writing report...");
        let output_path = self.pipeline.load(report).await?;
        tracing::info!(
            customers = stats.customers,
            calls_attached = stats.calls_attached,
            calls_dropped = stats.calls_dropped,
            "Report saved to: {}",
            output_path
        );

        Ok((output_path, stats))
    }
}
