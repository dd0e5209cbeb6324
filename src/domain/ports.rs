use crate::domain::model::{BillingInput, BillingReport};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Byte-level access to the files the run reads and writes. Tests swap in
/// an in-memory implementation.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn roster_path(&self) -> &str;
    fn calls_path(&self) -> &str;
    fn report_path(&self) -> &str;
    fn json_summary_path(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<BillingInput>;
    async fn transform(&self, input: BillingInput) -> Result<BillingReport>;
    async fn load(&self, report: BillingReport) -> Result<String>;
}
