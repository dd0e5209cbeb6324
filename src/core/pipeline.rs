use crate::core::{loader, report, ConfigProvider, Pipeline, Storage};
use crate::domain::model::{BillingInput, BillingReport, LoadStats};
use crate::utils::error::Result;

/// Reads the roster and call files, prices every call and writes the
/// per-customer report.
pub struct BillingPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> BillingPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BillingPipeline<S, C> {
    async fn extract(&self) -> Result<BillingInput> {
        let roster_path = self.config.roster_path();
        tracing::debug!("Reading roster from {}", roster_path);
        let roster = self.storage.read_file(roster_path).await?;
        let mut registry = loader::load_customers(&roster, roster_path)?;
        tracing::info!("Loaded {} customers", registry.len());

        let calls_path = self.config.calls_path();
        tracing::debug!("Reading call records from {}", calls_path);
        let calls = self.storage.read_file(calls_path).await?;
        let outcome = loader::load_calls(&calls, calls_path, &mut registry)?;
        tracing::info!(
            "Attached {} calls, dropped {} for unknown numbers",
            outcome.attached,
            outcome.dropped
        );

        let stats = LoadStats {
            customers: registry.len(),
            calls_attached: outcome.attached,
            calls_dropped: outcome.dropped,
        };
        Ok(BillingInput { registry, stats })
    }

    async fn transform(&self, input: BillingInput) -> Result<BillingReport> {
        let summaries = report::summarize_all(&input.registry);
        tracing::debug!("Computed {} customer summaries", summaries.len());
        Ok(BillingReport {
            summaries,
            stats: input.stats,
        })
    }

    async fn load(&self, result: BillingReport) -> Result<String> {
        let report_path = self.config.report_path();
        let text = report::render_text(&result.summaries);
        tracing::debug!("Writing report ({} bytes) to {}", text.len(), report_path);
        self.storage.write_file(report_path, text.as_bytes()).await?;

        if let Some(json_path) = self.config.json_summary_path() {
            let json = report::render_json(&result.summaries)?;
            tracing::debug!("Writing JSON summary to {}", json_path);
            self.storage.write_file(json_path, json.as_bytes()).await?;
        }

        Ok(report_path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::BillingError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_files(files: &[(&str, &str)]) -> Self {
            let files: HashMap<String, Vec<u8>> = files
                .iter()
                .map(|(path, body)| (path.to_string(), body.as_bytes().to_vec()))
                .collect();
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<String> {
            let files = self.files.lock().await;
            files
                .get(path)
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files
                .get(path)
                .cloned()
                .ok_or_else(|| BillingError::FileNotFound {
                    path: path.to_string(),
                })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        json_summary: Option<String>,
    }

    impl ConfigProvider for MockConfig {
        fn roster_path(&self) -> &str {
            "khachhang.txt"
        }

        fn calls_path(&self) -> &str {
            "cuocgoi.txt"
        }

        fn report_path(&self) -> &str {
            "ketqua.txt"
        }

        fn json_summary_path(&self) -> Option<&str> {
            self.json_summary.as_deref()
        }
    }

    fn pipeline(storage: MockStorage, json: Option<&str>) -> BillingPipeline<MockStorage, MockConfig> {
        BillingPipeline::new(
            storage,
            MockConfig {
                json_summary: json.map(str::to_string),
            },
        )
    }

    #[tokio::test]
    async fn test_extract_counts_dropped_calls() {
        let storage = MockStorage::with_files(&[
            ("khachhang.txt", "Alice;0901234567\n"),
            (
                "cuocgoi.txt",
                "0901234567;10;23h;15/03/2024;NH\n0999999999;10;23h;15/03/2024;NH\n",
            ),
        ]);

        let input = pipeline(storage, None).extract().await.unwrap();
        assert_eq!(input.stats.customers, 1);
        assert_eq!(input.stats.calls_attached, 1);
        assert_eq!(input.stats.calls_dropped, 1);
    }

    #[tokio::test]
    async fn test_full_run_writes_report() {
        let storage = MockStorage::with_files(&[
            ("khachhang.txt", "Alice;0901234567\nBob;0912345678\n"),
            (
                "cuocgoi.txt",
                "0901234567;10;23h;15/03/2024;NH\n0901234567;5;14h;16/03/2024;RX\n",
            ),
        ]);
        let p = pipeline(storage.clone(), Some("ketqua.json"));

        let input = p.extract().await.unwrap();
        let result = p.transform(input).await.unwrap();
        let path = p.load(result).await.unwrap();
        assert_eq!(path, "ketqua.txt");

        let text = storage.get_file("ketqua.txt").await.unwrap();
        assert_eq!(
            text,
            "Alice; 0901234567; 23100; 1; 0; 0; 1\nBob; 0912345678; 0; 0; 0; 0; 0\n"
        );
        assert!(storage.get_file("ketqua.json").await.is_some());
    }

    #[tokio::test]
    async fn test_missing_roster() {
        let storage = MockStorage::with_files(&[("cuocgoi.txt", "")]);
        let err = pipeline(storage, None).extract().await.unwrap_err();
        assert!(matches!(err, BillingError::FileNotFound { ref path } if path == "khachhang.txt"));
    }

    #[tokio::test]
    async fn test_parse_error_writes_nothing() {
        let storage = MockStorage::with_files(&[
            ("khachhang.txt", "Alice;0901234567\n"),
            ("cuocgoi.txt", "0901234567;ten;23h;15/03/2024;NH\n"),
        ]);
        let p = pipeline(storage.clone(), None);

        assert!(matches!(
            p.extract().await,
            Err(BillingError::ParseError { .. })
        ));
        assert!(storage.get_file("ketqua.txt").await.is_none());
    }
}
