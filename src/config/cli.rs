use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// 本地檔案儲存：讀取走呼叫端給的路徑，寫入一律落在輸出目錄下
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("nested").join("out");
        let storage = LocalStorage::new(output.to_string_lossy().to_string());

        storage.write_file("report.csv", b"name,base\n").await.unwrap();

        let written = fs::read(output.join("report.csv")).unwrap();
        assert_eq!(written, b"name,base\n");
    }

    #[tokio::test]
    async fn test_read_uses_caller_path() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = temp_dir.path().join("items.csv");
        fs::write(&catalog, b"name,base\nA,1.0\n").unwrap();

        // base_path 只影響寫入，讀取用原始路徑
        let storage = LocalStorage::new("./unused-output".to_string());
        let data = storage
            .read_file(&catalog.to_string_lossy())
            .await
            .unwrap();

        assert_eq!(data, b"name,base\nA,1.0\n");
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let storage = LocalStorage::new("./output".to_string());
        let result = storage.read_file("no-such-catalog.csv").await;
        assert!(result.is_err());
    }
}
