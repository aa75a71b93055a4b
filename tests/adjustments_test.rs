use anyhow::Result;
use landed_cost::config::toml_config::CostConfig;
use landed_cost::{CostingEngine, CostingPipeline, LocalStorage};
use tempfile::TempDir;

async fn run_with_adjustments(adjustments_toml: &str) -> Result<(TempDir, Vec<Vec<String>>)> {
    let temp_dir = TempDir::new()?;
    let temp_path = temp_dir.path().to_str().unwrap();
    let normalized_path = temp_path.replace('\\', "/");

    let config_content = format!(
        r#"
[project]
name = "adjustments"
description = "Adjustment behaviour"
version = "1.0.0"

[currency]
base = "USD"
quote = "INR"
rate = 90.0

[[catalog]]
name = "Alpha"
base = 100.0

[[catalog]]
name = "Beta"
base = 100.0

[surcharges]
shipping = 30.0
fees = 0.0

{}

[export]
output_path = "{}"
output_formats = ["csv"]
"#,
        adjustments_toml, normalized_path
    );

    let config_path = format!("{}/adjustments_test.toml", temp_path);
    tokio::fs::write(&config_path, config_content).await?;
    let config = CostConfig::from_file(&config_path)?;

    let storage = LocalStorage::new(normalized_path.clone());
    let pipeline = CostingPipeline::new(storage, config);
    let engine = CostingEngine::new(pipeline);

    engine.run().await?;

    let csv_data = tokio::fs::read(temp_dir.path().join("report.csv")).await?;
    let mut reader = csv::Reader::from_reader(csv_data.as_slice());
    let rows = reader
        .records()
        .map(|r| r.map(|rec| rec.iter().map(String::from).collect()))
        .collect::<std::result::Result<Vec<Vec<String>>, _>>()?;

    Ok((temp_dir, rows))
}

fn amount(row: &[String]) -> f64 {
    row[2].parse().unwrap()
}

fn final_amount(row: &[String]) -> f64 {
    row[4].parse().unwrap()
}

/// 測試金額編輯：調整後金額取代基礎價格參與分攤
#[tokio::test]
async fn test_amount_edit_changes_distribution_base() -> Result<()> {
    let (_dir, rows) = run_with_adjustments(
        r#"
[[adjustments]]
name = "Alpha"
amount = 50.0
"#,
    )
    .await?;

    // Subtotal becomes 150, ratio (150 + 30) / 150 = 1.2
    assert!((amount(&rows[0]) - 50.0).abs() < 1e-9);
    assert!((final_amount(&rows[0]) - 60.0).abs() < 1e-9);
    assert!((final_amount(&rows[1]) - 120.0).abs() < 1e-9);

    Ok(())
}

/// 測試固定標記：固定項目金額原樣保留，附加費全壓到其餘項目
#[tokio::test]
async fn test_fixed_item_keeps_edited_amount() -> Result<()> {
    let (_dir, rows) = run_with_adjustments(
        r#"
[[adjustments]]
name = "Alpha"
amount = 50.0

[[adjustments]]
name = "Beta"
fixed = true
"#,
    )
    .await?;

    // Only Alpha distributes: ratio (50 + 30) / 50 = 1.6
    assert!((final_amount(&rows[0]) - 80.0).abs() < 1e-9);
    assert_eq!(rows[1][3], "true");
    assert!((final_amount(&rows[1]) - 100.0).abs() < 1e-9);

    Ok(())
}

/// 測試未知名稱的調整：跳過而不是中斷
#[tokio::test]
async fn test_unknown_adjustment_name_is_ignored() -> Result<()> {
    let (_dir, rows) = run_with_adjustments(
        r#"
[[adjustments]]
name = "Ghost"
amount = 1.0
"#,
    )
    .await?;

    // Both rows untouched, ratio (200 + 30) / 200 = 1.15
    assert_eq!(rows.len(), 2);
    assert!((amount(&rows[0]) - 100.0).abs() < 1e-9);
    assert!((final_amount(&rows[0]) - 115.0).abs() < 1e-9);
    assert!((final_amount(&rows[1]) - 115.0).abs() < 1e-9);

    Ok(())
}

/// 測試基礎價格欄位：編輯金額後仍保留目錄原價供對照
#[tokio::test]
async fn test_base_price_column_survives_edits() -> Result<()> {
    let (_dir, rows) = run_with_adjustments(
        r#"
[[adjustments]]
name = "Alpha"
amount = 50.0
"#,
    )
    .await?;

    assert!((rows[0][1].parse::<f64>().unwrap() - 100.0).abs() < 1e-9);
    assert!((amount(&rows[0]) - 50.0).abs() < 1e-9);

    Ok(())
}
