use crate::domain::model::{AllocatedItem, AllocationResult, DistributionOutcome, LineItem};

/// 把附加費按比例分攤到可變項目上
///
/// 固定項目金額不變；可變項目統一乘上
/// `(可變小計 + 附加費) / 可變小計`，使得分攤後總額等於
/// 編輯後小計加附加費。沒有可變項目、或可變小計不為正時，
/// 跳過分攤並在結果中標記未分配的附加費金額。
///
/// 純函數：相同輸入必得相同輸出，與呼叫次數無關。
pub fn allocate(items: &[LineItem], surcharge_total: f64) -> AllocationResult {
    let has_variable = items.iter().any(|i| !i.fixed);
    let variable_subtotal: f64 = items.iter().filter(|i| !i.fixed).map(|i| i.amount).sum();

    if !has_variable || variable_subtotal <= 0.0 {
        // 沒有項目能吸收附加費：金額原樣返回，附加費保持未分配
        let allocated: Vec<AllocatedItem> = items
            .iter()
            .map(|i| AllocatedItem {
                name: i.name.clone(),
                final_amount: i.amount,
            })
            .collect();
        let total_final = allocated.iter().map(|i| i.final_amount).sum();

        return AllocationResult {
            items: allocated,
            ratio: 1.0,
            total_final,
            outcome: DistributionOutcome::Skipped {
                undistributed: surcharge_total,
            },
        };
    }

    let ratio = (variable_subtotal + surcharge_total) / variable_subtotal;

    let allocated: Vec<AllocatedItem> = items
        .iter()
        .map(|i| AllocatedItem {
            name: i.name.clone(),
            final_amount: if i.fixed { i.amount } else { i.amount * ratio },
        })
        .collect();
    let total_final = allocated.iter().map(|i| i.final_amount).sum();

    AllocationResult {
        items: allocated,
        ratio,
        total_final,
        outcome: DistributionOutcome::Applied,
    }
}
