use crate::domain::model::CatalogEntry;

/// 內建示範目錄
///
/// 沒有配置任何目錄時作為範例資料使用，對應工具的出廠預設訂單。
pub fn demo_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("Crystal Machinery Keycaps", 24.50),
        CatalogEntry::new("Multi-color PBT Keycaps – Blue", 4.20),
        CatalogEntry::new("Multi-color PBT Keycaps – Pink", 4.20),
        CatalogEntry::new("Multi-color PBT Keycaps – Red", 3.71),
        CatalogEntry::new("Multi-color PBT Keycaps – Purple", 3.71),
        CatalogEntry::new("Multi-color PBT Keycaps – Black Powder", 4.20),
        CatalogEntry::new("Multi-color PBT Keycaps – Black", 4.20),
        CatalogEntry::new("DIY Keyboard Tool", 3.00),
        CatalogEntry::new("143 Key Comic Style", 7.14),
        CatalogEntry::new("143 Key White Comic", 7.14),
        CatalogEntry::new("125 Key Sublimation (Pink)", 7.14),
        CatalogEntry::new("OUTEMU Switch (Blue)", 10.00),
        CatalogEntry::new("OUTEMU Switch (Brown)", 10.00),
        CatalogEntry::new("Magic Fog Keycap (Blue)", 7.80),
        CatalogEntry::new("Magic Fog Rainbow Mist", 7.80),
        CatalogEntry::new("Magic Fog Star Mans", 7.80),
        CatalogEntry::new("Magic Mist Roland Jade", 7.80),
        CatalogEntry::new("Magic Fog Star Purple", 23.40),
    ]
}
