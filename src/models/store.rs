use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Known store with its province, used to annotate reconstructed sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreRecord {
    pub name: String,
    pub province: Option<String>,
}

/// Builds the store-name to province lookup. Unknown store names simply
/// resolve to no province.
pub fn province_lookup(stores: &[StoreRecord]) -> HashMap<String, String> {
    stores
        .iter()
        .filter_map(|store| {
            store
                .province
                .as_ref()
                .map(|province| (store.name.trim().to_string(), province.clone()))
        })
        .collect()
}
