use serde_json::Value;

use super::{remap, store_maps, ShapeAdapter};
use crate::domain::RawStoreInput;

/// Adapter for paginated location APIs: flat numeric/string fields that map
/// onto the target vocabulary by alias alone.
pub struct ApiAdapter;

impl ShapeAdapter for ApiAdapter {
    fn extract(&self, payload: &Value) -> Vec<RawStoreInput> {
        store_maps(payload).into_iter().map(remap).collect()
    }
}
