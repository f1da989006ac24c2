//! Path helpers.

use std::path::Path;

/// Returns file extension as lower case string.
pub fn fileext_to_lcstring(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}
