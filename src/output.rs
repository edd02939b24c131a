//! Output writing

use std::fs;
use std::path::Path;

/// Write the rendered guide, staging through a sibling temp file and
/// renaming so an interrupted run never leaves a partial document behind.
pub fn write_guide(path: &Path, bytes: &[u8]) -> Result<(), String> {
    let tmp = path.with_extension("xml.tmp");
    fs::write(&tmp, bytes).map_err(|e| format!("Write {} failed: {}", tmp.display(), e))?;
    fs::rename(&tmp, path).map_err(|e| format!("Rename to {} failed: {}", path.display(), e))?;
    Ok(())
}
