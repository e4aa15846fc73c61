//! 导出文件写入

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use kvm_console_core::ExportedEntries;

/// 写入导出目录，返回完整路径；同名文件直接覆盖
pub fn write_export(dir: &Path, exported: &ExportedEntries) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create export directory {}", dir.display()))?;
    }
    let path = dir.join(&exported.file_name);
    fs::write(&path, &exported.content)
        .with_context(|| format!("Cannot write {}", path.display()))?;
    tracing::info!("Exported {} entries to {}", exported.count, path.display());
    Ok(path)
}
