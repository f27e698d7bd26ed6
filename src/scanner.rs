use crate::error::{CertVerifyError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// スキャン対象の証明書ファイル
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub path: PathBuf,
    pub file_name: String,
}

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "PDF", "JPG", "JPEG", "PNG"];

/// フォルダ直下の証明書ファイルを収集する
///
/// ファイル名でソートし、同名は最初の1件のみ残す
/// （アップロードステージの削除が名前キーのため重複させない）。
pub fn scan_folder(folder: &Path) -> Result<Vec<DocumentInfo>> {
    if !folder.exists() {
        return Err(CertVerifyError::FolderNotFound(folder.display().to_string()));
    }

    let mut documents = Vec::new();
    let mut seen = HashSet::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy();
            if DOCUMENT_EXTENSIONS.iter().any(|&e| e == ext_str) {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();

                if seen.insert(file_name.clone()) {
                    documents.push(DocumentInfo {
                        path: path.to_path_buf(),
                        file_name,
                    });
                }
            }
        }
    }

    // ファイル名でソート
    documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(documents)
}
