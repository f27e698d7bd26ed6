//! 証明書IDのクリップボードコピー
//!
//! 失敗しても検証ワークフローは止めない（呼び出し側でログのみ）。

use crate::error::Result;

/// 証明書IDをクリップボードに書き込む（macOSはpbcopy経由）
#[cfg(target_os = "macos")]
pub fn copy_text(text: &str) -> Result<()> {
    use crate::error::CertVerifyError;
    use std::io::Write;
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy")
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| CertVerifyError::Clipboard(format!("pbcopy起動失敗: {}", e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| CertVerifyError::Clipboard(format!("pbcopy書き込み失敗: {}", e)))?;
    }

    child
        .wait()
        .map_err(|e| CertVerifyError::Clipboard(format!("pbcopy失敗: {}", e)))?;

    Ok(())
}

/// 証明書IDをクリップボードに書き込む（macOS以外は未対応）
#[cfg(not(target_os = "macos"))]
pub fn copy_text(_text: &str) -> Result<()> {
    use crate::error::CertVerifyError;

    Err(CertVerifyError::Clipboard(
        "このプラットフォームではクリップボードに未対応です".into(),
    ))
}

#[cfg(test)]
mod tests {
    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_copy_text_unsupported_platform() {
        // 未対応プラットフォームではエラーを返す（ワークフローは継続できる）
        let result = super::copy_text("C12345");
        assert!(result.is_err());
    }
}
