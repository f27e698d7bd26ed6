pub mod qr;

use crate::error::{CertVerifyError, Result};
use cert_verify_common::UNKNOWN_CERTIFICATE_ID;
use std::path::{Path, PathBuf};

/// QR画像の出力パス: `certificate-<id>-qr.png`
pub fn qr_output_path(output_dir: &Path, certificate_id: &str) -> PathBuf {
    output_dir.join(format!("certificate-{}-qr.png", sanitize_id(certificate_id)))
}

/// ファイル名に使えない文字を置換
fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

/// 証明書IDのQRコードをPNG出力する
///
/// IDが未解決（"N/A"）の場合は生成しない。
pub fn export_qr(certificate_id: &str, output_dir: &Path, size: u32) -> Result<PathBuf> {
    if certificate_id.is_empty() || certificate_id == UNKNOWN_CERTIFICATE_ID {
        return Err(CertVerifyError::QrGeneration(
            "証明書IDが未解決のためQRコードを生成できません".into(),
        ));
    }

    let output_path = qr_output_path(output_dir, certificate_id);
    qr::generate_qr_png(certificate_id, &output_path, size)?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_output_path_naming() {
        let path = qr_output_path(Path::new("/tmp"), "C12345");
        assert_eq!(path, PathBuf::from("/tmp/certificate-C12345-qr.png"));
    }

    #[test]
    fn test_sanitize_id() {
        assert_eq!(sanitize_id("C12345"), "C12345");
        assert_eq!(sanitize_id("a/b:c"), "a_b_c");
    }

    #[test]
    fn test_export_qr_rejects_unresolved_id() {
        let result = export_qr(UNKNOWN_CERTIFICATE_ID, Path::new("/tmp"), 150);
        assert!(matches!(result, Err(CertVerifyError::QrGeneration(_))));
    }
}
