//! QR出力の統合テスト

use cert_verify_rust::error::CertVerifyError;
use cert_verify_rust::export;
use tempfile::tempdir;

#[test]
fn test_qr_export_creates_png() {
    let dir = tempdir().expect("Failed to create temp dir");

    let path = export::export_qr("C12345", dir.path(), 150).expect("QR出力失敗");

    assert!(path.exists(), "QRファイルが作成されていない");
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("certificate-C12345-qr.png")
    );

    let metadata = std::fs::metadata(&path).expect("ファイルメタデータ取得失敗");
    assert!(metadata.len() > 0, "QRファイルが空");
}

#[test]
fn test_qr_export_output_is_readable_png() {
    let dir = tempdir().expect("Failed to create temp dir");

    let path = export::export_qr("C12345", dir.path(), 150).expect("QR出力失敗");

    let image = image::open(&path).expect("PNGとして読めない");
    assert!(image.width() > 0);
    assert_eq!(image.width(), image.height());
}

/// 未解決IDではQRを生成しない
#[test]
fn test_qr_export_rejects_na() {
    let dir = tempdir().expect("Failed to create temp dir");

    let result = export::export_qr("N/A", dir.path(), 150);
    assert!(matches!(result, Err(CertVerifyError::QrGeneration(_))));

    // 何も出力されない
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert!(entries.is_empty());
}

/// IDに含まれる区切り文字はファイル名で無害化される
#[test]
fn test_qr_export_sanitizes_filename() {
    let dir = tempdir().expect("Failed to create temp dir");

    let path = export::export_qr("C/123:45", dir.path(), 150).expect("QR出力失敗");
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("certificate-C_123_45-qr.png")
    );
    assert!(path.exists());
}
