//! QRコード画像生成

use crate::error::{CertVerifyError, Result};
use image::{GrayImage, Luma};
use qrcode::{Color, QrCode};
use std::path::Path;

/// 静穏帯の幅（モジュール数、QR規格の推奨値）
const QUIET_ZONE: u32 = 4;

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/// 証明書IDをQRコード化してラスタ画像を得る
///
/// `size`は目安の一辺ピクセル数。モジュール境界を守るため
/// 実際の出力は整数倍に丸められる。
pub fn render_qr(certificate_id: &str, size: u32) -> Result<GrayImage> {
    let code = QrCode::new(certificate_id.as_bytes())
        .map_err(|e| CertVerifyError::QrGeneration(e.to_string()))?;

    let colors = code.to_colors();
    let modules = code.width() as u32;
    let total_modules = modules + QUIET_ZONE * 2;
    let scale = (size / total_modules).max(1);
    let dimension = total_modules * scale;

    let image = GrayImage::from_fn(dimension, dimension, |x, y| {
        let mx = x / scale;
        let my = y / scale;
        if mx < QUIET_ZONE || my < QUIET_ZONE {
            return LIGHT;
        }
        let (mx, my) = (mx - QUIET_ZONE, my - QUIET_ZONE);
        if mx >= modules || my >= modules {
            return LIGHT;
        }
        match colors[(my * modules + mx) as usize] {
            Color::Dark => DARK,
            Color::Light => LIGHT,
        }
    });

    Ok(image)
}

/// QRコードをPNGとして保存
pub fn generate_qr_png(certificate_id: &str, output_path: &Path, size: u32) -> Result<()> {
    let image = render_qr(certificate_id, size)?;
    image
        .save(output_path)
        .map_err(|e| CertVerifyError::ImageEncode(e.to_string()))?;
    Ok(())
}
