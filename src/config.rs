use crate::error::{CertVerifyError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 機関名（ダッシュボード表示用）
    pub institution: String,
    /// 確定処理の模擬遅延（ミリ秒）
    pub confirm_delay_ms: u64,
    /// QR画像の一辺（ピクセル）
    pub qr_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            institution: "University of Global Studies".into(),
            confirm_delay_ms: 1000,  // モックアップと同じ1秒
            qr_size: 150,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CertVerifyError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("cert-verify").join("config.json"))
    }

    pub fn set_institution(&mut self, name: String) -> Result<()> {
        self.institution = name;
        self.save()
    }

    pub fn set_confirm_delay_ms(&mut self, delay: u64) -> Result<()> {
        self.confirm_delay_ms = delay;
        self.save()
    }
}
