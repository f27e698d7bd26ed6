//! 機関ダッシュボードのサンプルデータ
//!
//! モックアップの数値をそのまま保持する（バックエンド接続は非対象）。

use crate::types::FileStatus;
use serde::{Deserialize, Serialize};

/// ダッシュボードの集計カード
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub institution: String,
    pub total_certificates: u64,
    pub verified: u64,
    pub pending: u64,
    pub flagged: u64,
}

/// 直近の証明書アクティビティ行
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRow {
    pub file_name: String,
    pub upload_date: String,
    pub status: FileStatus,
}

impl DashboardSummary {
    /// モックアップの固定値
    pub fn sample(institution: impl Into<String>) -> Self {
        Self {
            institution: institution.into(),
            total_certificates: 71_020,
            verified: 35_000,
            pending: 7_489,
            flagged: 2_410,
        }
    }
}

/// 直近アクティビティの固定行
pub fn sample_activity() -> Vec<ActivityRow> {
    vec![
        ActivityRow {
            file_name: "cert_01.pdf".to_string(),
            upload_date: "2025-09-08".to_string(),
            status: FileStatus::Verified,
        },
        ActivityRow {
            file_name: "cert_02.pdf".to_string(),
            upload_date: "2025-09-08".to_string(),
            status: FileStatus::Pending,
        },
    ]
}
