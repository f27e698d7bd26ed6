//! 検証ワークフローの型定義
//!
//! CLIと各ステージで共有される型:
//! - FileRecord: アップロードステージの作業データ
//! - ExtractedField: OCR抽出フィールド
//! - VerificationContext: 検証ステージへ引き渡すコンテキスト

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 証明書IDフィールドのラベル（QR生成・コピーの主キー）
pub const CERTIFICATE_ID_LABEL: &str = "Certificate ID";

/// 証明書IDが解決できない場合の番兵値
pub const UNKNOWN_CERTIFICATE_ID: &str = "N/A";

/// カテゴリ未設定フィールドの既定バケット
pub const DEFAULT_CATEGORY: &str = "General";

/// アップロード済みファイルの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FileStatus {
    #[default]
    Processing,
    Verified,
    Rejected,
    Pending,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStatus::Processing => write!(f, "Processing"),
            FileStatus::Verified => write!(f, "Verified"),
            FileStatus::Rejected => write!(f, "Rejected"),
            FileStatus::Pending => write!(f, "Pending"),
        }
    }
}

/// アップロードされた証明書ファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub name: String,

    /// アップロード日（当日）
    pub upload_date: NaiveDate,

    pub status: FileStatus,
}

impl FileRecord {
    /// 選択直後のレコードを生成（常にProcessing）
    pub fn new(name: impl Into<String>, upload_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            upload_date,
            status: FileStatus::Processing,
        }
    }
}

/// 抽出信頼度（表示専用、遷移には影響しない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    #[default]
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

/// OCR抽出フィールド
///
/// `label`は生成後不変かつシーケンス内で一意。
/// 生成後に変化するのは`value`と`editing`のみ。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedField {
    pub label: String,

    pub value: String,

    pub confidence: Confidence,

    pub editing: bool,

    /// 表示グルーピング用カテゴリ（未設定は"General"扱い）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ExtractedField {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        confidence: Confidence,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            confidence,
            editing: false,
            category: None,
        }
    }

    /// カテゴリ（未設定は既定バケット）
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }
}

/// 検証ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    /// 確定済み（pendingへは戻れない）
    pub fn is_terminal(&self) -> bool {
        matches!(self, VerificationStatus::Approved | VerificationStatus::Rejected)
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationStatus::Pending => write!(f, "pending"),
            VerificationStatus::Approved => write!(f, "approved"),
            VerificationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// 検証ステージのコンテキスト
///
/// ステージ間は値渡しの一方通行（共有可変状態は持たない）。
/// `certificate_id`は保持せず、フィールドから都度導出する。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationContext {
    pub fields: Vec<ExtractedField>,

    pub status: VerificationStatus,

    pub timestamp: DateTime<Utc>,
}

impl VerificationContext {
    pub fn new(fields: Vec<ExtractedField>, timestamp: DateTime<Utc>) -> Self {
        Self {
            fields,
            status: VerificationStatus::Pending,
            timestamp,
        }
    }

    /// "Certificate ID"フィールドの値、なければ"N/A"
    pub fn certificate_id(&self) -> &str {
        self.fields
            .iter()
            .find(|f| f.label == CERTIFICATE_ID_LABEL)
            .map(|f| f.value.as_str())
            .unwrap_or(UNKNOWN_CERTIFICATE_ID)
    }

    /// 承認可否の判定（唯一の業務ルール）
    ///
    /// 証明書IDが解決できない証明書は承認できない。
    pub fn is_valid_certificate(&self) -> bool {
        !self.fields.is_empty() && self.certificate_id() != UNKNOWN_CERTIFICATE_ID
    }
}

impl Default for VerificationContext {
    fn default() -> Self {
        Self::new(Vec::new(), Utc::now())
    }
}
