//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("アップロード済みファイルがありません")]
    NoFilesUploaded,

    #[error("フィールドが存在しません: index {0}")]
    FieldIndex(usize),

    #[error("証明書IDが未解決のため承認できません")]
    UnresolvedCertificateId,

    #[error("判定処理が進行中です")]
    DecisionInProgress,

    #[error("判定は確定済みです: {0}")]
    AlreadyDecided(String),

    #[error("確定待ちの判定がありません")]
    NoPendingDecision,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
