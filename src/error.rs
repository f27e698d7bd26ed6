use thiserror::Error;

#[derive(Error, Debug)]
pub enum CertVerifyError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("証明書ファイルが見つかりません: {0}")]
    NoDocumentsFound(String),

    #[error("ワークフローエラー: {0}")]
    Workflow(#[from] cert_verify_common::Error),

    #[error("QR生成エラー: {0}")]
    QrGeneration(String),

    #[error("画像出力エラー: {0}")]
    ImageEncode(String),

    #[error("クリップボードエラー: {0}")]
    Clipboard(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),
}

pub type Result<T> = std::result::Result<T, CertVerifyError>;
