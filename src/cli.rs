use cert_verify_common::{Decision, Role};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cert-verify")]
#[command(about = "証明書検証ワークフローツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ロールを選択して入口画面を表示
    Login {
        /// ロール (institution/employer/student/admin、省略時はダッシュボード)
        #[arg(long)]
        role: Option<Role>,
    },

    /// アップロードから判定まで対話的に一括実行
    Run {
        /// 証明書ファイルのフォルダ
        #[arg(required = true)]
        folder: PathBuf,

        /// 検証レポートの出力先フォルダ（省略時は入力フォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 確定処理の模擬遅延（ミリ秒、省略時は設定値）
        #[arg(long)]
        delay_ms: Option<u64>,

        /// QR画像を出力しない
        #[arg(long)]
        no_qr: bool,
    },

    /// 抽出済みフィールドJSONに判定を適用（非対話）
    Verify {
        /// 抽出フィールドのJSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 判定 (approve/reject)
        #[arg(required = true)]
        decision: Decision,

        /// 検証レポートの出力先フォルダ（省略時は入力と同じフォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 確定処理の模擬遅延（ミリ秒、省略時は設定値）
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// 証明書IDのQRコードをPNG出力
    Qr {
        /// 証明書ID
        #[arg(required = true)]
        id: String,

        /// 出力先フォルダ（省略時はカレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 一辺のピクセル数（省略時は設定値）
        #[arg(long)]
        size: Option<u32>,
    },

    /// 設定を表示/編集
    Config {
        /// 機関名を設定
        #[arg(long)]
        set_institution: Option<String>,

        /// 模擬遅延（ミリ秒）を設定
        #[arg(long)]
        set_delay_ms: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
