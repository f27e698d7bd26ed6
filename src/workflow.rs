//! 対話式ワークフロー駆動
//!
//! アップロード → データ抽出 → 検証・判定の3ステージを順に進める。
//! ステージ間は値渡しで、状態機械の遷移ガードはcommon側が持つ。

use crate::clipboard;
use crate::config::Config;
use crate::error::{CertVerifyError, Result};
use crate::export;
use crate::scanner;
use cert_verify_common::{
    CopyAck, Decision, ExtractedField, ExtractionStage, ReviewStage, UploadStage,
    VerificationContext,
};
use chrono::{DateTime, Local, Utc};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// 判定確定後の遷移ペイロード（レポートJSONの形）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub certificate_id: String,
    pub status: cert_verify_common::VerificationStatus,
    pub timestamp: DateTime<Utc>,
    pub fields: Vec<ExtractedField>,
}

impl VerificationReport {
    pub fn from_context(context: &VerificationContext) -> Self {
        Self {
            certificate_id: context.certificate_id().to_string(),
            status: context.status,
            timestamp: context.timestamp,
            fields: context.fields.clone(),
        }
    }
}

/// レポートをJSON保存し、パスを返す
pub fn save_report(context: &VerificationContext, output_dir: &Path) -> Result<PathBuf> {
    let report = VerificationReport::from_context(context);
    let path = output_dir.join("verification-result.json");
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// 確定処理: 保留タスクを発行し、模擬遅延の後に解決する
///
/// 遅延中は判定操作を受け付けない（開始後の中断経路はない）。
pub async fn confirm_with_delay(
    stage: &mut ReviewStage,
    delay: Duration,
) -> Result<VerificationContext> {
    stage.confirm()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("判定を処理中...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    tokio::time::sleep(delay).await;

    spinner.finish_and_clear();

    Ok(stage.resolve(Utc::now())?)
}

/// フィールドJSONの読み込み（破損時は空データに落として継続）
pub fn load_fields(input: &Path) -> Result<Vec<ExtractedField>> {
    let content = std::fs::read_to_string(input)?;
    match serde_json::from_str(&content) {
        Ok(fields) => Ok(fields),
        Err(e) => {
            eprintln!("⚠ ペイロードが不正のため空データで継続します: {}", e);
            Ok(Vec::new())
        }
    }
}

/// 非対話の判定適用（verifyサブコマンド）
pub async fn run_verify(
    input: &Path,
    decision: Decision,
    output_dir: &Path,
    delay: Duration,
) -> Result<VerificationContext> {
    let fields = load_fields(input)?;
    let mut stage = ReviewStage::from_payload(Some(fields));

    println!("証明書ID: {}", stage.certificate_id());
    println!(
        "検証可否: {}",
        if stage.is_valid_certificate() { "有効" } else { "無効（承認不可）" }
    );

    stage.request_action(decision)?;
    let context = confirm_with_delay(&mut stage, delay).await?;

    let report_path = save_report(&context, output_dir)?;
    println!("✔ 判定確定: {} ({})", context.status, context.timestamp);
    println!("✔ レポート出力: {}", report_path.display());

    Ok(context)
}

/// 対話ワークフロー全体（runサブコマンド）
pub async fn run_interactive(
    folder: &Path,
    output_dir: &Path,
    delay: Duration,
    no_qr: bool,
    config: &Config,
    verbose: bool,
) -> Result<()> {
    let context = loop {
        // 1. アップロードステージ
        println!("[1/3] アップロード");
        let upload = match upload_stage(folder)? {
            Some(stage) => stage,
            None => {
                println!("中止しました");
                return Ok(());
            }
        };
        let files = upload.proceed()?;
        println!("✔ {}件のファイルを確定\n", files.len());

        // 2. データ抽出ステージ（中止はアップロードへ戻る）
        println!("[2/3] データ抽出");
        let extraction = ExtractionStage::from_upload(files);
        let fields = match extraction_stage(extraction)? {
            Some(fields) => fields,
            None => {
                println!("抽出を中止しました。アップロードへ戻ります\n");
                continue;
            }
        };
        println!("✔ {}フィールドを確定\n", fields.len());

        // 3. 検証・判定ステージ
        println!("[3/3] 検証・判定");
        let mut review = ReviewStage::from_payload(Some(fields));
        match review_stage(&mut review, delay, config, verbose).await? {
            Some(context) => break context,
            None => {
                println!("中止しました");
                return Ok(());
            }
        }
    };

    let report_path = save_report(&context, output_dir)?;
    println!("\n✔ 判定確定: {} ({})", context.status, context.timestamp);
    println!("✔ レポート出力: {}", report_path.display());

    // QR出力は付随機能: 失敗しても判定結果は有効のまま
    if !no_qr && context.is_valid_certificate() {
        match export::export_qr(context.certificate_id(), output_dir, config.qr_size) {
            Ok(path) => println!("✔ QR出力: {}", path.display()),
            Err(e) => eprintln!("⚠ QR出力に失敗しました（判定は確定済み）: {}", e),
        }
    }

    Ok(())
}

/// アップロードステージの対話ループ
///
/// Noneは操作者による中止。
fn upload_stage(folder: &Path) -> Result<Option<UploadStage>> {
    let documents = scanner::scan_folder(folder)?;
    if documents.is_empty() {
        return Err(CertVerifyError::NoDocumentsFound(
            folder.display().to_string(),
        ));
    }

    let mut stage = UploadStage::new();
    let today = Local::now().date_naive();
    let added = stage.add_files(documents.iter().map(|d| d.file_name.clone()), today);
    println!("✔ {}件のファイルを検出", added);

    println!("操作: [Enter]続行 [d 名前]削除 [q]中止");
    loop {
        print_upload_table(&stage);

        let input: String = prompt("アップロード")?;
        let trimmed = input.trim();

        if trimmed.is_empty() || trimmed == "p" {
            if stage.can_proceed() {
                return Ok(Some(stage));
            }
            // 空セットでは進めない（ガードは状態機械側にもある）
            println!("  → ファイルがありません。続行できません");
        } else if trimmed == "q" || trimmed == "Q" {
            stage.cancel();
            return Ok(None);
        } else if let Some(name) = trimmed.strip_prefix("d ") {
            let removed = stage.delete(name.trim());
            if removed == 0 {
                println!("  → 該当なし: {}", name.trim());
            } else {
                println!("  → 削除: {} ({}件)", name.trim(), removed);
            }
        } else {
            println!("  → 不明な操作: {}", trimmed);
        }
    }
}

fn print_upload_table(stage: &UploadStage) {
    println!("  {:<30} {:<12} {}", "Filename", "Upload Date", "Status");
    for record in stage.files() {
        println!(
            "  {:<30} {:<12} {}",
            record.name, record.upload_date, record.status
        );
    }
}

/// データ抽出ステージの対話ループ
///
/// Noneは操作者による中止（アップロードへ戻る）。
fn extraction_stage(mut stage: ExtractionStage) -> Result<Option<Vec<ExtractedField>>> {
    println!("操作: [番号]編集 [a]全編集 [r]再スキャン [p]確定 [q]中止");
    loop {
        print_fields(&stage);

        let input: String = prompt("抽出データ")?;
        let trimmed = input.trim();

        match trimmed {
            "p" | "" => return Ok(Some(stage.proceed())),
            "q" | "Q" => {
                stage.cancel();
                return Ok(None);
            }
            "a" => {
                stage.edit_all();
                edit_marked_fields(&mut stage)?;
            }
            "r" => {
                stage.rescan();
                println!("  → 再スキャンしました。OCRデータを更新しました");
            }
            _ => match trimmed.parse::<usize>() {
                Ok(index) => edit_single_field(&mut stage, index)?,
                Err(_) => println!("  → 不明な操作: {}", trimmed),
            },
        }
    }
}

fn print_fields(stage: &ExtractionStage) {
    for (i, field) in stage.fields().iter().enumerate() {
        let marker = match field.confidence {
            cert_verify_common::Confidence::High => "●",
            cert_verify_common::Confidence::Medium => "◐",
            cert_verify_common::Confidence::Low => "○",
        };
        let editing = if field.editing { " [編集中]" } else { "" };
        println!(
            "  [{}] {} {:<20} {}{}",
            i, marker, field.label, field.value, editing
        );
    }
}

/// 1フィールドの編集（トグル → 値入力 → トグルで確定表示に戻す）
fn edit_single_field(stage: &mut ExtractionStage, index: usize) -> Result<()> {
    match stage.toggle_edit(index) {
        Ok(true) => {}
        Ok(false) => {
            // 編集解除のトグルだった場合はそのまま確定
            return Ok(());
        }
        Err(e) => {
            println!("  → {}", e);
            return Ok(());
        }
    }

    let current = stage.fields()[index].value.clone();
    let value: String = Input::new()
        .with_prompt(format!("  {}", stage.fields()[index].label))
        .with_initial_text(current)
        .allow_empty(true)  // 入力検証は行わない
        .interact_text()
        .map_err(|e| CertVerifyError::CliExecution(e.to_string()))?;

    stage.set_value(index, value)?;
    stage.toggle_edit(index)?;
    Ok(())
}

/// 編集フラグの立った全フィールドを順に入力
fn edit_marked_fields(stage: &mut ExtractionStage) -> Result<()> {
    let indices: Vec<usize> = stage
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| f.editing)
        .map(|(i, _)| i)
        .collect();

    for index in indices {
        let current = stage.fields()[index].value.clone();
        let value: String = Input::new()
            .with_prompt(format!("  {}", stage.fields()[index].label))
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| CertVerifyError::CliExecution(e.to_string()))?;
        stage.set_value(index, value)?;
        stage.toggle_edit(index)?;
    }
    Ok(())
}

/// 検証・判定ステージの対話ループ
///
/// Noneは判定せずに中止。
async fn review_stage(
    stage: &mut ReviewStage,
    delay: Duration,
    config: &Config,
    verbose: bool,
) -> Result<Option<VerificationContext>> {
    let mut copy_ack = CopyAck::new();

    println!("証明書ID: {}", stage.certificate_id());
    println!(
        "検証可否: {}",
        if stage.is_valid_certificate() {
            "有効"
        } else {
            "無効（証明書IDが未解決のため承認不可）"
        }
    );
    for (category, fields) in stage.grouped_fields() {
        println!("  ■ {}", category);
        for field in fields {
            println!("    {:<20} {}", field.label, field.value);
        }
    }

    println!("操作: [a]承認 [r]却下 [c]IDコピー [s]QR保存 [q]中止");
    loop {
        let input: String = prompt("判定")?;
        let trimmed = input.trim();

        let decision = match trimmed {
            "a" => Decision::Approved,
            "r" => Decision::Rejected,
            "c" => {
                // コピー失敗はログのみ（判定フローは止めない）
                match clipboard::copy_text(stage.certificate_id()) {
                    Ok(()) => {
                        copy_ack.mark(Instant::now());
                        println!("  → Copied!");
                    }
                    Err(e) => {
                        if verbose {
                            eprintln!("  → コピー失敗（続行）: {}", e);
                        }
                    }
                }
                continue;
            }
            "s" => {
                match export::export_qr(stage.certificate_id(), Path::new("."), config.qr_size) {
                    Ok(path) => println!("  → QR出力: {}", path.display()),
                    Err(e) => eprintln!("  → QR出力失敗（続行）: {}", e),
                }
                continue;
            }
            "q" | "Q" => return Ok(None),
            _ => {
                println!("  → 不明な操作: {}", trimmed);
                continue;
            }
        };

        // 状態機械側のガード（承認可否・処理中・確定済み）に従う
        if let Err(e) = stage.request_action(decision) {
            println!("  → {}", e);
            continue;
        }

        let answer: String = prompt(format!("{}を確定しますか? (y/n)", decision))?;
        if answer.trim().eq_ignore_ascii_case("y") {
            let context = confirm_with_delay(stage, delay).await?;
            return Ok(Some(context));
        }

        stage.cancel_confirmation();
        println!("  → 確認を取り消しました");
    }
}

fn prompt(label: impl Into<String>) -> Result<String> {
    Input::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| CertVerifyError::CliExecution(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cert_verify_common::{seed_fields, VerificationStatus};

    #[tokio::test]
    async fn test_confirm_with_delay_commits() {
        let mut stage = ReviewStage::new(seed_fields());
        stage.request_action(Decision::Approved).unwrap();

        let context = confirm_with_delay(&mut stage, Duration::from_millis(0))
            .await
            .expect("確定失敗");
        assert_eq!(context.status, VerificationStatus::Approved);
        assert_eq!(context.certificate_id(), "C12345");
    }

    #[tokio::test]
    async fn test_confirm_with_delay_requires_pending_decision() {
        let mut stage = ReviewStage::new(seed_fields());
        let result = confirm_with_delay(&mut stage, Duration::from_millis(0)).await;
        assert!(result.is_err());
        assert_eq!(stage.status(), VerificationStatus::Pending);
    }

    #[test]
    fn test_report_from_context() {
        let mut stage = ReviewStage::new(seed_fields());
        stage.request_action(Decision::Rejected).unwrap();
        stage.confirm().unwrap();
        let context = stage.resolve(Utc::now()).unwrap();

        let report = VerificationReport::from_context(&context);
        assert_eq!(report.certificate_id, "C12345");
        assert_eq!(report.status, VerificationStatus::Rejected);
        assert_eq!(report.fields.len(), 8);
    }
}
