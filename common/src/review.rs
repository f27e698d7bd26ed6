//! 検証・判定ステージ
//!
//! ワークフローの終端状態機械: `pending → {approved, rejected}`。
//! 一度確定したステータスはpendingへ戻らない。
//!
//! 確定処理はバックエンド呼び出しを模した遅延を挟むため、
//! 「保留タスク」を明示的な2段階（`confirm` → `resolve`）で表現する。
//! 実際の待機（tokioのsleep）はCLI側の責務。

use crate::error::{Error, Result};
use crate::types::{ExtractedField, VerificationContext, VerificationStatus};
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// 承認/却下の判定種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn status(&self) -> VerificationStatus {
        match self {
            Decision::Approved => VerificationStatus::Approved,
            Decision::Rejected => VerificationStatus::Rejected,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Approved => write!(f, "承認"),
            Decision::Rejected => write!(f, "却下"),
        }
    }
}

impl std::str::FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" | "approved" => Ok(Decision::Approved),
            "reject" | "rejected" => Ok(Decision::Rejected),
            _ => Err(format!("Unknown decision: {}. Use approve or reject", s)),
        }
    }
}

/// 検証・判定ステージの状態機械
#[derive(Debug, Clone)]
pub struct ReviewStage {
    context: VerificationContext,
    /// 確認ダイアログで保留中の判定（最後の要求が有効）
    pending: Option<Decision>,
    /// 確定処理中フラグ（処理中の再操作を拒否）
    processing: bool,
}

impl ReviewStage {
    /// 抽出ステージから遷移
    pub fn new(fields: Vec<ExtractedField>) -> Self {
        Self {
            context: VerificationContext::new(fields, Utc::now()),
            pending: None,
            processing: false,
        }
    }

    /// 遷移ペイロードから入場（欠損時は空データで継続、失敗させない）
    pub fn from_payload(fields: Option<Vec<ExtractedField>>) -> Self {
        Self::new(fields.unwrap_or_default())
    }

    pub fn context(&self) -> &VerificationContext {
        &self.context
    }

    pub fn status(&self) -> VerificationStatus {
        self.context.status
    }

    pub fn certificate_id(&self) -> &str {
        self.context.certificate_id()
    }

    pub fn is_valid_certificate(&self) -> bool {
        self.context.is_valid_certificate()
    }

    pub fn pending_decision(&self) -> Option<Decision> {
        self.pending
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// 判定を要求し、確認待ち状態にする（まだステータスは変えない）
    ///
    /// 確認前なら何度でも呼べる（最後の要求が有効）。
    /// 承認は証明書IDが解決できる場合のみ許可。却下は常に許可。
    /// ガードはUIの無効化だけに頼らず、ここで必ず検査する。
    pub fn request_action(&mut self, decision: Decision) -> Result<()> {
        if self.processing {
            return Err(Error::DecisionInProgress);
        }
        if self.context.status.is_terminal() {
            return Err(Error::AlreadyDecided(self.context.status.to_string()));
        }
        if decision == Decision::Approved && !self.is_valid_certificate() {
            return Err(Error::UnresolvedCertificateId);
        }
        self.pending = Some(decision);
        Ok(())
    }

    /// 確認待ちの判定を破棄する（ステータスは不変）
    pub fn cancel_confirmation(&mut self) {
        if !self.processing {
            self.pending = None;
        }
    }

    /// 確定処理を開始する（保留タスクの発行）
    ///
    /// 開始後は`resolve`まで再入不可。確定済みなら何もしない（冪等）。
    pub fn confirm(&mut self) -> Result<()> {
        if self.context.status.is_terminal() {
            return Ok(());
        }
        if self.processing {
            return Err(Error::DecisionInProgress);
        }
        if self.pending.is_none() {
            return Err(Error::NoPendingDecision);
        }
        self.processing = true;
        Ok(())
    }

    /// 保留タスクの解決: ステータス確定・タイムスタンプ刻印・ペイロード返却
    ///
    /// 確定済みステージへの再呼び出しは現在のコンテキストを返すだけで、
    /// 状態は一切変化しない。
    pub fn resolve(&mut self, now: DateTime<Utc>) -> Result<VerificationContext> {
        if self.context.status.is_terminal() && !self.processing {
            return Ok(self.context.clone());
        }
        let decision = match self.pending.take() {
            Some(d) => d,
            None => {
                self.processing = false;
                return Err(Error::NoPendingDecision);
            }
        };

        self.context.status = decision.status();
        self.context.timestamp = now;
        self.processing = false;
        Ok(self.context.clone())
    }

    /// カテゴリ別のフィールド分割（順序保存の純粋な射影）
    ///
    /// カテゴリ未設定は"General"バケットに入る。状態には影響しない。
    pub fn grouped_fields(&self) -> Vec<(String, Vec<&ExtractedField>)> {
        let mut groups: Vec<(String, Vec<&ExtractedField>)> = Vec::new();
        for field in &self.context.fields {
            let category = field.category_or_default();
            match groups.iter_mut().find(|(name, _)| name == category) {
                Some((_, fields)) => fields.push(field),
                None => groups.push((category.to_string(), vec![field])),
            }
        }
        groups
    }
}

/// コピー完了表示の一時ウィンドウ（2000ms）
///
/// クリップボード書き込み成功時のみ点灯する。失敗時は点灯しない。
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyAck {
    deadline: Option<Instant>,
}

impl CopyAck {
    /// 表示ウィンドウ幅
    pub const WINDOW: Duration = Duration::from_millis(2000);

    pub fn new() -> Self {
        Self::default()
    }

    /// コピー成功を記録
    pub fn mark(&mut self, now: Instant) {
        self.deadline = Some(now + Self::WINDOW);
    }

    /// 「Copied!」を表示すべきか
    pub fn is_active(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now < d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::seed_fields;
    use crate::types::{Confidence, CERTIFICATE_ID_LABEL, UNKNOWN_CERTIFICATE_ID};

    fn valid_stage() -> ReviewStage {
        ReviewStage::new(seed_fields())
    }

    #[test]
    fn test_entry_is_pending() {
        let stage = valid_stage();
        assert_eq!(stage.status(), VerificationStatus::Pending);
        assert!(stage.pending_decision().is_none());
        assert!(!stage.is_processing());
    }

    #[test]
    fn test_missing_payload_degrades_gracefully() {
        let stage = ReviewStage::from_payload(None);
        assert!(stage.context().fields.is_empty());
        assert_eq!(stage.status(), VerificationStatus::Pending);
        assert_eq!(stage.certificate_id(), UNKNOWN_CERTIFICATE_ID);
        assert!(!stage.is_valid_certificate());
    }

    #[test]
    fn test_request_action_last_wins() {
        let mut stage = valid_stage();
        stage.request_action(Decision::Rejected).unwrap();
        stage.request_action(Decision::Approved).unwrap();
        assert_eq!(stage.pending_decision(), Some(Decision::Approved));
    }

    #[test]
    fn test_approve_blocked_without_certificate_id() {
        let mut stage = ReviewStage::from_payload(None);
        let result = stage.request_action(Decision::Approved);
        assert!(matches!(result, Err(Error::UnresolvedCertificateId)));
        // 状態は不変
        assert!(stage.pending_decision().is_none());
        assert_eq!(stage.status(), VerificationStatus::Pending);
    }

    #[test]
    fn test_reject_always_permitted() {
        let mut stage = ReviewStage::from_payload(None);
        stage.request_action(Decision::Rejected).unwrap();
        stage.confirm().unwrap();
        let context = stage.resolve(Utc::now()).unwrap();
        assert_eq!(context.status, VerificationStatus::Rejected);
    }

    #[test]
    fn test_cancel_confirmation_keeps_status() {
        let mut stage = valid_stage();
        stage.request_action(Decision::Approved).unwrap();
        stage.cancel_confirmation();
        assert!(stage.pending_decision().is_none());
        assert_eq!(stage.status(), VerificationStatus::Pending);

        // 破棄後の確定は保留判定なしエラー
        assert!(matches!(stage.confirm(), Err(Error::NoPendingDecision)));
    }

    #[test]
    fn test_confirm_then_resolve_commits_decision() {
        let mut stage = valid_stage();
        stage.request_action(Decision::Approved).unwrap();
        stage.confirm().unwrap();
        assert!(stage.is_processing());

        let now = Utc::now();
        let context = stage.resolve(now).unwrap();
        assert_eq!(context.status, VerificationStatus::Approved);
        assert_eq!(context.timestamp, now);
        assert_eq!(context.certificate_id(), "C12345");
        assert!(!stage.is_processing());
    }

    #[test]
    fn test_request_action_blocked_while_processing() {
        let mut stage = valid_stage();
        stage.request_action(Decision::Approved).unwrap();
        stage.confirm().unwrap();

        let result = stage.request_action(Decision::Rejected);
        assert!(matches!(result, Err(Error::DecisionInProgress)));
        // 処理中は確認破棄も効かない
        stage.cancel_confirmation();
        assert_eq!(stage.pending_decision(), Some(Decision::Approved));
    }

    #[test]
    fn test_confirm_not_reentrant() {
        let mut stage = valid_stage();
        stage.request_action(Decision::Rejected).unwrap();
        stage.confirm().unwrap();
        assert!(matches!(stage.confirm(), Err(Error::DecisionInProgress)));
    }

    #[test]
    fn test_terminal_status_is_stable() {
        let mut stage = valid_stage();
        stage.request_action(Decision::Approved).unwrap();
        stage.confirm().unwrap();
        let first = stage.resolve(Utc::now()).unwrap();

        // 新しいrequest_actionなしの再confirm/resolveは何も変えない
        stage.confirm().unwrap();
        let second = stage.resolve(Utc::now()).unwrap();
        assert_eq!(second.status, VerificationStatus::Approved);
        assert_eq!(second.timestamp, first.timestamp);

        // 確定後の再要求は拒否
        let result = stage.request_action(Decision::Rejected);
        assert!(matches!(result, Err(Error::AlreadyDecided(_))));
        assert_eq!(stage.status(), VerificationStatus::Approved);
    }

    #[test]
    fn test_grouped_fields_default_bucket() {
        let stage = valid_stage();
        let groups = stage.grouped_fields();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "General");
        assert_eq!(groups[0].1.len(), 8);
    }

    #[test]
    fn test_grouped_fields_preserves_order() {
        let mut fields = vec![
            ExtractedField::new(CERTIFICATE_ID_LABEL, "C12345", Confidence::High),
            ExtractedField::new("Student Name", "John Doe", Confidence::High),
            ExtractedField::new("Issue Date", "01-07-2024", Confidence::High),
        ];
        fields[0].category = Some("Identity".to_string());
        fields[1].category = Some("Identity".to_string());
        // Issue Dateはカテゴリなし → General

        let stage = ReviewStage::new(fields);
        let groups = stage.grouped_fields();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Identity");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "General");
        assert_eq!(groups[1].1[0].label, "Issue Date");
    }

    #[test]
    fn test_copy_ack_window() {
        let mut ack = CopyAck::new();
        let t0 = Instant::now();
        assert!(!ack.is_active(t0));

        ack.mark(t0);
        assert!(ack.is_active(t0));
        assert!(ack.is_active(t0 + Duration::from_millis(1999)));
        assert!(!ack.is_active(t0 + Duration::from_millis(2000)));
    }

    /// エンドツーエンド: アップロード → 抽出 → 承認
    #[test]
    fn test_end_to_end_approval() {
        use crate::extraction::ExtractionStage;
        use crate::upload::UploadStage;
        use chrono::NaiveDate;

        let mut upload = UploadStage::new();
        upload.add_files(["cert_01.pdf"], NaiveDate::from_ymd_opt(2025, 9, 8).unwrap());
        let files = upload.proceed().unwrap();

        let extraction = ExtractionStage::from_upload(files);
        assert_eq!(extraction.len(), 8);

        let mut review = ReviewStage::new(extraction.proceed());
        assert_eq!(review.certificate_id(), "C12345");
        assert!(review.is_valid_certificate());

        review.request_action(Decision::Approved).unwrap();
        review.confirm().unwrap();
        let now = Utc::now();
        let payload = review.resolve(now).unwrap();

        assert_eq!(payload.status, VerificationStatus::Approved);
        assert_eq!(payload.timestamp, now);
        assert_eq!(payload.certificate_id(), "C12345");
    }

    /// エンドツーエンド: 空ペイロードでも却下は成立する
    #[test]
    fn test_end_to_end_reject_empty_payload() {
        let mut review = ReviewStage::from_payload(None);
        assert_eq!(review.certificate_id(), UNKNOWN_CERTIFICATE_ID);
        assert!(!review.is_valid_certificate());
        assert!(review.request_action(Decision::Approved).is_err());

        review.request_action(Decision::Rejected).unwrap();
        review.confirm().unwrap();
        let payload = review.resolve(Utc::now()).unwrap();
        assert_eq!(payload.status, VerificationStatus::Rejected);
    }
}
