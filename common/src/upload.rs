//! アップロードステージ
//!
//! ファイル選択の集合をメモリ上で保持する。追記のみ（置換しない）、
//! 削除は名前指定、次ステージへの遷移は非空が条件。

use crate::error::{Error, Result};
use crate::types::FileRecord;
use chrono::NaiveDate;

/// アップロードステージの作業セット
#[derive(Debug, Clone, Default)]
pub struct UploadStage {
    files: Vec<FileRecord>,
}

impl UploadStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイル選択を追加（既存セットへの追記、常にProcessing）
    ///
    /// 追加した件数を返す。
    pub fn add_files<I, S>(&mut self, names: I, upload_date: NaiveDate) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.files.len();
        self.files
            .extend(names.into_iter().map(|n| FileRecord::new(n, upload_date)));
        self.files.len() - before
    }

    /// 名前が一致するレコードを削除し、削除件数を返す
    ///
    /// 呼び出し側は名前を重複させないこと（CLIのスキャナは重複排除済み）。
    pub fn delete(&mut self, name: &str) -> usize {
        let before = self.files.len();
        self.files.retain(|f| f.name != name);
        before - self.files.len()
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// 抽出ステージへ進めるか（「Proceed」ガード）
    pub fn can_proceed(&self) -> bool {
        !self.files.is_empty()
    }

    /// 抽出ステージへファイルセットを引き渡す
    ///
    /// 空のままの遷移はUIだけでなくここでも拒否する。
    pub fn proceed(self) -> Result<Vec<FileRecord>> {
        if self.files.is_empty() {
            return Err(Error::NoFilesUploaded);
        }
        Ok(self.files)
    }

    /// ステージを破棄（ダッシュボードへ戻る）
    pub fn cancel(self) {
        // 作業セットはこの場で破棄される
    }
}
