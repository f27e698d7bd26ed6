//! データ抽出ステージ
//!
//! OCR抽出結果を模した固定8フィールドを保持し、操作者の修正を受け付ける。
//! 「Save」は表示上のトグルであり、確定処理ではない（最後に書いた値が常に有効）。

use crate::error::{Error, Result};
use crate::types::{Confidence, ExtractedField, FileRecord, CERTIFICATE_ID_LABEL};

/// OCR出力を模した正準フィールドのシード
///
/// ラベルは固定・一意・順序付き。実OCRエンジンは非対象のためモック値を返す。
pub fn seed_fields() -> Vec<ExtractedField> {
    vec![
        ExtractedField::new(CERTIFICATE_ID_LABEL, "C12345", Confidence::High),
        ExtractedField::new("Student Name", "John Doe", Confidence::High),
        ExtractedField::new("Roll Number", "2021001", Confidence::Medium),
        ExtractedField::new("Institution Name", "ABC University", Confidence::Medium),
        ExtractedField::new("Program/Degree", "B.Tech CSE", Confidence::Low),
        ExtractedField::new("Year of Completion", "2024", Confidence::Low),
        ExtractedField::new("Grade/CGPA", "8.9", Confidence::Medium),
        ExtractedField::new("Issue Date", "01-07-2024", Confidence::High),
    ]
}

/// データ抽出ステージ
#[derive(Debug, Clone)]
pub struct ExtractionStage {
    fields: Vec<ExtractedField>,
}

impl ExtractionStage {
    /// アップロードステージから遷移（ステージ入場時にシード）
    ///
    /// ファイルセットは表示用のみで、シード内容には影響しない。
    pub fn from_upload(_files: Vec<FileRecord>) -> Self {
        Self {
            fields: seed_fields(),
        }
    }

    /// 任意のフィールド列から復元（JSONロードなど）
    pub fn with_fields(fields: Vec<ExtractedField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[ExtractedField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn field_mut(&mut self, index: usize) -> Result<&mut ExtractedField> {
        self.fields.get_mut(index).ok_or(Error::FieldIndex(index))
    }

    /// 指定フィールドの編集フラグを反転（他フィールドは不変）
    ///
    /// falseへ戻した時点で入力中の値がそのまま確定する（下書きバッファなし）。
    pub fn toggle_edit(&mut self, index: usize) -> Result<bool> {
        let field = self.field_mut(index)?;
        field.editing = !field.editing;
        Ok(field.editing)
    }

    /// 指定フィールドの値を上書き
    ///
    /// 入力検証は行わない（空文字も受理）。
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        self.field_mut(index)?.value = value.into();
        Ok(())
    }

    /// 全フィールドを編集状態にする
    pub fn edit_all(&mut self) {
        for field in &mut self.fields {
            field.editing = true;
        }
    }

    /// 再スキャン: 全フィールドの値を空にし、編集状態を解除（取り消し不可）
    ///
    /// 操作者への通知は呼び出し側（CLI）が行う。
    pub fn rescan(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.editing = false;
        }
    }

    /// ステージを破棄してアップロードへ戻る
    pub fn cancel(self) {
        // メモリ上のシーケンスはこの場で破棄される
    }

    /// 検証ステージへ現在のシーケンスを引き渡す
    ///
    /// 編集中の値も含めてそのまま渡す。
    pub fn proceed(self) -> Vec<ExtractedField> {
        self.fields
    }
}
