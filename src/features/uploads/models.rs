// アップロード機能のデータモデル

use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::content_type_for;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// マルチパートで使うフィールド名（複数ファイルで繰り返す）
pub const UPLOAD_FIELD_NAME: &str = "receipts";

/// アップロード対象の1ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// ディスク上のファイルを読み込む
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                AppError::validation(format!("ファイル名を取得できません: {}", path.display()))
            })?
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        log::debug!(
            "アップロード対象を読み込みました: file={file_name}, size={}",
            bytes.len()
        );
        Ok(Self::new(file_name, bytes))
    }
}

/// ファイル選択フォームの状態
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub files: Vec<UploadFile>,
}

impl UploadForm {
    pub fn select(&mut self, files: Vec<UploadFile>) {
        self.files = files;
    }

    pub fn reset(&mut self) {
        self.files.clear();
    }
}

/// アップロードAPIのレスポンス
///
/// 成功時は `{message, errors}`、失敗時は `{error, details}`。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

impl UploadResponse {
    /// 失敗レスポンスの表示用メッセージ
    ///
    /// `error` があれば、ファイルごとの `details` を後ろに付けて返す。
    pub fn failure_summary(&self) -> Option<String> {
        let error = self
            .error
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())?;

        if self.details.is_empty() {
            Some(error.to_string())
        } else {
            Some(format!("{error}（詳細: {}）", self.details.join(", ")))
        }
    }
}

/// アップロード処理の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Validating,
    /// ファイル未選択で送信しなかった
    Rejected,
    Sending,
    Success(String),
    Error(String),
}

impl UploadState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            UploadState::Rejected | UploadState::Success(_) | UploadState::Error(_)
        )
    }
}
