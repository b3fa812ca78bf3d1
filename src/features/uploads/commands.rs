use crate::features::uploads::models::{UploadForm, UploadResponse, UploadState};
use crate::shared::backend::ReceiptBackend;
use crate::shared::dom::{StatusLine, StatusTone, SubmitEvent};
use crate::shared::errors::AppError;
use log::{debug, error, info, warn};

pub const SELECT_FILES_WARNING: &str = "アップロードするファイルを選択してください。";
pub const UPLOADING_STATUS: &str = "アップロード中...";
pub const UPLOAD_DONE_DEFAULT: &str = "アップロードが完了しました。";
pub const UPLOAD_FAILED_GENERIC: &str = "サーバーエラーが発生しました。";

/// 成功レスポンスから表示メッセージを組み立てる
///
/// 一部のファイルだけ失敗した場合はその内容を後ろに付ける。
fn success_message(response: &UploadResponse) -> String {
    let message = response
        .message
        .clone()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| UPLOAD_DONE_DEFAULT.to_string());

    if response.errors.is_empty() {
        message
    } else {
        format!("{message}（一部失敗: {}）", response.errors.join(", "))
    }
}

/// 失敗時の表示メッセージ（サーバーの `error` を優先）
fn failure_message(error: &AppError) -> String {
    match error {
        AppError::Http {
            server_message: Some(message),
            ..
        } if !message.trim().is_empty() => message.clone(),
        AppError::Http { .. } => UPLOAD_FAILED_GENERIC.to_string(),
        other => other.user_message(),
    }
}

fn transition(state: &mut UploadState, next: UploadState) {
    if next.is_terminal() {
        info!("アップロード処理が終了しました: {state:?} -> {next:?}");
    } else {
        debug!("アップロード状態遷移: {state:?} -> {next:?}");
    }
    *state = next;
}

/// ファイルアップロードフォームの送信を処理する
///
/// `idle → validating → (rejected | sending) → (success | error)` の順に遷移し、
/// 終端状態でステータス表示を更新する。フォームは成功時のみリセットする。
///
/// # 引数
/// * `backend` - APIバックエンド
/// * `event` - フォーム送信イベント（既定の送信は必ず止める）
/// * `form` - 選択中のファイル
/// * `status` - ステータス表示
///
/// # 戻り値
/// 到達した終端状態（`Rejected` / `Success` / `Error`）
pub async fn handle_upload<B>(
    backend: &B,
    event: &mut SubmitEvent,
    form: &mut UploadForm,
    status: &mut StatusLine,
) -> UploadState
where
    B: ReceiptBackend + ?Sized,
{
    event.prevent_default();

    let mut state = UploadState::Idle;
    transition(&mut state, UploadState::Validating);

    if form.files.is_empty() {
        warn!("ファイルが選択されていないためアップロードを中止します");
        status.set(SELECT_FILES_WARNING, StatusTone::Warning);
        transition(&mut state, UploadState::Rejected);
        return state;
    }

    status.set(UPLOADING_STATUS, StatusTone::Info);
    transition(&mut state, UploadState::Sending);
    info!("領収書をアップロードします: files={}", form.files.len());

    match backend.upload_receipts(&form.files).await {
        Ok(response) => {
            let message = success_message(&response);
            status.set(message.clone(), StatusTone::Success);
            form.reset();
            transition(&mut state, UploadState::Success(message));
        }
        Err(e) => {
            error!("領収書のアップロードに失敗しました: {e}");
            let message = failure_message(&e);
            status.set(format!("エラー: {message}"), StatusTone::Error);
            transition(&mut state, UploadState::Error(message));
        }
    }

    state
}
