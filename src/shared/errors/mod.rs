use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// バリデーション関連のエラー
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 通信経路のエラー（接続失敗など、レスポンスを受け取れなかった場合）
    #[error("通信エラー: {0}")]
    Network(String),

    /// 2xx以外のステータスを受け取った場合のエラー
    #[error("APIサーバーエラー: status={status}, message={server_message:?}")]
    Http {
        status: u16,
        /// レスポンスボディの `error` フィールド（存在する場合）
        server_message: Option<String>,
    },

    /// レスポンスやシリアライズ済みデータの解析エラー
    #[error("データ解析エラー: {0}")]
    Decode(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// I/O関連のエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    /// JSON解析エラー
    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// ユーザーに表示するためのフレンドリーなメッセージを取得
    ///
    /// サーバーが `error` フィールドを返していればそれを優先する。
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Network(_) => "APIサーバーへの接続に失敗しました".to_string(),
            AppError::Http {
                server_message: Some(msg),
                ..
            } => msg.clone(),
            AppError::Http {
                status,
                server_message: None,
            } => status_message(*status).to_string(),
            AppError::Decode(_) => "データ形式の解析でエラーが発生しました".to_string(),
            AppError::Configuration(_) => "設定エラーが発生しました".to_string(),
            AppError::Io(_) => "ファイル操作でエラーが発生しました".to_string(),
            AppError::Json(_) => "データ形式の解析でエラーが発生しました".to_string(),
        }
    }

    /// ステータスエラー（2xx以外）かどうか
    pub fn is_status_failure(&self) -> bool {
        matches!(self, AppError::Http { .. })
    }

    /// エラーの詳細情報を取得（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// バリデーションエラーを作成するヘルパー関数
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// 通信エラーを作成するヘルパー関数
    pub fn network<S: Into<String>>(message: S) -> Self {
        AppError::Network(message.into())
    }

    /// 解析エラーを作成するヘルパー関数
    pub fn decode<S: Into<String>>(message: S) -> Self {
        AppError::Decode(message.into())
    }

    /// 設定エラーを作成するヘルパー関数
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}

/// HTTPステータスに応じた汎用メッセージ
fn status_message(status: u16) -> &'static str {
    match status {
        400 => "リクエストの形式が正しくありません",
        401 => "認証に失敗しました",
        403 => "この操作を実行する権限がありません",
        404 => "指定されたリソースが見つかりません",
        413 => "データサイズが制限を超えています",
        415 => "サポートされていないデータ形式です",
        429 => "リクエストが多すぎます。しばらく待ってから再試行してください",
        500 => "サーバー内部エラーが発生しました",
        502 => "APIサーバーとの通信でエラーが発生しました",
        503 => "APIサーバーが一時的に利用できません",
        504 => "APIサーバーからの応答がタイムアウトしました",
        _ => "サーバーエラーが発生しました",
    }
}

/// AppErrorからStringへの変換（CLIでの表示のため）
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.user_message()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            AppError::Decode(error.to_string())
        } else {
            AppError::Network(error.to_string())
        }
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let error = AppError::Http {
            status: 500,
            server_message: Some("Redis not connected".to_string()),
        };
        assert_eq!(error.user_message(), "Redis not connected");
    }

    #[test]
    fn test_user_message_falls_back_to_status() {
        let not_found = AppError::Http {
            status: 404,
            server_message: None,
        };
        assert_eq!(
            not_found.user_message(),
            "指定されたリソースが見つかりません"
        );

        let teapot = AppError::Http {
            status: 418,
            server_message: None,
        };
        assert_eq!(teapot.user_message(), "サーバーエラーが発生しました");
    }

    #[test]
    fn test_helper_functions() {
        assert!(matches!(
            AppError::validation("テスト"),
            AppError::Validation(_)
        ));
        assert!(matches!(AppError::network("refused"), AppError::Network(_)));
        assert!(matches!(AppError::decode("bad"), AppError::Decode(_)));
        assert!(matches!(
            AppError::configuration("bad url"),
            AppError::Configuration(_)
        ));
    }

    #[test]
    fn test_status_failure_classification() {
        let status = AppError::Http {
            status: 503,
            server_message: None,
        };
        assert!(status.is_status_failure());
        assert!(!AppError::network("refused").is_status_failure());
    }

    #[test]
    fn test_string_conversion() {
        let error = AppError::validation("カテゴリー名は必須項目です");
        let error_string: String = error.into();
        assert_eq!(error_string, "カテゴリー名は必須項目です");
    }

    #[test]
    fn test_error_details() {
        let error = AppError::decode("expected array");
        assert!(error.details().contains("expected array"));
    }
}
