/// 共有エラー型とエラーハンドリング
pub mod errors;

/// 共有設定管理
pub mod config;

/// APIサーバーとの通信
pub mod api_client;

/// 領収書APIのエンドポイント定義
pub mod backend;

/// 画面要素（リージョン・イベント・通知）
pub mod dom;

/// 共有ユーティリティ関数
pub mod utils;

#[cfg(test)]
pub mod testing;

// 便利な再エクスポート
pub use api_client::ApiClient;
pub use backend::ReceiptBackend;
pub use config::{
    initialize_logging_system, load_environment_variables, ApiConfig, Environment,
    EnvironmentConfig,
};
pub use dom::{Card, ClickEvent, Control, Notifier, Region, StatusLine, StatusTone, SubmitEvent};
pub use errors::{AppError, AppResult};
