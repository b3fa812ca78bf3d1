// 機能モジュール構造
pub mod app;
pub mod cli;
pub mod features;
pub mod shared;

pub use app::{Page, ReceiptClient};
pub use shared::errors::{AppError, AppResult};

use shared::config::{initialize_logging_system, load_environment_variables};

/// アプリケーションを起動する
///
/// # 戻り値
/// 操作が成功した場合はtrue
pub async fn run(cli: cli::Cli) -> AppResult<bool> {
    // 環境に応じた.envファイルを読み込み（ログシステム初期化前に実行）
    load_environment_variables();
    initialize_logging_system();

    log::info!("receipt-desk を開始します: command={:?}", cli.command);
    cli::execute(cli).await
}
