/// コマンドラインからの操作
///
/// どのコマンドも最初に初期表示（3つの一覧の取得）を行い、
/// その画面に対して操作する。
use crate::app::ReceiptClient;
use crate::features::uploads::{UploadFile, UploadState};
use crate::shared::api_client::ApiClient;
use crate::shared::config::ApiConfig;
use crate::shared::dom::Notifier;
use crate::shared::errors::AppResult;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "receipt-desk", version, about = "領収書承認ワークフローのクライアント")]
pub struct Cli {
    /// APIのベースパス（未指定なら API_BASE_URL）
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// 操作後の画面をHTMLファイルに書き出す
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 画面を表示する（--output がなければ標準出力へ）
    Show,
    /// 承認待ちの領収書を承認する
    Approve {
        id: String,
        /// 確認を省略する
        #[arg(short, long)]
        yes: bool,
    },
    /// カテゴリーを追加する
    AddCategory {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// 領収書ファイルをアップロードする
    Upload { files: Vec<PathBuf> },
}

/// 標準エラー出力と標準入力を使う通知
pub struct TerminalNotifier {
    assume_yes: bool,
}

impl TerminalNotifier {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("[通知] {message}");
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            log::debug!("確認を省略しました: {message}");
            return true;
        }

        eprint!("{message} [y/N]: ");
        if let Err(e) = std::io::stderr().flush() {
            log::debug!("標準エラー出力のフラッシュに失敗しました: {e}");
        }

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "はい")
}

/// API設定を組み立てる（--base-url が環境変数より優先）
pub fn api_config(cli: &Cli) -> ApiConfig {
    let mut config = ApiConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    config
}

/// コマンドを実行する
///
/// # 戻り値
/// 操作が成功した場合はtrue（失敗はユーザーに通知済み）
pub async fn execute(cli: Cli) -> AppResult<bool> {
    let backend = ApiClient::new(api_config(&cli))?;
    let assume_yes = matches!(cli.command, Command::Approve { yes: true, .. });
    let mut client = ReceiptClient::new(backend, TerminalNotifier::new(assume_yes));

    client.initialize_app().await;

    let succeeded = match &cli.command {
        Command::Show => true,
        Command::Approve { id, .. } => client.approve_by_id(id).await,
        Command::AddCategory { name, description } => {
            client.submit_category(name, description).await
        }
        Command::Upload { files } => {
            let mut selected = Vec::with_capacity(files.len());
            for path in files {
                selected.push(UploadFile::from_path(path).await?);
            }
            let state = client.submit_upload(selected).await;
            eprintln!("{}", client.page().upload_status.text);
            matches!(state, UploadState::Success(_))
        }
    };

    let html = client.page().to_html();
    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, html).await?;
            log::info!("画面を書き出しました: {}", path.display());
        }
        None if matches!(cli.command, Command::Show) => print!("{html}"),
        None => {}
    }

    Ok(succeeded)
}
