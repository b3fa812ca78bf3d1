use clap::Parser;
use receipt_desk_lib::cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match receipt_desk_lib::run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("実行中にエラーが発生しました: {}", e.details());
            eprintln!("エラー: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
