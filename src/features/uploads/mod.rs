// アップロード機能モジュール

pub mod commands;
pub mod models;

pub use commands::handle_upload;
pub use models::{UploadFile, UploadForm, UploadResponse, UploadState};
