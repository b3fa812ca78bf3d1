/// 汎用APIクライアント
///
/// 領収書APIサーバーとの通信を行う。
/// リトライは行わず、失敗はそのまま呼び出し元に返す。
use crate::features::uploads::models::{UploadFile, UploadResponse, UPLOAD_FIELD_NAME};
use crate::shared::config::ApiConfig;
use crate::shared::errors::{AppError, AppResult};
use log::{debug, info, warn};
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// APIサーバーからのエラーレスポンス（`{"error": "..."}`）
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// 汎用APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// 設定を指定してAPIクライアントを作成
    pub fn new(config: ApiConfig) -> AppResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        info!("APIクライアントを作成しました: base_url={}", config.base_url);
        Ok(Self { client, config })
    }

    /// GETリクエストを送信してJSONを受け取る
    pub async fn get<T>(&self, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");

        let request = self.client.get(self.config.endpoint_url(endpoint));
        let response = self.send(request, "GET", endpoint).await?;

        let result: T = response.json().await.map_err(|e| {
            warn!("レスポンス解析エラー: endpoint={endpoint}, error={e}");
            AppError::decode(format!("レスポンス解析エラー: {e}"))
        })?;

        info!("GETリクエスト成功: endpoint={endpoint}");
        Ok(result)
    }

    /// JSONボディ付きPOSTリクエストを送信（レスポンスはステータスのみ確認）
    pub async fn post_json<B>(&self, endpoint: &str, body: &B) -> AppResult<()>
    where
        B: Serialize,
    {
        info!("POSTリクエスト送信: endpoint={endpoint}");

        let request = self.client.post(self.config.endpoint_url(endpoint)).json(body);
        self.send(request, "POST", endpoint).await?;

        info!("POSTリクエスト成功: endpoint={endpoint}");
        Ok(())
    }

    /// ボディなしPOSTリクエストを送信（レスポンスはステータスのみ確認）
    pub async fn post_empty(&self, endpoint: &str) -> AppResult<()> {
        info!("POSTリクエスト送信（ボディなし）: endpoint={endpoint}");

        let request = self.client.post(self.config.endpoint_url(endpoint));
        self.send(request, "POST", endpoint).await?;

        info!("POSTリクエスト成功: endpoint={endpoint}");
        Ok(())
    }

    /// 複数ファイルをマルチパートでアップロード
    ///
    /// Content-Typeは指定せず、境界文字列はreqwestに生成させる。
    /// 失敗時もボディの `error` を読み取ってエラーに含める。
    pub async fn post_multipart(
        &self,
        endpoint: &str,
        files: &[UploadFile],
    ) -> AppResult<UploadResponse> {
        info!(
            "マルチパートアップロード開始: endpoint={endpoint}, files={}",
            files.len()
        );

        let mut form = multipart::Form::new();
        for file in files {
            let part = multipart::Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)
                .map_err(|e| AppError::validation(format!("MIMEタイプ設定エラー: {e}")))?;
            form = form.part(UPLOAD_FIELD_NAME, part);
        }

        let response = self
            .client
            .post(self.config.endpoint_url(endpoint))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("アップロードリクエスト失敗: endpoint={endpoint}, error={e}");
                AppError::network(format!("APIサーバーへの接続に失敗しました: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(AppError::from)?;
        let parsed = serde_json::from_str::<UploadResponse>(&body);

        if !status.is_success() {
            let server_message = parsed.ok().and_then(|r| r.failure_summary());
            warn!(
                "アップロード失敗: status={}, error={server_message:?}",
                status.as_u16()
            );
            return Err(AppError::Http {
                status: status.as_u16(),
                server_message,
            });
        }

        let upload_response = parsed
            .map_err(|e| AppError::decode(format!("アップロードレスポンス解析エラー: {e}")))?;
        info!(
            "アップロード成功: message={:?}, errors={}",
            upload_response.message,
            upload_response.errors.len()
        );
        Ok(upload_response)
    }

    /// リクエストを送信し、2xx以外はエラーとして返す
    async fn send(
        &self,
        request: RequestBuilder,
        method: &str,
        endpoint: &str,
    ) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!("{method}リクエスト失敗: endpoint={endpoint}, error={e}");
            AppError::network(format!("APIサーバーへの接続に失敗しました: {e}"))
        })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(self.handle_error_response(response, method, endpoint).await)
        }
    }

    /// エラーレスポンスを `AppError::Http` に変換する
    async fn handle_error_response(
        &self,
        response: Response,
        method: &str,
        endpoint: &str,
    ) -> AppError {
        let status = response.status().as_u16();
        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| "レスポンス読み取り失敗".to_string());

        let server_message = match serde_json::from_str::<ErrorResponse>(&response_text) {
            Ok(error_response) => {
                debug!(
                    "APIサーバーから構造化エラーレスポンスを受信: error={}",
                    error_response.error
                );
                Some(error_response.error)
            }
            Err(_) => None,
        };

        warn!(
            "{method}リクエストがエラーを返しました: endpoint={endpoint}, status={status}, body={response_text}"
        );

        AppError::Http {
            status,
            server_message,
        }
    }
}
