// 목적:
// - Elasticsearch HTTP API 호출을 담당한다.
//
// 설명:
// - 완성된 QueryDescriptor를 `_search`로 전송하고 hits/aggregations를 정규화한다.
// - 인덱스 생성(매핑 포함)과 NDJSON `_bulk` 적재를 제공한다.
// - 재시도는 하지 않는다. 실패는 호출자에게 그대로 전달한다.
//
// 디자인 패턴:
// - 어댑터(Adapter).
//
// 참조:
// - src_rs/index/engine.rs
// - src_rs/core/search_pipeline.rs
// - src_rs/core/ingestion_pipeline.rs

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::core::descriptor::QueryDescriptor;
use crate::core::errors::{CoreError, CoreResult};
use crate::index::engine::{Bucket, EngineResponse, SearchEngine};
use crate::index::guards::{normalize_endpoint, validate_index_name};

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_bulk_chunk_size() -> usize {
    500
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfigPayload {
    pub url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_bulk_chunk_size")]
    pub bulk_chunk_size: usize,
}

impl EngineConfigPayload {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_ms: default_timeout_ms(),
            api_key: None,
            username: None,
            password: None,
            bulk_chunk_size: default_bulk_chunk_size(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSummary {
    pub indexed: u64,
    pub failed: u64,
}

#[derive(Clone)]
pub struct ElasticsearchClient {
    client: Client,
    endpoint: String,
    config: EngineConfigPayload,
}

impl ElasticsearchClient {
    pub fn new(config: EngineConfigPayload) -> CoreResult<Self> {
        let endpoint = normalize_endpoint(&config.url)?;

        if config.timeout_ms == 0 {
            return Err(CoreError::InvalidConfig(
                "engine.timeout_ms는 1 이상이어야 합니다".to_string(),
            ));
        }

        if config.bulk_chunk_size == 0 {
            return Err(CoreError::InvalidConfig(
                "engine.bulk_chunk_size는 1 이상이어야 합니다".to_string(),
            ));
        }

        if config.username.is_some() != config.password.is_some() {
            return Err(CoreError::InvalidConfig(
                "engine.username과 engine.password는 함께 지정해야 합니다".to_string(),
            ));
        }

        if config.api_key.is_some() && config.username.is_some() {
            return Err(CoreError::InvalidConfig(
                "engine.api_key와 basic 인증은 동시에 사용할 수 없습니다".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|error| CoreError::Http(format!("HTTP 클라이언트 생성 실패: {}", error)))?;

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn bulk_chunk_size(&self) -> usize {
        self.config.bulk_chunk_size
    }

    /// 매핑과 함께 인덱스를 만든다. 이미 존재하면 `false`를 반환한다.
    pub async fn create_index(&self, index: &str, mapping: &Value) -> CoreResult<bool> {
        validate_index_name(index, "index")?;

        let url = format!("{}/{}", self.endpoint, index);
        let (status, body) = self.send(self.client.put(url).json(mapping)).await?;

        if status.is_success() {
            tracing::info!(index, "인덱스 생성 완료");
            return Ok(true);
        }

        if status == StatusCode::BAD_REQUEST && body.contains("resource_already_exists_exception") {
            tracing::info!(index, "인덱스가 이미 존재합니다");
            return Ok(false);
        }

        Err(CoreError::Http(format!(
            "인덱스 생성 상태 오류: status={}, body={}",
            status, body
        )))
    }

    /// 문서를 청크 단위 `_bulk` 요청으로 적재한다.
    pub async fn bulk_index(
        &self,
        index: &str,
        documents: &[Map<String, Value>],
    ) -> CoreResult<BulkSummary> {
        validate_index_name(index, "index")?;

        let mut summary = BulkSummary::default();
        for chunk in documents.chunks(self.config.bulk_chunk_size) {
            let body = to_bulk_body(index, chunk)?;
            let request = self
                .client
                .post(format!("{}/_bulk", self.endpoint))
                .header(CONTENT_TYPE, "application/x-ndjson")
                .body(body);

            let (status, response_body) = self.send(request).await?;
            if !status.is_success() {
                return Err(CoreError::Http(format!(
                    "bulk 상태 오류: status={}, body={}",
                    status, response_body
                )));
            }

            let chunk_summary = parse_bulk_response(&response_body).map_err(|error| {
                CoreError::Serialization(format!("bulk 응답 파싱 실패: {}", error))
            })?;
            if chunk_summary.failed > 0 {
                tracing::warn!(
                    index,
                    failed = chunk_summary.failed,
                    "bulk 청크 일부 문서 적재 실패"
                );
            }

            summary.indexed = summary.indexed.saturating_add(chunk_summary.indexed);
            summary.failed = summary.failed.saturating_add(chunk_summary.failed);
        }

        Ok(summary)
    }

    fn authorize(&self, request_builder: RequestBuilder) -> RequestBuilder {
        if let Some(key) = self.config.api_key.as_ref() {
            return request_builder.header(AUTHORIZATION, format!("ApiKey {}", key));
        }

        match (self.config.username.as_ref(), self.config.password.as_ref()) {
            (Some(username), password) => request_builder.basic_auth(username, password),
            _ => request_builder,
        }
    }

    async fn send(&self, request_builder: RequestBuilder) -> CoreResult<(StatusCode, String)> {
        let response = self
            .authorize(request_builder)
            .send()
            .await
            .map_err(|error| CoreError::Http(format!("엔진 HTTP 요청 실패: {}", error)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| CoreError::Http(format!("엔진 HTTP 본문 읽기 실패: {}", error)))?;

        Ok((status, body))
    }
}

impl SearchEngine for ElasticsearchClient {
    async fn search(&self, index: &str, descriptor: &QueryDescriptor) -> CoreResult<EngineResponse> {
        validate_index_name(index, "index")?;

        let url = format!("{}/{}/_search", self.endpoint, index);
        let (status, body) = self.send(self.client.post(url).json(descriptor)).await?;

        if !status.is_success() {
            return Err(CoreError::Http(format!(
                "검색 상태 오류: status={}, body={}",
                status, body
            )));
        }

        parse_search_response(&body).map_err(|error| {
            CoreError::Serialization(format!("검색 응답 파싱 실패: {}, body={}", error, body))
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTotal {
    Object { value: u64 },
    Count(u64),
}

#[derive(Deserialize)]
struct RawHit {
    #[serde(rename = "_source", default)]
    source: Value,
}

#[derive(Deserialize)]
struct RawHits {
    #[serde(default)]
    total: Option<RawTotal>,
    #[serde(default)]
    hits: Vec<RawHit>,
}

#[derive(Deserialize)]
struct RawAggregation {
    #[serde(default)]
    buckets: Vec<Bucket>,
}

#[derive(Deserialize)]
struct RawSearchResponse {
    hits: RawHits,
    #[serde(default)]
    aggregations: BTreeMap<String, RawAggregation>,
}

fn parse_search_response(body: &str) -> Result<EngineResponse, String> {
    let raw: RawSearchResponse =
        serde_json::from_str(body.trim()).map_err(|error| format!("JSON 파싱 실패: {}", error))?;

    let total = match raw.hits.total {
        Some(RawTotal::Object { value }) | Some(RawTotal::Count(value)) => value,
        None => raw.hits.hits.len() as u64,
    };

    Ok(EngineResponse {
        total,
        documents: raw.hits.hits.into_iter().map(|hit| hit.source).collect(),
        aggregations: raw
            .aggregations
            .into_iter()
            .map(|(name, aggregation)| (name, aggregation.buckets))
            .collect(),
    })
}

#[derive(Deserialize)]
struct RawBulkItem {
    #[serde(default)]
    status: u16,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Deserialize)]
struct RawBulkResponse {
    #[serde(default)]
    items: Vec<BTreeMap<String, RawBulkItem>>,
}

fn parse_bulk_response(body: &str) -> Result<BulkSummary, String> {
    let raw: RawBulkResponse =
        serde_json::from_str(body.trim()).map_err(|error| format!("JSON 파싱 실패: {}", error))?;

    let mut summary = BulkSummary::default();
    for item in raw.items.iter().flat_map(|entry| entry.values()) {
        if item.error.is_some() || item.status >= 300 {
            summary.failed += 1;
        } else {
            summary.indexed += 1;
        }
    }
    Ok(summary)
}

fn to_bulk_body(index: &str, documents: &[Map<String, Value>]) -> CoreResult<String> {
    let action = serde_json::json!({ "index": { "_index": index } }).to_string();

    let mut body = String::new();
    for document in documents {
        let line = serde_json::to_string(document)
            .map_err(|error| CoreError::Serialization(format!("문서 직렬화 실패: {}", error)))?;
        body.push_str(&action);
        body.push('\n');
        body.push_str(&line);
        body.push('\n');
    }
    Ok(body)
}
