// 목적:
// - 트윗 아카이브 적재 작업의 핵심 파이프라인을 실행한다.
//
// 설명:
// - create_index: 트윗 매핑으로 인덱스를 만든다(이미 있으면 성공으로 본다).
// - bulk_index: 타입 변환이 끝난 문서에 dataset/file_name을 덧붙여 `_bulk`로 적재한다.
// - 원격 다운로드와 CSV 파싱은 이 계층 밖의 책임이다.
//
// 디자인 패턴:
// - 명령 패턴(Command) 기반 분기.
//
// 참조:
// - src_rs/index/es_client.rs
// - src_rs/index/fields.rs

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::core::errors::{CoreError, CoreResult};
use crate::index::es_client::{ElasticsearchClient, EngineConfigPayload};
use crate::index::fields;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionRequestPayload {
    pub operation: String,
    pub index: String,
    #[serde(default)]
    pub dataset: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub documents: Vec<Value>,
    pub engine: EngineConfigPayload,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionResultPayload {
    pub operation: String,
    pub index_created: bool,
    pub indexed_documents: u64,
    pub failed_documents: u64,
}

/// 트윗 인덱스 매핑. 정확 일치/집계 대상은 keyword, 식별 필드는 text + keyword 하위 필드다.
pub fn tweet_index_mapping() -> Value {
    let text_with_keyword = json!({
        "type": "text",
        "fields": { "keyword": { "type": "keyword", "ignore_above": 256 } }
    });

    json!({
        "mappings": {
            "properties": {
                "dataset": { "type": "keyword" },
                "file_name": { "type": "keyword" },
                "hashtags": { "type": "keyword" },
                "urls": { "type": "keyword" },
                "user_mentions": { "type": "keyword" },
                "tweet_time": { "type": "date" },
                "account_creation_date": { "type": "date" },
                "follower_count": { "type": "integer" },
                "following_count": { "type": "integer" },
                "like_count": { "type": "integer" },
                "quote_count": { "type": "integer" },
                "reply_count": { "type": "integer" },
                "retweet_count": { "type": "integer" },
                "tweet_text": { "type": "text" },
                "userid": text_with_keyword.clone(),
                "user_screen_name": text_with_keyword.clone(),
                "user_display_name": text_with_keyword.clone(),
                "tweet_language": text_with_keyword
            }
        }
    })
}

/// 문서마다 출처 메타데이터를 덧붙인다. 객체가 아닌 문서는 거부한다.
pub fn stamp_documents(
    documents: Vec<Value>,
    dataset: Option<&str>,
    file_name: Option<&str>,
) -> CoreResult<Vec<Map<String, Value>>> {
    documents
        .into_iter()
        .enumerate()
        .map(|(position, document)| match document {
            Value::Object(mut object) => {
                if let Some(dataset) = dataset {
                    object.insert(fields::DATASET_FIELD.to_string(), Value::from(dataset));
                }
                if let Some(file_name) = file_name {
                    object.insert(fields::FILE_NAME_FIELD.to_string(), Value::from(file_name));
                }
                Ok(object)
            }
            other => Err(CoreError::InvalidInput(format!(
                "documents[{}]는 JSON 객체여야 합니다: {}",
                position, other
            ))),
        })
        .collect()
}

/// 적재 파이프라인을 실행한다.
pub async fn execute_ingestion(payload: IngestionRequestPayload) -> CoreResult<IngestionResultPayload> {
    if payload.operation.trim().is_empty() {
        return Err(CoreError::InvalidInput(
            "operation은 비어 있을 수 없습니다".to_string(),
        ));
    }

    let client = ElasticsearchClient::new(payload.engine.clone())?;

    match payload.operation.as_str() {
        "create_index" => {
            let created = client
                .create_index(&payload.index, &tweet_index_mapping())
                .await?;

            Ok(IngestionResultPayload {
                operation: payload.operation,
                index_created: created,
                ..Default::default()
            })
        }
        "bulk_index" => {
            let documents = stamp_documents(
                payload.documents,
                payload.dataset.as_deref(),
                payload.file_name.as_deref(),
            )?;

            if documents.is_empty() {
                tracing::warn!(index = %payload.index, "적재할 문서가 없습니다");
            }

            let summary = client.bulk_index(&payload.index, &documents).await?;
            tracing::info!(
                index = %payload.index,
                indexed = summary.indexed,
                failed = summary.failed,
                "bulk 적재 완료"
            );

            Ok(IngestionResultPayload {
                operation: payload.operation,
                index_created: false,
                indexed_documents: summary.indexed,
                failed_documents: summary.failed,
            })
        }
        _ => Err(CoreError::InvalidInput(format!(
            "지원하지 않는 operation입니다: {}",
            payload.operation
        ))),
    }
}
