// 목적:
// - 외부 검색 엔진과의 경계(트레이트)와 정규화된 응답 타입을 정의한다.
//
// 설명:
// - 실행 파사드는 이 트레이트에만 의존하므로 테스트 더블로 교체할 수 있다.
// - 엔진 연결은 전역 상태가 아니라 호출 시점에 주입된다.
//
// 디자인 패턴:
// - 어댑터(Adapter) 경계 + 의존성 주입.
//
// 참조:
// - src_rs/index/es_client.rs
// - src_rs/core/search_pipeline.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;

use crate::core::descriptor::QueryDescriptor;
use crate::core::errors::CoreResult;

/// 버킷 키. terms는 문자열/숫자, date_histogram은 구간 시작 epoch millis다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketKey {
    Text(String),
    Integer(i64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: BucketKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_as_string: Option<String>,
    pub doc_count: u64,
}

/// 엔진 응답을 집계/문서 단위로 정규화한 값.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineResponse {
    pub total: u64,
    pub documents: Vec<Value>,
    pub aggregations: BTreeMap<String, Vec<Bucket>>,
}

/// 구조화 쿼리를 실행하는 검색 엔진 경계.
pub trait SearchEngine: Send + Sync {
    fn search(
        &self,
        index: &str,
        descriptor: &QueryDescriptor,
    ) -> impl Future<Output = CoreResult<EngineResponse>> + Send;
}
