// 목적:
// - 검색/인사이트 요청을 쿼리로 조립하고 엔진 실행 결과를 호출자 형태로 재구성한다.
//
// 설명:
// - 요청 파라미터 -> QueryBuilder -> QueryDescriptor -> 엔진 실행 -> 응답 재구성 순서로 처리한다.
// - 엔진 측 실패는 인덱스명/절 요약과 함께 EngineQueryFailed로 감싸 전달하며 재시도하지 않는다.
//
// 디자인 패턴:
// - 파이프라인(Pipeline) + 파사드(Facade).
//
// 참조:
// - src_rs/core/query_builder.rs
// - src_rs/index/engine.rs
// - src_rs/index/es_client.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::core::descriptor::{CalendarInterval, QueryDescriptor};
use crate::core::errors::{CoreError, CoreResult};
use crate::core::query_builder::{page_window, QueryBuilder};
use crate::index::engine::{Bucket, EngineResponse, SearchEngine};
use crate::index::es_client::EngineConfigPayload;
use crate::index::fields;
use crate::index::guards::validate_index_name;

/// 검색과 인사이트가 공유하는 필터 파라미터.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(flatten)]
    pub filters: FilterParams,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
    #[serde(default)]
    pub sort_by: Option<String>,
}

impl SearchParams {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(fields::DEFAULT_PAGE)
    }

    pub fn page_size(&self) -> usize {
        self.size.unwrap_or(fields::DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightsParams {
    #[serde(flatten)]
    pub filters: FilterParams,
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequestPayload {
    pub index: String,
    #[serde(default)]
    pub params: SearchParams,
    pub engine: EngineConfigPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsRequestPayload {
    pub index: String,
    #[serde(default)]
    pub params: InsightsParams,
    pub engine: EngineConfigPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultPayload {
    pub total_matches: u64,
    pub page: usize,
    pub page_size: usize,
    pub documents: Vec<Value>,
}

/// 집계 이름 -> 버킷 목록. 버킷 순서는 엔진이 돌려준 순서를 유지한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightsResultPayload {
    #[serde(flatten)]
    pub aggregations: BTreeMap<String, Vec<Bucket>>,
}

fn apply_filters(builder: QueryBuilder, filters: &FilterParams) -> QueryBuilder {
    builder
        .add_full_text_query(filters.query.as_deref())
        .filter_by_user(filters.user.as_deref())
        .filter_by_language(filters.language.as_deref())
        .filter_by_date_range(filters.from.as_deref(), filters.to.as_deref())
        .filter_by_hashtags(&filters.hashtags)
}

/// 검색 요청 파라미터로 문서 조회용 쿼리를 만든다.
pub fn build_search_descriptor(params: &SearchParams) -> CoreResult<QueryDescriptor> {
    let window = page_window(params.page(), params.page_size())?;

    let builder = apply_filters(QueryBuilder::new(), &params.filters)
        .paginate_window(window)
        .sort_by(params.sort_by.as_deref())?;

    Ok(builder.build())
}

/// 인사이트 요청 파라미터로 집계 전용 쿼리를 만든다.
pub fn build_insights_descriptor(params: &InsightsParams) -> CoreResult<QueryDescriptor> {
    let interval = params
        .interval
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(CalendarInterval::parse)
        .transpose()?;

    let top_n = params.top_n.unwrap_or(fields::DEFAULT_TERMS_SIZE);
    if top_n == 0 {
        return Err(CoreError::InvalidInput(
            "top_n은 1 이상이어야 합니다".to_string(),
        ));
    }

    let builder = apply_filters(QueryBuilder::new(), &params.filters)
        .aggregate_top_users(top_n)
        .aggregate_top_hashtags(top_n)
        .aggregate_top_urls(top_n)
        .aggregate_activity(interval);

    Ok(builder.build())
}

/// 검색 파이프라인을 실행한다.
pub async fn execute_search<E: SearchEngine>(
    engine: &E,
    index: &str,
    params: &SearchParams,
) -> CoreResult<SearchResultPayload> {
    validate_index_name(index, "index")?;
    let descriptor = build_search_descriptor(params)?;
    let response = run_descriptor(engine, index, &descriptor).await?;

    Ok(SearchResultPayload {
        total_matches: response.total,
        page: params.page(),
        page_size: params.page_size(),
        documents: response.documents,
    })
}

/// 인사이트(집계) 파이프라인을 실행한다.
pub async fn execute_insights<E: SearchEngine>(
    engine: &E,
    index: &str,
    params: &InsightsParams,
) -> CoreResult<InsightsResultPayload> {
    validate_index_name(index, "index")?;
    let descriptor = build_insights_descriptor(params)?;
    let mut response = run_descriptor(engine, index, &descriptor).await?;

    let aggregations = descriptor
        .aggs
        .keys()
        .map(|name| {
            let buckets = response.aggregations.remove(name).unwrap_or_default();
            (name.clone(), buckets)
        })
        .collect();

    Ok(InsightsResultPayload { aggregations })
}

/// 완성된 쿼리를 엔진에 한 번 전달한다.
pub async fn run_descriptor<E: SearchEngine>(
    engine: &E,
    index: &str,
    descriptor: &QueryDescriptor,
) -> CoreResult<EngineResponse> {
    let started = Instant::now();
    tracing::debug!(index, clauses = %descriptor, "검색 엔진 쿼리 실행");

    match engine.search(index, descriptor).await {
        Ok(response) => {
            tracing::info!(
                index,
                total = response.total,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "검색 엔진 쿼리 완료"
            );
            Ok(response)
        }
        Err(error) => {
            tracing::warn!(index, clauses = %descriptor, %error, "검색 엔진 쿼리 실패");
            Err(CoreError::EngineQueryFailed {
                index: index.to_string(),
                clauses: descriptor.clause_summary(),
                cause: error.to_string(),
            })
        }
    }
}
