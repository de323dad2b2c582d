#![allow(non_local_definitions)]

// 목적:
// - IOA 트윗 아카이브 검색 코어의 진입점을 제공한다.
//
// 설명:
// - 검색 파라미터를 Elasticsearch 구조화 쿼리로 조립하는 빌더가 핵심이다.
// - 실행 파사드는 주입된 엔진 핸들로 쿼리를 보내고 응답을 재구성한다.
// - Python 바인딩은 `python` feature에서만 노출한다.
//
// 디자인 패턴:
// - 계층형 모듈 구조(api/core/index).
//
// 참조:
// - src_rs/core/query_builder.rs
// - src_rs/api/search_bridge.rs

#[cfg(feature = "python")]
pub mod api;
pub mod core;
pub mod index;

pub use crate::core::descriptor::{CalendarInterval, QueryDescriptor};
pub use crate::core::errors::{CoreError, CoreResult};
pub use crate::core::query_builder::{QueryBuilder, SortKey};
pub use crate::index::engine::{Bucket, BucketKey, EngineResponse, SearchEngine};
pub use crate::index::es_client::{ElasticsearchClient, EngineConfigPayload};

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::PyModule;

#[cfg(feature = "python")]
#[pymodule]
fn _ioa_search(m: &Bound<'_, PyModule>) -> PyResult<()> {
    crate::core::logging::init_tracing();
    m.add_class::<api::search_bridge::PySearchBridge>()?;
    m.add_class::<api::ingestion_bridge::PyIngestionBridge>()?;
    Ok(())
}
