// 목적:
// - 핵심 런타임 계층 모듈을 선언한다.
//
// 설명:
// - 쿼리 모델/빌더, 검색·적재 파이프라인, 공통 오류 모델, 로깅 초기화를 분리한다.
//
// 디자인 패턴:
// - 명시적 오류 모델(Explicit Error Model).
//
// 참조:
// - src_rs/core/errors.rs
// - src_rs/core/query_builder.rs
// - src_rs/core/search_pipeline.rs
// - src_rs/core/ingestion_pipeline.rs

pub mod descriptor;
pub mod errors;
pub mod ingestion_pipeline;
pub mod logging;
pub mod query_builder;
pub mod search_pipeline;
