// 목적:
// - 검색 엔진 인덱스 계층 모듈을 선언한다.
//
// 설명:
// - 엔진 경계 트레이트, Elasticsearch 클라이언트, 필드 규약, 가드 함수를 분리한다.
//
// 디자인 패턴:
// - 어댑터(Adapter).
//
// 참조:
// - src_rs/index/engine.rs
// - src_rs/index/es_client.rs

pub mod engine;
pub mod es_client;
pub mod fields;
pub mod guards;
