// 목적:
// - Rust 코어 계층의 표준 오류 타입을 정의한다.
//
// 설명:
// - 입력/설정/정렬 키/엔진/HTTP/직렬화 오류를 명시적으로 구분해 호출자에 전달한다.
// - 엔진 실패는 인덱스명과 절(clause) 요약을 함께 실어 진단 가능하게 한다.
//
// 디자인 패턴:
// - 도메인 오류 열거형(Domain Error Enum).
//
// 참조:
// - src_rs/core/query_builder.rs
// - src_rs/core/search_pipeline.rs

use thiserror::Error;

/// 코어 계층에서 공통으로 사용하는 오류 열거형이다.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("입력값이 유효하지 않습니다: {0}")]
    InvalidInput(String),
    #[error("설정값이 유효하지 않습니다: {0}")]
    InvalidConfig(String),
    #[error("지원하지 않는 정렬 키입니다: {0} (accuracy|time|retweets|likes)")]
    InvalidSortKey(String),
    #[error("지원하지 않는 히스토그램 간격입니다: {0}")]
    InvalidInterval(String),
    #[error("검색 엔진 쿼리 실행에 실패했습니다: index={index}, clauses={clauses}, cause={cause}")]
    EngineQueryFailed {
        index: String,
        clauses: String,
        cause: String,
    },
    #[error("검색 엔진 HTTP 호출에 실패했습니다: {0}")]
    Http(String),
    #[error("직렬화/역직렬화에 실패했습니다: {0}")]
    Serialization(String),
    #[error("런타임 처리 중 오류가 발생했습니다: {0}")]
    Runtime(String),
}

impl CoreError {
    /// 호출자 입력 오류(4xx 성격) 여부를 반환한다.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidInput(_) | CoreError::InvalidSortKey(_) | CoreError::InvalidInterval(_)
        )
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
