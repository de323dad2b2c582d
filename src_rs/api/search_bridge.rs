// 목적:
// - Python에서 호출 가능한 검색 브릿지 클래스를 제공한다.
//
// 설명:
// - JSON 페이로드를 입력받아 검색/인사이트 파이프라인을 실행하고,
//   결과를 JSON 문자열로 반환한다.
// - 엔진 클라이언트는 호출마다 페이로드 설정으로 만들어 파이프라인에 주입한다.
//
// 디자인 패턴:
// - 파사드(Facade) + 실패 빠르게(Fail Fast).
//
// 참조:
// - src_rs/core/search_pipeline.rs

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::api::create_runtime;
use crate::core::errors::CoreError;
use crate::core::search_pipeline::{
    execute_insights, execute_search, InsightsRequestPayload, SearchRequestPayload,
};
use crate::index::es_client::ElasticsearchClient;

fn to_py_error(error: CoreError) -> PyErr {
    if error.is_client_error() {
        PyValueError::new_err(error.to_string())
    } else {
        PyRuntimeError::new_err(error.to_string())
    }
}

/// Python에 노출되는 검색 브릿지 클래스다.
#[pyclass(name = "SearchBridge")]
pub struct PySearchBridge {
    phase: String,
}

#[pymethods]
impl PySearchBridge {
    /// 검색 브릿지 객체를 생성한다.
    #[new]
    pub fn new() -> Self {
        crate::core::logging::init_tracing();
        Self {
            phase: "es-query-builder".to_string(),
        }
    }

    /// 현재 검색 브릿지 단계 정보를 반환한다.
    pub fn status(&self) -> String {
        self.phase.clone()
    }

    /// 검색 페이로드(JSON)를 실행하고 `{total_matches, page, page_size, documents}` JSON을 반환한다.
    pub fn search(&self, payload_json: &str) -> PyResult<String> {
        let payload: SearchRequestPayload = serde_json::from_str(payload_json).map_err(|error| {
            PyValueError::new_err(format!(
                "검색 페이로드 JSON 파싱에 실패했습니다: {}",
                error
            ))
        })?;

        let client = ElasticsearchClient::new(payload.engine.clone()).map_err(to_py_error)?;
        let runtime = create_runtime().map_err(PyRuntimeError::new_err)?;
        let result = runtime
            .block_on(execute_search(&client, &payload.index, &payload.params))
            .map_err(to_py_error)?;

        serde_json::to_string(&result)
            .map_err(|error| PyRuntimeError::new_err(format!("검색 결과 직렬화 실패: {}", error)))
    }

    /// 인사이트 페이로드(JSON)를 실행하고 집계 이름별 버킷 JSON을 반환한다.
    pub fn insights(&self, payload_json: &str) -> PyResult<String> {
        let payload: InsightsRequestPayload =
            serde_json::from_str(payload_json).map_err(|error| {
                PyValueError::new_err(format!(
                    "인사이트 페이로드 JSON 파싱에 실패했습니다: {}",
                    error
                ))
            })?;

        let client = ElasticsearchClient::new(payload.engine.clone()).map_err(to_py_error)?;
        let runtime = create_runtime().map_err(PyRuntimeError::new_err)?;
        let result = runtime
            .block_on(execute_insights(&client, &payload.index, &payload.params))
            .map_err(to_py_error)?;

        serde_json::to_string(&result).map_err(|error| {
            PyRuntimeError::new_err(format!("인사이트 결과 직렬화 실패: {}", error))
        })
    }
}
