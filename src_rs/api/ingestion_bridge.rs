// 목적:
// - Python에서 호출 가능한 적재 브릿지 클래스를 제공한다.
//
// 설명:
// - 적재 페이로드(JSON)를 받아 인덱스 생성/bulk 적재를 실행하고 결과 JSON을 반환한다.
//
// 디자인 패턴:
// - 파사드(Facade).
//
// 참조:
// - src_rs/core/ingestion_pipeline.rs

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::api::create_runtime;
use crate::core::ingestion_pipeline::{execute_ingestion, IngestionRequestPayload};

/// Python에 노출되는 적재 브릿지 클래스다.
#[pyclass(name = "IngestionBridge")]
pub struct PyIngestionBridge;

#[pymethods]
impl PyIngestionBridge {
    #[new]
    pub fn new() -> Self {
        crate::core::logging::init_tracing();
        Self
    }

    /// 적재 작업 페이로드(JSON)를 실행하고 결과 JSON을 반환한다.
    pub fn execute(&self, payload_json: &str) -> PyResult<String> {
        let payload: IngestionRequestPayload =
            serde_json::from_str(payload_json).map_err(|error| {
                PyValueError::new_err(format!(
                    "적재 페이로드 JSON 파싱에 실패했습니다: {}",
                    error
                ))
            })?;

        let runtime = create_runtime().map_err(PyRuntimeError::new_err)?;
        let result = runtime
            .block_on(execute_ingestion(payload))
            .map_err(|error| PyRuntimeError::new_err(error.to_string()))?;

        serde_json::to_string(&result)
            .map_err(|error| PyRuntimeError::new_err(format!("적재 결과 직렬화 실패: {}", error)))
    }
}
