use std::sync::Mutex;

use _ioa_search::core::descriptor::QueryDescriptor;
use _ioa_search::core::errors::{CoreError, CoreResult};
use _ioa_search::index::engine::{EngineResponse, SearchEngine};

/// 받은 요청을 기록하고 미리 정한 응답을 돌려주는 엔진 더블.
pub struct RecordingEngine {
    response: EngineResponse,
    failure: Option<String>,
    pub seen: Mutex<Vec<(String, QueryDescriptor)>>,
}

impl RecordingEngine {
    pub fn answering(response: EngineResponse) -> Self {
        Self {
            response,
            failure: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(cause: &str) -> Self {
        Self {
            response: EngineResponse::default(),
            failure: Some(cause.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, QueryDescriptor)> {
        self.seen.lock().unwrap().clone()
    }
}

impl SearchEngine for RecordingEngine {
    async fn search(&self, index: &str, descriptor: &QueryDescriptor) -> CoreResult<EngineResponse> {
        self.seen
            .lock()
            .unwrap()
            .push((index.to_string(), descriptor.clone()));

        match &self.failure {
            Some(cause) => Err(CoreError::Http(cause.clone())),
            None => Ok(self.response.clone()),
        }
    }
}
