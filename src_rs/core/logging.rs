// 목적:
// - tracing 구독자를 초기화한다.
//
// 설명:
// - 필터는 IOA_SEARCH_LOG 환경 변수(EnvFilter 문법)에서 읽고 기본값은 info다.
// - Python 프로세스에서 브릿지가 여러 번 생성될 수 있으므로 반복 호출을 허용한다.
//
// 디자인 패턴:
// - 1회 초기화(Idempotent Init).
//
// 참조:
// - src_rs/api/search_bridge.rs

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "IOA_SEARCH_LOG";

/// 전역 구독자를 설치한다. 이미 설치되어 있으면 `false`를 반환한다.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
