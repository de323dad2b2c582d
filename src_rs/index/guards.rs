// 목적:
// - 검색 엔진으로 나가기 전 인덱스명/엔드포인트 값을 검증한다.
//
// 설명:
// - 인덱스명은 URL 경로에 그대로 들어가므로 허용 문자를 좁게 제한한다.
//
// 디자인 패턴:
// - 가드 함수(Guard Function).
//
// 참조:
// - src_rs/index/es_client.rs

use crate::core::errors::{CoreError, CoreResult};

/// 인덱스 이름의 허용 문자를 검증한다.
pub fn validate_index_name(value: &str, field_name: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidConfig(format!(
            "{}는 비어 있을 수 없습니다",
            field_name
        )));
    }

    if value == "." || value == ".." || value.starts_with(&['-', '_', '+'][..]) {
        return Err(CoreError::InvalidConfig(format!(
            "{}는 '.', '..' 이거나 '-', '_', '+'로 시작할 수 없습니다: {}",
            field_name, value
        )));
    }

    let valid = value.chars().all(|ch| {
        ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_' || ch == '.'
    });

    if !valid {
        return Err(CoreError::InvalidConfig(format!(
            "{}에는 영문 소문자/숫자/'-'/'_'/'.'만 사용할 수 있습니다: {}",
            field_name, value
        )));
    }

    Ok(())
}

/// 엔드포인트 URL의 스킴을 검증하고 끝의 '/'를 제거한 값을 반환한다.
pub fn normalize_endpoint(url: &str) -> CoreResult<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidConfig(
            "engine.url은 비어 있을 수 없습니다".to_string(),
        ));
    }

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(CoreError::InvalidConfig(format!(
            "engine.url은 http:// 또는 https://로 시작해야 합니다: {}",
            trimmed
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
