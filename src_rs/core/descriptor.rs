// 목적:
// - 검색 엔진에 전달되는 구조화 쿼리(QueryDescriptor)의 데이터 모델을 정의한다.
//
// 설명:
// - 타입 구조가 Elasticsearch 요청 본문과 1:1로 대응하도록 serde 속성을 맞춘다.
// - 직렬화 후 재파싱하면 필드 단위로 동일한 값이 복원된다.
// - `{"<필드명>": 값}` 형태의 단일 키 객체는 FieldEntry로 표현한다.
//
// 디자인 패턴:
// - 값 객체(Value Object) + 태그드 유니온(Tagged Union).
//
// 참조:
// - src_rs/core/query_builder.rs
// - src_rs/index/es_client.rs

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::errors::{CoreError, CoreResult};

/// 필드명을 키로 갖는 단일 엔트리 객체(`{"tweet_time": {...}}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry<T> {
    pub field: String,
    pub value: T,
}

impl<T> FieldEntry<T> {
    pub fn new(field: impl Into<String>, value: T) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }
}

impl<T: Serialize> Serialize for FieldEntry<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.value)?;
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldEntry<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, T>::deserialize(deserializer)?;
        let mut iter = entries.into_iter();
        match (iter.next(), iter.next()) {
            (Some((field, value)), None) => Ok(Self { field, value }),
            _ => Err(de::Error::custom(
                "필드 엔트리는 키가 정확히 1개인 객체여야 합니다",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub order: SortDirection,
}

pub type SortClause = FieldEntry<SortOrder>;

/// 전문 검색 다중 필드 매칭 절.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiMatch {
    pub query: String,
    pub fields: Vec<String>,
    pub fuzziness: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MustClause {
    MultiMatch(MultiMatch),
}

/// 범위 필터의 양 끝 경계(포함). 최소 하나는 존재한다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterClause {
    Term(FieldEntry<String>),
    Range(FieldEntry<RangeBounds>),
}

impl FilterClause {
    pub fn field(&self) -> &str {
        match self {
            FilterClause::Term(entry) => entry.field.as_str(),
            FilterClause::Range(entry) => entry.field.as_str(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolQuery {
    #[serde(default)]
    pub must: Vec<MustClause>,
    #[serde(default)]
    pub filter: Vec<FilterClause>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRoot {
    #[serde(rename = "bool")]
    pub boolean: BoolQuery,
}

/// 히스토그램 버킷 폭(달력 기준).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarInterval {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    #[default]
    Year,
}

impl CalendarInterval {
    /// 단어형(`month`) 또는 Elasticsearch 축약형(`1M`) 간격을 해석한다.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let trimmed = raw.trim();
        let interval = match trimmed {
            "1m" => Self::Minute,
            "1h" => Self::Hour,
            "1d" => Self::Day,
            "1w" => Self::Week,
            "1M" => Self::Month,
            "1q" => Self::Quarter,
            "1y" => Self::Year,
            _ => match trimmed.to_ascii_lowercase().as_str() {
                "minute" => Self::Minute,
                "hour" => Self::Hour,
                "day" => Self::Day,
                "week" => Self::Week,
                "month" => Self::Month,
                "quarter" => Self::Quarter,
                "year" => Self::Year,
                _ => return Err(CoreError::InvalidInterval(raw.to_string())),
            },
        };
        Ok(interval)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsAggregation {
    pub field: String,
    pub size: usize,
    pub order: FieldEntry<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateHistogramAggregation {
    pub field: String,
    pub calendar_interval: CalendarInterval,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Terms(TermsAggregation),
    DateHistogram(DateHistogramAggregation),
}

/// 결과 창(offset, limit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

/// 빌더가 완성한 엔진 전달용 쿼리 본문이다.
///
/// `from`이 없으면 집계 전용 요청(`size = 0`)으로 취급한다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub query: QueryRoot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<usize>,
    #[serde(default)]
    pub size: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortClause>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aggs: BTreeMap<String, Aggregation>,
}

impl QueryDescriptor {
    pub fn must_clauses(&self) -> &[MustClause] {
        &self.query.boolean.must
    }

    pub fn filter_clauses(&self) -> &[FilterClause] {
        &self.query.boolean.filter
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.from.map(|offset| Pagination {
            offset,
            limit: self.size,
        })
    }

    /// 진단 로그/오류에 싣는 절 구성 요약.
    pub fn clause_summary(&self) -> String {
        let aggs = self.aggs.keys().cloned().collect::<Vec<_>>().join(",");
        format!(
            "must={} filter={} sort={} aggs=[{}]",
            self.must_clauses().len(),
            self.filter_clauses().len(),
            self.sort.len(),
            aggs
        )
    }

    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self)
            .map_err(|error| CoreError::Serialization(format!("쿼리 직렬화 실패: {}", error)))
    }

    pub fn from_json(raw: &str) -> CoreResult<Self> {
        serde_json::from_str(raw)
            .map_err(|error| CoreError::Serialization(format!("쿼리 파싱 실패: {}", error)))
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clause_summary())
    }
}
