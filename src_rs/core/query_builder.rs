// 목적:
// - 검색/필터/정렬/페이지/집계 지시를 하나의 QueryDescriptor로 누적한다.
//
// 설명:
// - 각 메서드는 빌더를 소유권으로 받아 변경 후 그대로 돌려준다(체이닝).
// - 비어 있거나 공백뿐인 입력은 절을 추가하지 않는다(no-op).
// - 같은 종류의 필터를 여러 번 호출하면 절이 누적되어 AND로 결합된다.
// - 페이지/정렬/같은 이름의 집계는 단일 슬롯이므로 마지막 호출이 이긴다.
// - 실패할 수 있는 지시는 정렬 키(sort_by) 하나뿐이다.
//
// 디자인 패턴:
// - 소유권 기반 빌더(Owned Builder) + 열거형 조회 테이블.
//
// 참조:
// - src_rs/core/descriptor.rs
// - src_rs/index/fields.rs

use std::str::FromStr;

use crate::core::descriptor::{
    Aggregation, CalendarInterval, DateHistogramAggregation, FieldEntry, FilterClause, MultiMatch,
    MustClause, Pagination, QueryDescriptor, RangeBounds, SortDirection, SortOrder,
    TermsAggregation,
};
use crate::core::errors::{CoreError, CoreResult};
use crate::index::fields;

/// 허용된 정렬 키. 모든 키는 내림차순으로 정렬한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Accuracy,
    Time,
    Retweets,
    Likes,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Accuracy,
        SortKey::Time,
        SortKey::Retweets,
        SortKey::Likes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Accuracy => "accuracy",
            SortKey::Time => "time",
            SortKey::Retweets => "retweets",
            SortKey::Likes => "likes",
        }
    }

    /// 엔진 측 정렬 필드명.
    pub fn field(self) -> &'static str {
        match self {
            SortKey::Accuracy => fields::SCORE_FIELD,
            SortKey::Time => fields::TIME_FIELD,
            SortKey::Retweets => fields::RETWEET_COUNT_FIELD,
            SortKey::Likes => fields::LIKE_COUNT_FIELD,
        }
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == raw.trim())
            .ok_or_else(|| CoreError::InvalidSortKey(raw.to_string()))
    }
}

/// 1부터 시작하는 페이지 번호를 결과 창으로 변환한다.
pub fn page_window(page: usize, page_size: usize) -> CoreResult<Pagination> {
    if page == 0 {
        return Err(CoreError::InvalidInput(
            "page는 1 이상이어야 합니다".to_string(),
        ));
    }

    if page_size == 0 {
        return Err(CoreError::InvalidInput(
            "size는 1 이상이어야 합니다".to_string(),
        ));
    }

    let offset = (page - 1).checked_mul(page_size).ok_or_else(|| {
        CoreError::InvalidInput(format!(
            "페이지 범위가 너무 큽니다: page={}, size={}",
            page, page_size
        ))
    })?;

    Ok(Pagination {
        offset,
        limit: page_size,
    })
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// 요청 하나마다 새로 만들어 쓰는 쿼리 빌더다.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    descriptor: QueryDescriptor,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 결과 창을 설정한다. limit=0은 집계 전용 요청에 쓰인다.
    pub fn paginate(mut self, offset: usize, limit: usize) -> Self {
        self.descriptor.from = Some(offset);
        self.descriptor.size = limit;
        self
    }

    pub fn paginate_window(self, window: Pagination) -> Self {
        self.paginate(window.offset, window.limit)
    }

    /// 본문/사용자 표시명/해시태그에 대한 퍼지 다중 필드 매칭을 추가한다.
    pub fn add_full_text_query(mut self, text: Option<&str>) -> Self {
        if let Some(text) = present(text) {
            self.descriptor
                .query
                .boolean
                .must
                .push(MustClause::MultiMatch(MultiMatch {
                    query: text.to_string(),
                    fields: fields::FULL_TEXT_FIELDS
                        .iter()
                        .map(|field| field.to_string())
                        .collect(),
                    fuzziness: fields::FULL_TEXT_FUZZINESS.to_string(),
                }));
        }
        self
    }

    pub fn filter_by_user(self, user_id: Option<&str>) -> Self {
        self.push_term(fields::USER_ID_FIELD, user_id)
    }

    pub fn filter_by_language(self, language: Option<&str>) -> Self {
        self.push_term(fields::LANGUAGE_FIELD, language)
    }

    /// `from`은 하한(gte), `to`는 상한(lte)이다. 순서 검증은 엔진에 맡긴다.
    pub fn filter_by_date_range(mut self, from: Option<&str>, to: Option<&str>) -> Self {
        let bounds = RangeBounds {
            gte: present(from).map(str::to_string),
            lte: present(to).map(str::to_string),
        };

        if bounds.gte.is_some() || bounds.lte.is_some() {
            self.descriptor
                .query
                .boolean
                .filter
                .push(FilterClause::Range(FieldEntry::new(fields::TIME_FIELD, bounds)));
        }
        self
    }

    /// 해시태그마다 정확 일치 필터를 하나씩 추가한다(모두 포함해야 매칭).
    pub fn filter_by_hashtags<I, S>(self, hashtags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        hashtags.into_iter().fold(self, |builder, hashtag| {
            builder.push_term(fields::HASHTAGS_FIELD, Some(hashtag.as_ref()))
        })
    }

    /// 정렬 키를 설정한다. 키가 없으면 기본 관련도 순서를 유지한다.
    pub fn sort_by(self, key: Option<&str>) -> CoreResult<Self> {
        match present(key) {
            Some(raw) => Ok(self.sort_by_key(raw.parse::<SortKey>()?)),
            None => Ok(self),
        }
    }

    pub fn sort_by_key(mut self, key: SortKey) -> Self {
        self.descriptor.sort = vec![FieldEntry::new(
            key.field(),
            SortOrder {
                order: SortDirection::Desc,
            },
        )];
        self
    }

    /// terms 집계를 `name`으로 등록한다. 같은 이름이 있으면 덮어쓴다.
    pub fn register_terms_aggregation(
        mut self,
        name: &str,
        field: &str,
        size: usize,
        order_by_count_desc: bool,
    ) -> Self {
        if name.trim().is_empty() || field.trim().is_empty() {
            return self;
        }

        let direction = if order_by_count_desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };

        self.descriptor.aggs.insert(
            name.to_string(),
            Aggregation::Terms(TermsAggregation {
                field: field.to_string(),
                size,
                order: FieldEntry::new(fields::COUNT_ORDER_KEY, direction),
            }),
        );
        self
    }

    /// date_histogram 집계를 등록한다. 간격이 없으면 연 단위다.
    pub fn register_date_histogram_aggregation(
        mut self,
        name: &str,
        field: &str,
        interval: Option<CalendarInterval>,
    ) -> Self {
        if name.trim().is_empty() || field.trim().is_empty() {
            return self;
        }

        self.descriptor.aggs.insert(
            name.to_string(),
            Aggregation::DateHistogram(DateHistogramAggregation {
                field: field.to_string(),
                calendar_interval: interval.unwrap_or_default(),
            }),
        );
        self
    }

    pub fn aggregate_top_users(self, size: usize) -> Self {
        self.register_terms_aggregation(
            fields::TOP_USERS_AGG,
            fields::USER_SCREEN_NAME_FIELD,
            size,
            true,
        )
    }

    pub fn aggregate_top_hashtags(self, size: usize) -> Self {
        self.register_terms_aggregation(fields::TOP_HASHTAGS_AGG, fields::HASHTAGS_FIELD, size, true)
    }

    pub fn aggregate_top_urls(self, size: usize) -> Self {
        self.register_terms_aggregation(fields::TOP_URLS_AGG, fields::URLS_FIELD, size, true)
    }

    pub fn aggregate_activity(self, interval: Option<CalendarInterval>) -> Self {
        self.register_date_histogram_aggregation(
            fields::TWEETS_OVER_TIME_AGG,
            fields::TIME_FIELD,
            interval,
        )
    }

    /// 현재 상태의 불변 스냅샷을 반환한다. 빌더는 이후 버려도 된다.
    pub fn build(&self) -> QueryDescriptor {
        self.descriptor.clone()
    }

    fn push_term(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = present(value) {
            self.descriptor
                .query
                .boolean
                .filter
                .push(FilterClause::Term(FieldEntry::new(field, value.to_string())));
        }
        self
    }
}
