// 목적:
// - 트윗 인덱스의 필드명/집계명 규약을 한곳에 고정한다.
//
// 설명:
// - 정확 일치 필터와 집계는 keyword 변형을, 전문 검색은 analyzed 필드를 사용한다.
// - hashtags/urls는 인덱스 생성 시 keyword 타입으로 매핑되므로 접미사가 없다.
//
// 디자인 패턴:
// - 상수 테이블(Constant Table).
//
// 참조:
// - src_rs/core/query_builder.rs
// - src_rs/core/ingestion_pipeline.rs

/// 범위 필터, 정렬, 히스토그램에 쓰는 시간 필드.
pub const TIME_FIELD: &str = "tweet_time";
pub const USER_ID_FIELD: &str = "userid.keyword";
pub const LANGUAGE_FIELD: &str = "tweet_language.keyword";
pub const HASHTAGS_FIELD: &str = "hashtags";
pub const URLS_FIELD: &str = "urls";
pub const USER_SCREEN_NAME_FIELD: &str = "user_screen_name.keyword";

pub const RETWEET_COUNT_FIELD: &str = "retweet_count";
pub const LIKE_COUNT_FIELD: &str = "like_count";
pub const SCORE_FIELD: &str = "_score";
pub const COUNT_ORDER_KEY: &str = "_count";

/// 전문 검색 대상 필드(본문, 사용자 표시명, 해시태그).
pub const FULL_TEXT_FIELDS: [&str; 3] = ["tweet_text", "user_display_name", "hashtags"];
pub const FULL_TEXT_FUZZINESS: &str = "AUTO";

pub const TOP_USERS_AGG: &str = "top_users";
pub const TOP_HASHTAGS_AGG: &str = "top_hashtags";
pub const TOP_URLS_AGG: &str = "top_urls";
pub const TWEETS_OVER_TIME_AGG: &str = "tweets_over_time";

pub const DEFAULT_TERMS_SIZE: usize = 10;
pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const DATASET_FIELD: &str = "dataset";
pub const FILE_NAME_FIELD: &str = "file_name";
