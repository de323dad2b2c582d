use rstest::rstest;
use serde_json::json;

use _ioa_search::core::descriptor::{
    Aggregation, CalendarInterval, FieldEntry, FilterClause, MustClause, Pagination,
    QueryDescriptor, RangeBounds, SortDirection,
};
use _ioa_search::core::errors::CoreError;
use _ioa_search::core::query_builder::{page_window, QueryBuilder, SortKey};

#[test]
fn last_pagination_call_wins() {
    let descriptor = QueryBuilder::new().paginate(0, 10).paginate(20, 5).build();

    assert_eq!(
        descriptor.pagination(),
        Some(Pagination {
            offset: 20,
            limit: 5
        })
    );
}

#[test]
fn unpaginated_descriptor_requests_no_hits() {
    let descriptor = QueryBuilder::new().aggregate_top_users(10).build();
    assert_eq!(descriptor.pagination(), None);
    assert_eq!(descriptor.size, 0);
}

#[test]
fn zero_limit_is_a_legal_window() {
    let descriptor = QueryBuilder::new().paginate(0, 0).build();
    assert_eq!(descriptor.from, Some(0));
    assert_eq!(descriptor.size, 0);
}

#[rstest]
#[case(vec![])]
#[case(vec!["news"])]
#[case(vec!["news", "breaking", "storm"])]
fn one_term_filter_per_hashtag(#[case] hashtags: Vec<&str>) {
    let descriptor = QueryBuilder::new().filter_by_hashtags(&hashtags).build();

    assert_eq!(descriptor.filter_clauses().len(), hashtags.len());
    for (clause, hashtag) in descriptor.filter_clauses().iter().zip(&hashtags) {
        assert_eq!(
            clause,
            &FilterClause::Term(FieldEntry::new("hashtags", hashtag.to_string()))
        );
    }
}

#[test]
fn blank_hashtags_are_skipped() {
    let descriptor = QueryBuilder::new()
        .filter_by_hashtags(["news", "", "  "])
        .build();
    assert_eq!(descriptor.filter_clauses().len(), 1);
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
fn empty_full_text_is_a_no_op(#[case] text: Option<&str>) {
    let descriptor = QueryBuilder::new().add_full_text_query(text).build();
    assert!(descriptor.must_clauses().is_empty());
}

#[test]
fn full_text_is_fuzzy_multi_field_match() {
    let descriptor = QueryBuilder::new().add_full_text_query(Some("storm")).build();

    let MustClause::MultiMatch(clause) = &descriptor.must_clauses()[0];
    assert_eq!(clause.query, "storm");
    assert_eq!(
        clause.fields,
        vec!["tweet_text", "user_display_name", "hashtags"]
    );
    assert_eq!(clause.fuzziness, "AUTO");
}

#[rstest]
#[case(None, None)]
#[case(Some(""), Some(""))]
fn absent_identity_filters_add_nothing(#[case] user: Option<&str>, #[case] language: Option<&str>) {
    let descriptor = QueryBuilder::new()
        .filter_by_user(user)
        .filter_by_language(language)
        .build();
    assert!(descriptor.filter_clauses().is_empty());
}

#[test]
fn identity_filters_use_keyword_fields() {
    let descriptor = QueryBuilder::new()
        .filter_by_user(Some("12345"))
        .filter_by_language(Some("en"))
        .build();

    assert_eq!(
        descriptor.filter_clauses(),
        &[
            FilterClause::Term(FieldEntry::new("userid.keyword", "12345".to_string())),
            FilterClause::Term(FieldEntry::new("tweet_language.keyword", "en".to_string())),
        ]
    );
}

#[rstest]
#[case(None, None, None)]
#[case(Some("2019-01-01"), None, Some(RangeBounds { gte: Some("2019-01-01".to_string()), lte: None }))]
#[case(None, Some("2020-12-31"), Some(RangeBounds { gte: None, lte: Some("2020-12-31".to_string()) }))]
#[case(
    Some("2019-01-01"),
    Some("2020-12-31"),
    Some(RangeBounds { gte: Some("2019-01-01".to_string()), lte: Some("2020-12-31".to_string()) })
)]
fn date_range_maps_bounds_inclusively(
    #[case] from: Option<&str>,
    #[case] to: Option<&str>,
    #[case] expected: Option<RangeBounds>,
) {
    let descriptor = QueryBuilder::new().filter_by_date_range(from, to).build();

    let expected = expected
        .map(|bounds| vec![FilterClause::Range(FieldEntry::new("tweet_time", bounds))])
        .unwrap_or_default();
    assert_eq!(descriptor.filter_clauses(), expected.as_slice());
}

#[test]
fn inverted_date_range_is_passed_through() {
    let descriptor = QueryBuilder::new()
        .filter_by_date_range(Some("2021-01-01"), Some("2019-01-01"))
        .build();
    assert_eq!(descriptor.filter_clauses().len(), 1);
}

#[rstest]
#[case("accuracy", "_score")]
#[case("time", "tweet_time")]
#[case("retweets", "retweet_count")]
#[case("likes", "like_count")]
fn sort_keys_map_to_descending_fields(#[case] key: &str, #[case] field: &str) {
    let descriptor = QueryBuilder::new().sort_by(Some(key)).unwrap().build();

    assert_eq!(descriptor.sort.len(), 1);
    assert_eq!(descriptor.sort[0].field, field);
    assert_eq!(descriptor.sort[0].value.order, SortDirection::Desc);
}

#[rstest]
#[case("bogus")]
#[case("Likes ")]
#[case("_score")]
fn unknown_sort_key_fails_loudly(#[case] key: &str) {
    let result = QueryBuilder::new().sort_by(Some(key));
    assert!(matches!(result, Err(CoreError::InvalidSortKey(raw)) if raw == key));
}

#[rstest]
#[case(None)]
#[case(Some(""))]
fn absent_sort_key_keeps_relevance_order(#[case] key: Option<&str>) {
    let descriptor = QueryBuilder::new().sort_by(key).unwrap().build();
    assert!(descriptor.sort.is_empty());
}

#[test]
fn last_sort_call_wins() {
    let descriptor = QueryBuilder::new()
        .sort_by_key(SortKey::Likes)
        .sort_by_key(SortKey::Time)
        .build();
    assert_eq!(descriptor.sort.len(), 1);
    assert_eq!(descriptor.sort[0].field, "tweet_time");
}

#[test]
fn sort_key_parse_round_trips_names() {
    for key in SortKey::ALL {
        assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
    }
}

#[test]
fn reregistering_aggregation_overwrites() {
    let descriptor = QueryBuilder::new()
        .register_terms_aggregation("top_users", "user_screen_name.keyword", 10, true)
        .register_terms_aggregation("top_users", "userid.keyword", 25, false)
        .build();

    assert_eq!(descriptor.aggs.len(), 1);
    match &descriptor.aggs["top_users"] {
        Aggregation::Terms(terms) => {
            assert_eq!(terms.field, "userid.keyword");
            assert_eq!(terms.size, 25);
            assert_eq!(terms.order, FieldEntry::new("_count", SortDirection::Asc));
        }
        other => panic!("unexpected aggregation: {:?}", other),
    }
}

#[test]
fn histogram_defaults_to_yearly() {
    let descriptor = QueryBuilder::new()
        .register_date_histogram_aggregation("tweets_over_time", "tweet_time", None)
        .build();

    match &descriptor.aggs["tweets_over_time"] {
        Aggregation::DateHistogram(histogram) => {
            assert_eq!(histogram.field, "tweet_time");
            assert_eq!(histogram.calendar_interval, CalendarInterval::Year);
        }
        other => panic!("unexpected aggregation: {:?}", other),
    }
}

#[test]
fn blank_aggregation_name_is_ignored() {
    let descriptor = QueryBuilder::new()
        .register_terms_aggregation("", "hashtags", 10, true)
        .register_date_histogram_aggregation(" ", "tweet_time", None)
        .build();
    assert!(descriptor.aggs.is_empty());
}

#[test]
fn distinct_directives_are_order_independent() {
    let first = QueryBuilder::new()
        .paginate(10, 10)
        .sort_by_key(SortKey::Retweets)
        .aggregate_top_urls(5)
        .aggregate_activity(Some(CalendarInterval::Day))
        .build();
    let second = QueryBuilder::new()
        .aggregate_activity(Some(CalendarInterval::Day))
        .aggregate_top_urls(5)
        .sort_by_key(SortKey::Retweets)
        .paginate(10, 10)
        .build();

    assert_eq!(first, second);
}

#[test]
fn build_returns_a_snapshot() {
    let builder = QueryBuilder::new().filter_by_language(Some("en"));
    let snapshot = builder.build();
    let extended = builder.filter_by_user(Some("42")).build();

    assert_eq!(snapshot.filter_clauses().len(), 1);
    assert_eq!(extended.filter_clauses().len(), 2);
}

#[rstest]
#[case(1, 10, 0)]
#[case(2, 5, 5)]
#[case(3, 10, 20)]
fn page_window_is_one_indexed(#[case] page: usize, #[case] size: usize, #[case] offset: usize) {
    assert_eq!(
        page_window(page, size).unwrap(),
        Pagination {
            offset,
            limit: size
        }
    );
}

#[rstest]
#[case(0, 10)]
#[case(1, 0)]
#[case(usize::MAX, 2)]
fn page_window_rejects_invalid_input(#[case] page: usize, #[case] size: usize) {
    assert!(matches!(
        page_window(page, size),
        Err(CoreError::InvalidInput(_))
    ));
}

fn full_descriptor() -> QueryDescriptor {
    QueryBuilder::new()
        .add_full_text_query(Some("storm"))
        .filter_by_user(Some("12345"))
        .filter_by_language(Some("en"))
        .filter_by_date_range(Some("2019-01-01"), Some("2020-01-01"))
        .filter_by_hashtags(["news", "breaking"])
        .paginate(5, 5)
        .sort_by_key(SortKey::Accuracy)
        .aggregate_top_users(10)
        .aggregate_top_hashtags(10)
        .aggregate_top_urls(10)
        .aggregate_activity(Some(CalendarInterval::Month))
        .build()
}

#[test]
fn descriptor_survives_serialization_round_trip() {
    let descriptor = full_descriptor();
    let raw = descriptor.to_json().unwrap();
    assert_eq!(QueryDescriptor::from_json(&raw).unwrap(), descriptor);
}

#[test]
fn descriptor_serializes_to_engine_body() {
    let value = serde_json::to_value(full_descriptor()).unwrap();

    assert_eq!(
        value,
        json!({
            "query": {"bool": {
                "must": [{"multi_match": {
                    "query": "storm",
                    "fields": ["tweet_text", "user_display_name", "hashtags"],
                    "fuzziness": "AUTO"
                }}],
                "filter": [
                    {"term": {"userid.keyword": "12345"}},
                    {"term": {"tweet_language.keyword": "en"}},
                    {"range": {"tweet_time": {"gte": "2019-01-01", "lte": "2020-01-01"}}},
                    {"term": {"hashtags": "news"}},
                    {"term": {"hashtags": "breaking"}}
                ]
            }},
            "from": 5,
            "size": 5,
            "sort": [{"_score": {"order": "desc"}}],
            "aggs": {
                "top_hashtags": {"terms": {"field": "hashtags", "size": 10, "order": {"_count": "desc"}}},
                "top_urls": {"terms": {"field": "urls", "size": 10, "order": {"_count": "desc"}}},
                "top_users": {"terms": {"field": "user_screen_name.keyword", "size": 10, "order": {"_count": "desc"}}},
                "tweets_over_time": {"date_histogram": {"field": "tweet_time", "calendar_interval": "month"}}
            }
        })
    );
}
