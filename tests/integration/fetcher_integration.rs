//! Integration tests for window fetching against a mock Fiscal Data API

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::fixtures::debt_csv;
use crate::common::logging::{init_test_logging, log_test_step};
use crate::common::{mock_config, window_filter, API_PATH};
use debt_tracker::api::TreasuryClient;
use debt_tracker::fetcher::DebtFetcher;
use debt_tracker::models::DateRange;

fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(
        NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
        NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
    )
    .unwrap()
}

#[test_log::test(tokio::test)]
async fn test_single_window_row_count_matches_csv() {
    init_test_logging();
    log_test_step("Fetching one window with a well-formed body");

    let server = MockServer::start().await;
    let body = debt_csv(&[
        ("2021-01-29", "27753657574488.39"),
        ("2021-01-28", "27753520312376.72"),
        ("2021-01-27", "27759498493591.54"),
    ]);

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("format", "csv"))
        .and(query_param("filter", window_filter("2021-01-01", "2021-01-31").as_str()))
        .and(query_param("page[size]", "100"))
        .and(header("Accept", "text/csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = mock_config(&server, &dir.path().join("unused.csv"));
    let fetcher = DebtFetcher::new(TreasuryClient::new(&config).unwrap());

    let table = fetcher.fetch(&range("2021-01-01", "2021-01-31")).await.unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.records[0].record_date, "2021-01-29");
    assert_eq!(table.records[2].tot_pub_debt_out_amt, dec!(27759498493591.54));
    assert_eq!(
        table.records[0].extra.get("record_calendar_day").map(String::as_str),
        Some("29")
    );
}

#[test_log::test(tokio::test)]
async fn test_windows_are_requested_in_order_and_failures_skipped() {
    init_test_logging();
    log_test_step("Fetching three windows, middle one failing");

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("filter", window_filter("2020-01-01", "2020-04-10").as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(debt_csv(&[("2020-01-02", "23221760820470.35")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("filter", window_filter("2020-04-11", "2020-07-20").as_str()))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("filter", window_filter("2020-07-21", "2020-09-01").as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(debt_csv(&[("2020-09-01", "26728118651998.62")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = mock_config(&server, &dir.path().join("unused.csv"));
    let fetcher = DebtFetcher::new(TreasuryClient::new(&config).unwrap());

    let table = fetcher.fetch(&range("2020-01-01", "2020-09-01")).await.unwrap();

    let dates: Vec<&str> = table.records.iter().map(|r| r.record_date.as_str()).collect();
    assert_eq!(dates, vec!["2020-01-02", "2020-09-01"]);

    let requests = server.received_requests().await.unwrap();
    let filters: Vec<String> = requests
        .iter()
        .filter_map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "filter")
                .map(|(_, v)| v.into_owned())
        })
        .collect();
    assert_eq!(
        filters,
        vec![
            window_filter("2020-01-01", "2020-04-10"),
            window_filter("2020-04-11", "2020-07-20"),
            window_filter("2020-07-21", "2020-09-01"),
        ]
    );
}
