//! End-to-end checks through the public facade.

use dnsdb::{DnsdbClient, DnsdbError, QuotaValue, LIMIT_HEADER, REMAINING_HEADER};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> DnsdbClient {
    DnsdbClient::builder("integration-key")
        .base_url(server.uri())
        .https_only(false)
        .build()
        .unwrap()
}

#[tokio::test]
async fn rdata_ip_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lookup/rdata/ip/1.2.3.4"))
        .and(header("X-API-Key", "integration-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(LIMIT_HEADER, "1000")
                .insert_header(REMAINING_HEADER, "999")
                .set_body_string(
                    "{\"count\":5,\"rrname\":\"example.com\",\"rrtype\":\"A\",\"rdata\":\"1.2.3.4\"}\n",
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let records = client.rdata_query("1.2.3.4", "ip").await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].count, 5);
    assert_eq!(records[0].rrname, "example.com");
    assert_eq!(records[0].rrtype, "A");
    assert_eq!(records[0].rdata, "1.2.3.4");
}

#[tokio::test]
async fn last_query_exhausts_quota() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lookup/rrset/name/example.com"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(LIMIT_HEADER, "10")
                .insert_header(REMAINING_HEADER, "0")
                .set_body_string(
                    "{\"count\":1,\"rrname\":\"example.com.\",\"rrtype\":\"A\",\"bailiwick\":\"example.com.\",\"rdata\":[\"10.0.0.1\"]}\n",
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.rrset_query("example.com").await.unwrap().len(), 1);

    let err = client.rrset_query("example.com").await.unwrap_err();
    assert!(err.records.is_empty());
    assert!(matches!(
        err.source,
        DnsdbError::QuotaExceeded { limit: QuotaValue::Count(10) }
    ));
}
