// Endpoint operations against a mocked provider.

use httpmock::Method::{GET, POST};
use httpmock::MockServer;

use crate::tests::common::*;

async fn mount_token_endpoint(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST).path("/dev/v2/oauth2/token");
            then.status(200).json_body(token_envelope(
                "cc-token-1",
                864_000_000,
                &["oak:iban-inquiry:get", "card:information:get"],
            ));
        })
        .await
}

#[tokio::test(flavor = "multi_thread")]
async fn card_inquiry_projects_result() {
    let server = MockServer::start_async().await;
    let _token = mount_token_endpoint(&server).await;
    let card_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!(
                    "/mpg/v2/clients/{MOCK_CLIENT_ID}/cards/0000000000000000"
                ))
                .query_param_exists("trackId")
                .header("authorization", "Bearer cc-token-1");
            then.status(200).json_body(json!({
                "result": {"result": "0", "name": "X"},
                "status": "DONE",
                "trackId": "get-cardInfo-0232",
            }));
        })
        .await;

    let client = build_client(&server);
    let card = client.card_inquiry("0000000000000000").await.unwrap();

    assert!(card.is_valid());
    assert_eq!(card.full_name(), Some("X"));
    card_mock.assert_hits_async(1).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn card_to_iban_resolves_deposit() {
    let server = MockServer::start_async().await;
    let _token = mount_token_endpoint(&server).await;
    let resolve_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/facility/v2/clients/{MOCK_CLIENT_ID}/cardToIban"))
                .query_param("card", "6362141081734437")
                .header("authorization", "Bearer cc-token-1");
            then.status(200).json_body(json!({
                "result": {
                    "IBAN": MOCK_IBAN,
                    "bankName": "قرض الحسنه رسالت",
                    "deposit": "10.6423499.1",
                    "card": "6362141081734437",
                    "depositStatus": "02",
                    "depositOwners": [{"firstName": "شیما", "lastName": "کیایی"}],
                },
                "status": "DONE",
                "trackId": "cardToIban-029",
            }));
        })
        .await;

    let client = build_client(&server);
    let resolved = client.card_to_iban("6362141081734437").await.unwrap();

    assert!(resolved.is_active());
    assert_eq!(resolved.card.as_deref(), Some("6362141081734437"));
    assert_eq!(resolved.deposit.iban.as_deref(), Some(MOCK_IBAN));
    resolve_mock.assert_hits_async(1).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn standard_reliability_returns_raw_report() {
    let server = MockServer::start_async().await;
    let _token = mount_token_endpoint(&server).await;
    let report_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!(
                    "/oak/v2/clients/{MOCK_CLIENT_ID}/users/0011001100/standardReliability"
                ))
                .query_param("phoneNumber", "09192589756")
                .query_param("otp", "1234")
                .header("authorization", "Bearer cc-token-1");
            then.status(200).json_body(json!({
                "result": {"result": {"State": 1, "Valid": true}},
                "status": "DONE",
                "trackId": "getUserinfo876543",
            }));
        })
        .await;

    let client = build_client(&server);
    let report = client
        .standard_reliability("0011001100", "09192589756", "1234")
        .await
        .unwrap();

    assert_eq!(report["result"]["Valid"], json!(true));
    report_mock.assert_hits_async(1).await;
}
