// Input validation rejects malformed identifiers before any network call.

use httpmock::MockServer;

use crate::api::facility::NidVerificationRequest;
use crate::error::Error;
use crate::tests::common::*;
use crate::token::{ExpiryPolicy, Token, TokenKind};

fn assert_invalid_input<T: std::fmt::Debug>(result: crate::error::Result<T>, field: &str) {
    match result {
        Err(Error::InvalidInput {
            field: actual_field,
            ..
        }) => assert_eq!(actual_field, field),
        other => panic!("expected InvalidInput for {field}, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_identifiers_issue_zero_network_calls() {
    let server = MockServer::start_async().await;
    let catch_all = server
        .mock_async(|when, then| {
            let _ = when;
            then.status(200).json_body(json!({"result": {}}));
        })
        .await;
    let client = build_client(&server);

    for bad_iban in ["IR9108000050001154264320010", "TR910800005000115426432001"] {
        assert_invalid_input(client.iban_inquiry(bad_iban).await, "iban");
    }
    for bad_card in ["000000000000000", "A000000000000000"] {
        assert_invalid_input(client.card_inquiry(bad_card).await, "card");
        assert_invalid_input(client.card_to_iban(bad_card).await, "card");
    }

    assert_invalid_input(
        client
            .standard_reliability("001100110", "09192589756", "1234")
            .await,
        "national_id",
    );
    assert_invalid_input(
        client
            .standard_reliability("0011001100", "9192589756", "1234")
            .await,
        "phone_number",
    );
    assert_invalid_input(
        client
            .standard_reliability("0011001100", "09192589756", "123")
            .await,
        "otp",
    );
    assert_invalid_input(
        client.request_sms("12345", "https://example.ir/cb", &[]).await,
        "phone_number",
    );

    catch_all.assert_hits_async(0).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn nid_verification_rejects_bad_attributes_offline() {
    let server = MockServer::start_async().await;
    let catch_all = server
        .mock_async(|when, then| {
            let _ = when;
            then.status(200).json_body(json!({"result": {}}));
        })
        .await;
    let client = build_client(&server);
    let token = Token::load(
        TokenKind::FacilitySmsAccess,
        &raw_token("1399/03/06 12:33:01", 600_000, &[]),
        None,
        ExpiryPolicy::Expiring,
    )
    .unwrap();

    let base = NidVerificationRequest {
        national_id: "0011001100",
        birth_date: "1361/08/02",
        gender: "زن",
        full_name: Some("فاطمه تستی"),
        ..Default::default()
    };

    let bad_birth_date = NidVerificationRequest {
        birth_date: "1361-08-02",
        ..base.clone()
    };
    assert_invalid_input(
        client.national_id_verification(&token, &bad_birth_date).await,
        "birth_date",
    );

    let bad_gender = NidVerificationRequest {
        gender: "female",
        ..base.clone()
    };
    assert_invalid_input(
        client.national_id_verification(&token, &bad_gender).await,
        "gender",
    );

    let no_names = NidVerificationRequest {
        full_name: None,
        ..base.clone()
    };
    assert_invalid_input(
        client.national_id_verification(&token, &no_names).await,
        "full_name",
    );

    catch_all.assert_hits_async(0).await;
}
