mod common;

use common::*;
use serde_json::json;

#[tokio::test]
async fn test_discharge_valid_200() {
    let app = test_app().await;

    let mut statement = financing_statement();
    statement["debtors"][0]["businessName"] = json!("TEST BUS 2 DEBTOR");
    let (status, created) = post_json(
        &app,
        "/api/v1/financing-statements",
        create_header_account(&[PPR_ROLE]),
        &statement,
    )
    .await;
    assert_eq!(status, 201);
    let base_reg_num = created["baseRegistrationNumber"].as_str().unwrap().to_string();

    let mut request = discharge_request();
    request["baseDebtor"]["businessName"] = json!("TEST BUS 2 DEBTOR");
    request["baseRegistrationNumber"] = json!(base_reg_num);

    let (status, body) = post_json(
        &app,
        &discharge_uri(&base_reg_num),
        create_header_account(&[PPR_ROLE]),
        &request,
    )
    .await;

    assert_eq!(status, 200);
    assert!(body["dischargeRegistrationNumber"].as_str().is_some());
    assert!(body["createDateTime"].as_str().is_some());
    assert!(body.get("payment").is_none());
}

#[tokio::test]
async fn test_discharge_invalid_missing_basedebtor_400() {
    let app = test_app().await;
    let mut request = discharge_request();
    strip(&mut request, &["baseDebtor"]);

    let (status, body) = post_json(
        &app,
        &discharge_uri("023001B"),
        create_header_account(&[PPR_ROLE]),
        &request,
    )
    .await;

    assert_eq!(status, 400);
    assert!(body["error"]["details"].as_str().unwrap().contains("baseDebtor"));
}

#[tokio::test]
async fn test_discharge_invalid_regnum_404() {
    let app = test_app().await;
    let mut request = discharge_request();
    request["baseRegistrationNumber"] = json!("X12345X");

    let (status, _) = post_json(
        &app,
        &discharge_uri("X12345X"),
        create_header_account(&[PPR_ROLE]),
        &request,
    )
    .await;

    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_discharge_invalid_historical_400() {
    let app = test_app().await;
    let mut request = discharge_request();
    request["baseRegistrationNumber"] = json!("TEST0003");

    let (status, body) = post_json(
        &app,
        &discharge_uri("TEST0003"),
        create_header_account(&[PPR_ROLE]),
        &request,
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "BIZ_5101");
}

#[tokio::test]
async fn test_discharge_invalid_debtor_400() {
    let app = test_app().await;
    let mut request = discharge_request();
    request["baseRegistrationNumber"] = json!("TEST0001");
    request["baseDebtor"]["businessName"] = json!("TEST BUS 3 DEBTOR");

    let (status, _) = post_json(
        &app,
        &discharge_uri("TEST0001"),
        create_header_account(&[PPR_ROLE]),
        &request,
    )
    .await;

    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_discharge_nonstaff_missing_account_400() {
    let app = test_app().await;
    let mut request = discharge_request();
    request["baseDebtor"]["businessName"] = json!("TEST BUS 2 DEBTOR");
    request["baseRegistrationNumber"] = json!("TEST0001");

    let (status, _) = post_json(
        &app,
        &discharge_uri("TEST0001"),
        create_header(&[COLIN_ROLE]),
        &request,
    )
    .await;

    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_discharge_staff_missing_account_200() {
    let app = test_app().await;
    let mut request = discharge_request();
    request["baseDebtor"]["businessName"] = json!("TEST BUS 2 DEBTOR");
    request["baseRegistrationNumber"] = json!("TEST0001");

    let (status, _) = post_json(
        &app,
        &discharge_uri("TEST0001"),
        create_header(&[PPR_ROLE, STAFF_ROLE]),
        &request,
    )
    .await;

    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_discharge_nonstaff_unauthorized_401() {
    let app = test_app().await;

    let (status, _) = post_json(
        &app,
        &discharge_uri("023001B"),
        create_header_account(&[COLIN_ROLE]),
        &discharge_request(),
    )
    .await;

    assert_eq!(status, 401);
}

#[tokio::test]
async fn test_discharge_missing_token_401() {
    let app = test_app().await;

    let (status, body) = post_json(
        &app,
        &discharge_uri("TEST0001"),
        axum::http::HeaderMap::new(),
        &discharge_request(),
    )
    .await;

    assert_eq!(status, 401);
    assert_eq!(body["error"]["code"], "AUTH_1004");
}

#[tokio::test]
async fn test_discharge_twice_400() {
    let app = test_app().await;
    let mut request = discharge_request();
    request["baseDebtor"]["businessName"] = json!("test bus 2  debtor");
    request["baseRegistrationNumber"] = json!("TEST0001");

    let (first, _) = post_json(
        &app,
        &discharge_uri("TEST0001"),
        create_header_account(&[PPR_ROLE]),
        &request,
    )
    .await;
    let (second, _) = post_json(
        &app,
        &discharge_uri("TEST0001"),
        create_header_account(&[PPR_ROLE]),
        &request,
    )
    .await;

    assert_eq!(first, 200);
    assert_eq!(second, 400);
}

#[tokio::test]
async fn test_discharge_path_mismatch_400() {
    let app = test_app().await;
    let mut request = discharge_request();
    request["baseDebtor"]["businessName"] = json!("TEST BUS 2 DEBTOR");
    request["baseRegistrationNumber"] = json!("TEST0002");

    let (status, body) = post_json(
        &app,
        &discharge_uri("TEST0001"),
        create_header_account(&[PPR_ROLE]),
        &request,
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VAL_3009");
}

#[tokio::test]
async fn test_discharge_retrievable_after_submission() {
    let app = test_app().await;
    let mut request = discharge_request();
    request["baseDebtor"]["businessName"] = json!("TEST BUS 2 DEBTOR");
    request["baseRegistrationNumber"] = json!("TEST0001");

    let (_, discharge) = post_json(
        &app,
        &discharge_uri("TEST0001"),
        create_header_account(&[PPR_ROLE]),
        &request,
    )
    .await;
    let number = discharge["dischargeRegistrationNumber"].as_str().unwrap();

    let (status, body) = get(
        &app,
        &format!("{}/{}", discharge_uri("TEST0001"), number),
        create_header_account(&[PPR_ROLE]),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, discharge);
}

#[tokio::test]
async fn test_discharge_other_account_401() {
    let app = test_app().await;
    let mut request = discharge_request();
    request["baseDebtor"]["businessName"] = json!("TEST BUS 2 DEBTOR");
    request["baseRegistrationNumber"] = json!("TEST0001");
    let mut headers = create_header(&[PPR_ROLE]);
    headers.insert("account-id", "PS99999".parse().unwrap());

    let (status, body) = post_json(&app, &discharge_uri("TEST0001"), headers, &request).await;

    assert_eq!(status, 401);
    assert_eq!(body["error"]["code"], "AUTHZ_2003");

    let (status, body) = get(
        &app,
        "/api/v1/financing-statements/TEST0001",
        create_header_account(&[PPR_ROLE]),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["statusType"], "ACT");
}

#[tokio::test]
async fn test_discharge_account_id_too_long_400() {
    let app = test_app().await;
    let mut request = discharge_request();
    request["baseDebtor"]["businessName"] = json!("TEST BUS 2 DEBTOR");
    request["baseRegistrationNumber"] = json!("TEST0001");
    let mut headers = create_header(&[PPR_ROLE]);
    headers.insert("account-id", "P".repeat(21).parse().unwrap());

    let (status, body) = post_json(&app, &discharge_uri("TEST0001"), headers, &request).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VAL_3001");
}
