#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, HeaderValue, Request, Response, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use ppr_api::{
    Config,
    auth::{Claims, jwt::JwtService, middleware::ACCOUNT_ID_HEADER},
    router::build_router,
    startup::initialize_app,
};

#[allow(unused_imports)]
pub use ppr_api::auth::roles::{BASIC_ROLE, COLIN_ROLE, PPR_ROLE, STAFF_ROLE};

pub const TEST_ACCOUNT_ID: &str = "PS12345";

/// Router over a freshly seeded in-memory registry.
pub async fn test_app() -> Router {
    let state = initialize_app(&Config::for_tests())
        .await
        .expect("test app state");
    build_router(state)
}

fn bearer(roles: &[&str]) -> HeaderValue {
    let config = Config::for_tests();
    let jwt = JwtService::new(&config).expect("jwt service");
    let claims = Claims::new(
        Uuid::new_v4(),
        "test-user".to_string(),
        roles.iter().map(|r| r.to_string()).collect(),
        jwt.issuer(),
        jwt.expiration_secs(),
    );
    let token = jwt.encode_token(&claims).expect("token");
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("header value")
}

/// Bearer token header only.
pub fn create_header(roles: &[&str]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, bearer(roles));
    headers
}

/// Bearer token header plus `Account-Id`.
pub fn create_header_account(roles: &[&str]) -> HeaderMap {
    let mut headers = create_header(roles);
    headers.insert(ACCOUNT_ID_HEADER, HeaderValue::from_static(TEST_ACCOUNT_ID));
    headers
}

pub async fn send(app: &Router, request: Request<Body>) -> (u16, Value) {
    let response: Response<Body> = app.clone().oneshot(request).await.expect("response");
    let status = response.status().as_u16();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn post_json(app: &Router, uri: &str, headers: HeaderMap, body: &Value) -> (u16, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    for (name, value) in headers.iter() {
        builder = builder.header(name, value);
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(body).expect("json")))
        .expect("request");
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str, headers: HeaderMap) -> (u16, Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers.iter() {
        builder = builder.header(name, value);
    }
    send(app, builder.body(Body::empty()).expect("request")).await
}

fn address() -> Value {
    json!({
        "street": "222 SUMMER STREET",
        "city": "VICTORIA",
        "region": "BC",
        "postalCode": "V8W 2V8",
        "country": "CA"
    })
}

/// Sample discharge as a client would echo it back, including the fields
/// the registry assigns.
pub fn discharge_statement() -> Value {
    json!({
        "baseRegistrationNumber": "023001B",
        "baseDebtor": { "businessName": "DEBTOR 1 INC." },
        "registeringParty": {
            "businessName": "ABC SEARCHING COMPANY",
            "address": address(),
            "emailAddress": "bsmith@abc-search.com"
        },
        "clientReferenceId": "A-00000402",
        "createDateTime": "2020-05-14T21:16:32+00:00",
        "dischargeRegistrationNumber": "023005B",
        "payment": { "invoiceId": "2199700", "receipt": "/pay/api/v1/payment-requests/2199700/receipts" }
    })
}

/// Sample discharge request with the registry-assigned fields removed.
pub fn discharge_request() -> Value {
    let mut json = discharge_statement();
    strip(&mut json, &["createDateTime", "dischargeRegistrationNumber", "payment"]);
    json
}

/// Sample security agreement ready for submission.
pub fn financing_statement() -> Value {
    json!({
        "type": "SA",
        "clientReferenceId": "A-00000402",
        "registeringParty": {
            "businessName": "ABC SEARCHING COMPANY",
            "address": address(),
            "emailAddress": "bsmith@abc-search.com"
        },
        "securedParties": [{
            "businessName": "BANK OF BRITISH COLUMBIA",
            "address": address(),
            "emailAddress": "asmith@bank-bc.ca"
        }],
        "debtors": [{
            "businessName": "DEBTOR 1 INC.",
            "address": address(),
            "emailAddress": "dsmith@debtor1.com"
        }],
        "vehicleCollateral": [{
            "type": "MV",
            "serialNumber": "KM8J3CA46JU622994",
            "year": 2018,
            "make": "HYUNDAI",
            "model": "TUSCON"
        }],
        "generalCollateral": [{ "description": "ALL PRESENT AND AFTER ACQUIRED PERSONAL PROPERTY" }],
        "lifeYears": 5,
        "trustIndenture": false
    })
}

pub fn strip(json: &mut Value, fields: &[&str]) {
    if let Some(object) = json.as_object_mut() {
        for field in fields {
            object.remove(*field);
        }
    }
}

pub fn discharge_uri(registration_num: &str) -> String {
    format!("/api/v1/financing-statements/{}/discharges", registration_num)
}
