use crate::common::test_context::TestContext;
use serde_json::{json, Value};
use starkbank_rust::{error::ApiError, query::Query, signature::Signature, Error};
use std::str::FromStr;
use test_case::test_case;
use wiremock::{
    http::HeaderName,
    matchers::{body_json, header, method, path, query_param},
    Mock, ResponseTemplate,
};

fn header_value(req: &wiremock::Request, name: &str) -> String {
    req.headers
        .get(&HeaderName::from_str(name).unwrap())
        .map(|v| v.last().to_string())
        .unwrap_or_default()
}

#[tokio::test]
async fn raw_get_passes_status_and_body_through() {
    let ctx = TestContext::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/balance"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "balances": [{ "id": "1", "amount": 1000, "currency": "BRL" }],
            "cursor": null
        })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let res = ctx
        .client
        .requests
        .get("balance", &Query::new().limit(1))
        .await
        .unwrap();

    assert_eq!(res.status, 200);
    let body: Value = res.json().unwrap();
    assert_eq!(body["balances"][0]["amount"], 1000);
}

#[tokio::test]
async fn raw_writes_send_the_body_verbatim() {
    let ctx = TestContext::start().await;
    let body = json!({ "transfers": [{ "amount": 100, "name": "Tony Stark" }] });

    for verb in ["POST", "PUT", "PATCH"] {
        Mock::given(method(verb))
            .and(path("/v2/transfer"))
            .and(body_json(body.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_string(verb))
            .expect(1)
            .mount(&ctx.mock_server)
            .await;
    }
    Mock::given(method("DELETE"))
        .and(path("/v2/transfer/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("DELETE"))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let requests = &ctx.client.requests;
    let query = Query::new();
    assert_eq!(requests.post("transfer", &body, &query).await.unwrap().text(), "POST");
    assert_eq!(requests.put("transfer", &body, &query).await.unwrap().text(), "PUT");
    assert_eq!(requests.patch("transfer", &body, &query).await.unwrap().text(), "PATCH");
    assert_eq!(requests.delete("transfer/1", &query).await.unwrap().text(), "DELETE");
}

#[test_case(500 ; "internal server error")]
#[test_case(502 ; "bad gateway")]
#[tokio::test]
async fn server_faults_are_internal_server_errors(status: u16) {
    let ctx = TestContext::start().await;

    Mock::given(path("/v2/balance"))
        .respond_with(ResponseTemplate::new(status).set_body_string("upstream failure"))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let err = ctx
        .client
        .requests
        .get("balance", &Query::new())
        .await
        .unwrap_err();

    match err {
        Error::ApiError(ApiError::InternalServerError { status: s, content }) => {
            assert_eq!(s, status);
            assert_eq!(content, "upstream failure");
        }
        e => panic!("Unexpected error: {:?}", e),
    }
}

#[tokio::test]
async fn unparseable_errors_are_unknown_errors_with_the_raw_body() {
    let ctx = TestContext::start().await;

    Mock::given(path("/v2/balance"))
        .respond_with(ResponseTemplate::new(418).set_body_string("<html>teapot</html>"))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let err = ctx
        .client
        .requests
        .get("balance", &Query::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::ApiError(ApiError::UnknownError { status: 418, ref content }) if content == "<html>teapot</html>"
    ));
}

#[tokio::test]
async fn every_request_is_signed_by_the_project() {
    let ctx = TestContext::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/transfer"))
        .and(header("Accept-Language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let body = json!({ "transfers": [] });
    ctx.client
        .requests
        .post("transfer", &body, &Query::new())
        .await
        .unwrap();

    let requests = ctx.mock_server.received_requests().await.unwrap();
    let request = &requests[0];

    let access_id = header_value(request, "Access-Id");
    assert_eq!(access_id, format!("project/{}", ctx.project_id));

    let message = format!(
        "{}:{}:{}",
        access_id,
        header_value(request, "Access-Time"),
        String::from_utf8(request.body.clone()).unwrap()
    );
    let signature = Signature::from_base64(&header_value(request, "Access-Signature")).unwrap();
    assert!(ctx.project_public_key.verify(message.as_bytes(), &signature));
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
struct Webhook {
    #[serde(default)]
    id: Option<String>,
    url: String,
    subscriptions: Vec<String>,
}

impl starkbank_rust::resource::Resource for Webhook {
    const NAME: &'static str = "Webhook";
}

#[tokio::test]
async fn single_creation_sends_the_bare_entity() {
    let ctx = TestContext::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/webhook"))
        .and(body_json(json!({
            "url": "https://webhook.site/stark",
            "subscriptions": ["invoice", "transfer"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "webhook": {
                "id": "6252",
                "url": "https://webhook.site/stark",
                "subscriptions": ["invoice", "transfer"]
            }
        })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let webhook: Webhook = ctx
        .client
        .rest
        .post_single(&Webhook {
            id: None,
            url: "https://webhook.site/stark".to_string(),
            subscriptions: vec!["invoice".to_string(), "transfer".to_string()],
        })
        .await
        .unwrap();

    assert_eq!(webhook.id.as_deref(), Some("6252"));
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
struct Boleto {
    amount: i64,
}

impl starkbank_rust::resource::Resource for Boleto {
    const NAME: &'static str = "Boleto";

    fn encode(&self) -> Result<Value, Error> {
        Ok(json!({ "amount": self.amount, "encodedBy": "codec" }))
    }
}

#[tokio::test]
async fn creation_goes_through_the_resource_codec() {
    let ctx = TestContext::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/boleto"))
        .and(body_json(json!({
            "boletos": [{ "amount": 1, "encodedBy": "codec" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "boletos": [{ "amount": 1 }]
        })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let created: Vec<Boleto> = ctx.client.rest.post(&[Boleto { amount: 1 }]).await.unwrap();

    assert_eq!(created, vec![Boleto { amount: 1 }]);
}

#[tokio::test]
async fn raw_maps_are_created_without_their_null_fields() {
    let ctx = TestContext::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/boleto"))
        .and(body_json(json!({
            "boletos": [{ "amount": 2, "descriptions": [{ "key": "a", "value": null }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "boletos": [{ "amount": 2 }]
        })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let created: Vec<Boleto> = ctx
        .client
        .rest
        .post(&[json!({
            "amount": 2,
            "due": null,
            "descriptions": [{ "key": "a", "value": null }]
        })])
        .await
        .unwrap();

    assert_eq!(created[0].amount, 2);
}
