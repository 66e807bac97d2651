use crate::common::test_context::TestContext;
use futures::TryStreamExt;
use serde_json::json;
use starkbank_rust::{
    apis::invoice::{InvoiceBuilder, InvoiceUpdateBuilder},
    error::{ApiError, ErrorElement},
    query::Query,
    Error,
};
use wiremock::{
    matchers::{body_json, method, path, query_param},
    Mock, ResponseTemplate,
};

fn invoice_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "amount": 400000,
        "nominalAmount": 400000,
        "taxId": "012.345.678-90",
        "name": "Iron Bank S.A.",
        "tags": ["war supply"],
        "status": status,
        "fee": 0,
        "created": "2023-02-01T12:00:00.000000+00:00",
        "updated": "2023-02-01T12:00:00.000000+00:00"
    })
}

#[tokio::test]
async fn create_wraps_and_unwraps_the_plural_envelope() {
    let ctx = TestContext::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/invoice"))
        .and(body_json(json!({
            "invoices": [
                {
                    "amount": 400000,
                    "taxId": "012.345.678-90",
                    "name": "Iron Bank S.A.",
                    "tags": ["war supply"]
                },
                {
                    "amount": 100,
                    "taxId": "012.345.678-90",
                    "name": "Iron Bank S.A.",
                    "expiration": 3600
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Invoice(s) successfully created",
            "invoices": [invoice_json("1", "created"), invoice_json("2", "created")]
        })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let invoices = vec![
        InvoiceBuilder::default()
            .amount(400000)
            .tax_id("012.345.678-90")
            .name("Iron Bank S.A.")
            .tags(vec!["war supply".to_string()])
            .build()
            .unwrap(),
        InvoiceBuilder::default()
            .amount(100)
            .tax_id("012.345.678-90")
            .name("Iron Bank S.A.")
            .expiration(3600)
            .build()
            .unwrap(),
    ];
    let created = ctx.client.invoices.create(&invoices).await.unwrap();

    assert_eq!(created.len(), 2);
    assert_eq!(created[0].id.as_deref(), Some("1"));
    assert_eq!(created[1].id.as_deref(), Some("2"));
    assert_eq!(created[0].status.as_deref(), Some("created"));
}

#[tokio::test]
async fn create_reports_every_input_error_in_order() {
    let ctx = TestContext::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/invoice"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [
                { "code": "invalidTaxId", "message": "Element 0: Invalid tax ID" },
                { "code": "invalidAmount", "message": "Element 0: Amount must be positive" }
            ]
        })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let invoice = InvoiceBuilder::default()
        .amount(-1)
        .tax_id("000")
        .name("Iron Bank S.A.")
        .build()
        .unwrap();
    let err = ctx.client.invoices.create(&[invoice]).await.unwrap_err();

    match err {
        Error::ApiError(ApiError::InputErrors { status, errors }) => {
            assert_eq!(status, 400);
            assert_eq!(
                errors,
                vec![
                    ErrorElement {
                        code: "invalidTaxId".to_string(),
                        message: "Element 0: Invalid tax ID".to_string(),
                    },
                    ErrorElement {
                        code: "invalidAmount".to_string(),
                        message: "Element 0: Amount must be positive".to_string(),
                    },
                ]
            );
        }
        e => panic!("Unexpected error: {:?}", e),
    }
}

#[tokio::test]
async fn get_unwraps_the_singular_envelope() {
    let ctx = TestContext::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/invoice/5155165527080960"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "invoice": invoice_json("5155165527080960", "paid")
        })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let invoice = ctx.client.invoices.get("5155165527080960").await.unwrap();

    assert_eq!(invoice.id.as_deref(), Some("5155165527080960"));
    assert_eq!(invoice.amount, 400000);
    assert_eq!(invoice.tags, vec!["war supply".to_string()]);
}

#[tokio::test]
async fn get_not_found_is_propagated() {
    let ctx = TestContext::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/invoice/non-existent"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{ "code": "invalidInvoiceId", "message": "Invoice not found" }]
        })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let err = ctx.client.invoices.get("non-existent").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn update_and_cancel_send_only_the_changed_fields() {
    let ctx = TestContext::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v2/invoice/1"))
        .and(body_json(json!({ "amount": 500 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "invoice": invoice_json("1", "created")
        })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v2/invoice/1"))
        .and(body_json(json!({ "status": "canceled" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "invoice": invoice_json("1", "canceled")
        })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let update = InvoiceUpdateBuilder::default().amount(500).build().unwrap();
    ctx.client.invoices.update("1", &update).await.unwrap();

    let canceled = ctx.client.invoices.cancel("1").await.unwrap();
    assert_eq!(canceled.status.as_deref(), Some("canceled"));
}

#[tokio::test]
async fn pdf_is_returned_as_raw_bytes() {
    let ctx = TestContext::start().await;

    let pdf = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n".to_vec();
    Mock::given(method("GET"))
        .and(path("/v2/invoice/1/pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(pdf.clone()))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    assert_eq!(ctx.client.invoices.pdf("1").await.unwrap(), pdf);
}

#[tokio::test]
async fn payment_is_read_from_its_sub_resource() {
    let ctx = TestContext::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/invoice/1/payment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payment": {
                "amount": 400000,
                "name": "Jon Snow",
                "taxId": "012.345.678-90",
                "bankCode": "20018183",
                "endToEndId": "E20018183202302011200abcdefghijk",
                "method": "pix"
            }
        })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let payment = ctx.client.invoices.payment("1").await.unwrap();
    assert_eq!(payment.amount, 400000);
    assert_eq!(payment.method.as_deref(), Some("pix"));
    assert_eq!(payment.account_number, None);
}

#[tokio::test]
async fn query_sends_filters_on_every_page() {
    let ctx = TestContext::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/invoice"))
        .and(query_param("status", "paid"))
        .and(query_param("tags", "war supply,iron"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "invoices": [invoice_json("1", "paid"), invoice_json("2", "paid")],
            "cursor": null
        })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let query = Query::new()
        .set("status", "paid")
        .tags(vec!["war supply".to_string(), "iron".to_string()]);
    let invoices: Vec<_> = ctx
        .client
        .invoices
        .query(&query)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(invoices.len(), 2);
}
