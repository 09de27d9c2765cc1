//! End-to-end dispatch and push ingestion through the REST API.
//!
//! A transaction is dispatched over HTTP, captured by a stub Pub/Sub API,
//! wrapped in a push envelope and fed back through the poll endpoint.

#[path = "relay_support/stub_api.rs"]
mod stub_api;

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockable::DefaultClock;
use relay::Trace;
use relay::domain::{Direction, DispatchBackend, DispatchService, TopicPublisher, Transaction};
use relay::inbound::http::state::HttpState;
use relay::inbound::http::transactions;
use relay::outbound::catalogue::FixtureTransactionCatalogue;
use relay::outbound::pubsub::PubSubHttpBroker;
use serde_json::{Value, json};
use stub_api::{StubApi, unreachable_endpoint};

fn http_state(endpoint: url::Url) -> HttpState {
    let broker = PubSubHttpBroker::new(endpoint, "acme", None).expect("client");
    let publisher = TopicPublisher::new(
        Arc::new(broker),
        "projects/acme/topics/transactions",
        Arc::new(DefaultClock),
    );
    HttpState::new(
        Arc::new(DispatchService::new(DispatchBackend::Topic(publisher))),
        Arc::new(FixtureTransactionCatalogue::default()),
        0,
    )
}

async fn init_app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(transactions::configure)),
    )
    .await
}

fn transaction() -> Transaction {
    Transaction {
        id: 11,
        direction: Some(Direction::Inbound),
        amount: 4_500,
        account_name: "Ada Obi".to_owned(),
        account_number: Some("0123456789".to_owned()),
        currency_code: "NGN".to_owned(),
        status: Some("pending".to_owned()),
        reference: "0123456789".to_owned(),
        bank_name: "First Bank".to_owned(),
        bank_code: "011".to_owned(),
        narration: "refund".to_owned(),
    }
}

#[actix_web::test]
async fn dispatched_transaction_round_trips_through_push() {
    let stub = StubApi::start(StatusCode::OK, json!({"messageIds": ["m-11"]})).await;
    let app = init_app(http_state(stub.base.clone())).await;

    let dispatch = test::TestRequest::post()
        .uri("/api/v1/transactions/dispatch")
        .set_json(json!({"transaction": transaction(), "delaySeconds": 30}))
        .to_request();
    let res = test::call_service(&app, dispatch).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"message": "Transaction published", "id": "m-11"}));

    let published = stub.requests()[0].body["messages"][0].clone();
    let deliver_at = published["attributes"]["deliver_at"].clone();
    assert!(deliver_at.is_string(), "delayed publish carries deliver_at");
    let envelope = json!({
        "message": {
            "data": published["data"],
            "attributes": published["attributes"],
            "messageId": "m-11"
        },
        "subscription": "projects/acme/subscriptions/relay-push"
    });
    let poll = test::TestRequest::post()
        .uri("/api/v1/transactions/poll")
        .set_json(envelope)
        .to_request();
    let res = test::call_service(&app, poll).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["source"], json!("envelope"));
    assert_eq!(body["deliverAt"], deliver_at);
    let decoded: Transaction =
        serde_json::from_value(body["transaction"].clone()).expect("transaction");
    assert_eq!(decoded, transaction());
    stub.stop().await;
}

#[actix_web::test]
async fn empty_push_envelope_is_refused_for_redelivery() {
    let app = init_app(http_state(unreachable_endpoint())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/transactions/poll")
            .set_json(json!({"message": {"data": ""}}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().contains_key("trace-id"));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("invalid_request"));
}

#[actix_web::test]
async fn unreachable_broker_surfaces_as_internal_error() {
    let app = init_app(http_state(unreachable_endpoint())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/publish?delay=0")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("internal_error"));
    assert_eq!(body["message"], json!("failed to publish transaction"));
}
