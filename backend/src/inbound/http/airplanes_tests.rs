//! Tests for airplane and fuel calculation HTTP handlers.

use super::*;
use crate::domain::ports::{MockFleetCommand, MockFleetQuery, MockFuelCalculationCommand};
use crate::domain::{ErrorCode, LogBase, TimeUnit};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::state::HttpStatePorts;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

fn id(value: u32) -> AirplaneId {
    AirplaneId::new(value).expect("valid id")
}

fn airplane(value: u32, max_passengers: u32) -> Airplane {
    Airplane::new(id(value), format!("Plane {value}"), max_passengers).expect("valid airplane")
}

fn default_result() -> CalculationResult {
    CalculationResult {
        fuel_capacity: 200.0,
        fuel_consumption_per_minute: 0.1,
        flight_duration: 2000.0,
        time_unit: TimeUnit::Minute,
    }
}

fn test_app(
    ports: HttpStatePorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(ports)))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .service(list_airplanes)
                .service(create_airplane)
                .service(get_airplane)
                .service(replace_airplane)
                .service(update_airplane)
                .service(delete_airplane)
                .service(calculate_fuel),
        )
}

fn with_calculation(command: MockFuelCalculationCommand) -> HttpStatePorts {
    let mut query = MockFleetQuery::new();
    query
        .expect_get_airplane()
        .returning(|airplane_id| Ok(airplane(airplane_id.get(), 500)));
    HttpStatePorts {
        fuel_calculation: Arc::new(command),
        fleet_query: Arc::new(query),
        ..HttpStatePorts::default()
    }
}

fn with_fleet(command: MockFleetCommand) -> HttpStatePorts {
    HttpStatePorts {
        fleet: Arc::new(command),
        ..HttpStatePorts::default()
    }
}

#[rstest]
#[case(json!({"max_passengers": 10}), "missing required field: airplane_id")]
#[case(json!({"airplane_id": 0, "max_passengers": 10}), "airplane_id must be a positive integer")]
#[case(json!({"airplane_id": 1}), "missing required field: max_passengers")]
#[case(json!({"airplane_id": 1, "max_passengers": 0}), "max_passengers must be a positive integer")]
#[case(
    json!({"airplane_id": 1, "max_passengers": 5, "name": "x".repeat(101)}),
    "name must be at most 100 characters"
)]
fn parse_new_airplane_rejects_invalid_payloads(#[case] payload: Value, #[case] message: &str) {
    let request: AirplaneRequest = serde_json::from_value(payload).expect("payload shape");
    let err = parse_new_airplane(request).expect_err("invalid payload");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), message);
}

#[rstest]
fn parse_new_airplane_defaults_name_to_empty() {
    let request = AirplaneRequest {
        airplane_id: Some(4),
        name: None,
        max_passengers: Some(20),
    };
    let parsed = parse_new_airplane(request).expect("valid payload");
    assert_eq!(parsed.name(), "");
}

#[rstest]
fn replacement_requires_capacity() {
    let err = parse_replacement(id(1), AirplaneRequest::default()).expect_err("missing capacity");
    assert_eq!(err.message(), "missing required field: max_passengers");
}

#[rstest]
fn partial_update_keeps_absent_fields() {
    let update = parse_partial_update(
        id(1),
        AirplaneRequest {
            airplane_id: Some(1),
            name: Some("Renamed".into()),
            max_passengers: None,
        },
    )
    .expect("valid update");
    assert_eq!(update.name.as_deref(), Some("Renamed"));
    assert_eq!(update.max_passengers, None);
}

#[rstest]
fn calculation_rejects_unknown_override_fields() {
    let body = FuelCalculationBody {
        passengers: Some(10),
        config_override: Some(json!({"fuel_capacity_multiplier": 1.0, "wings": 2})),
    };
    let err = parse_calculation(id(1), body).expect_err("unknown field");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Unknown configuration field: wings");
}

#[actix_web::test]
async fn calculate_fuel_returns_result_body() {
    let mut command = MockFuelCalculationCommand::new();
    command
        .expect_calculate()
        .withf(|request| {
            request.airplane_id.get() == 1
                && request.passengers == 50
                && request.config_override.is_none()
        })
        .times(1)
        .return_once(|_| Ok(default_result()));
    let app = actix_test::init_service(test_app(with_calculation(command))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/airplanes/1/calculate_fuel")
        .set_json(json!({"passengers": 50}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({
            "fuel_capacity": 200.0,
            "fuel_consumption_per_minute": 0.1,
            "flight_duration": 2000.0,
            "time_unit": "minute",
        })
    );
}

#[actix_web::test]
async fn calculate_fuel_forwards_parsed_override() {
    let mut command = MockFuelCalculationCommand::new();
    command
        .expect_calculate()
        .withf(|request| {
            request.config_override
                == Some(
                    ConfigOverride::default()
                        .with_log_base(LogBase::Natural)
                        .with_time_unit(TimeUnit::Hour),
                )
        })
        .times(1)
        .return_once(|_| Ok(default_result()));
    let app = actix_test::init_service(test_app(with_calculation(command))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/airplanes/3/calculate_fuel")
        .set_json(json!({
            "passengers": 5,
            "config_override": {"log_base": "e", "time_unit": "hour"}
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[case(json!({}), "missing required field: passengers")]
#[case(json!({"passengers": -1}), "passengers must be a non-negative integer")]
#[case(json!({"passengers": 1, "config_override": {"log_base": "2"}}), "Invalid log base")]
#[case(
    json!({"passengers": 1, "config_override": "hour"}),
    "Configuration override must be a JSON object"
)]
#[actix_web::test]
async fn calculate_fuel_rejects_bad_input_before_calculating(
    #[case] payload: Value,
    #[case] message: &str,
) {
    let mut command = MockFuelCalculationCommand::new();
    command.expect_calculate().never();
    let app = actix_test::init_service(test_app(with_calculation(command))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/airplanes/1/calculate_fuel")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["error"], message);
}

#[actix_web::test]
async fn calculate_fuel_reports_unknown_airplane_before_body_errors() {
    let mut command = MockFuelCalculationCommand::new();
    command.expect_calculate().never();
    let app = actix_test::init_service(test_app(HttpStatePorts {
        fuel_calculation: Arc::new(command),
        ..HttpStatePorts::default()
    }))
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/airplanes/99/calculate_fuel")
        .set_json(json!({"passengers": 1, "config_override": {"log_base": "2"}}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn calculate_fuel_maps_domain_errors() {
    let mut command = MockFuelCalculationCommand::new();
    command.expect_calculate().return_once(|_| {
        Err(crate::domain::CalculationError::ExceedsCapacity { max_passengers: 150 }.into())
    });
    let app = actix_test::init_service(test_app(with_calculation(command))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/airplanes/1/calculate_fuel")
        .set_json(json!({"passengers": 151}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"], "Exceeds max passengers (150)");
}

#[actix_web::test]
async fn malformed_json_is_invalid_request() {
    let app = actix_test::init_service(test_app(HttpStatePorts::default())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/airplanes/1/calculate_fuel")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_json");
}

#[actix_web::test]
async fn create_airplane_returns_created() {
    let mut fleet = MockFleetCommand::new();
    fleet
        .expect_create_airplane()
        .times(1)
        .returning(Ok);
    let app = actix_test::init_service(test_app(with_fleet(fleet))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/airplanes")
        .set_json(json!({"airplane_id": 7, "name": "Heron", "max_passengers": 120}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({"airplane_id": 7, "name": "Heron", "max_passengers": 120})
    );
}

#[actix_web::test]
async fn duplicate_airplane_is_conflict() {
    let mut fleet = MockFleetCommand::new();
    fleet
        .expect_create_airplane()
        .return_once(|_| Err(Error::conflict("Airplane 7 already exists")));
    let app = actix_test::init_service(test_app(with_fleet(fleet))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/airplanes")
        .set_json(json!({"airplane_id": 7, "max_passengers": 120}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn list_airplanes_renders_each_entry() {
    let mut query = MockFleetQuery::new();
    query
        .expect_list_airplanes()
        .return_once(|| Ok(vec![airplane(1, 10), airplane(2, 20)]));
    let app = actix_test::init_service(test_app(HttpStatePorts {
        fleet_query: Arc::new(query),
        ..HttpStatePorts::default()
    }))
    .await;

    let request = actix_test::TestRequest::get().uri("/api/airplanes").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[1]["max_passengers"], 20);
}

#[rstest]
#[case("/api/airplanes/0")]
#[case("/api/airplanes/99")]
#[actix_web::test]
async fn unknown_airplanes_are_not_found(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(HttpStatePorts::default())).await;

    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn replace_airplane_rejects_id_change() {
    let mut fleet = MockFleetCommand::new();
    fleet.expect_update_airplane().never();
    let app = actix_test::init_service(test_app(with_fleet(fleet))).await;

    let request = actix_test::TestRequest::put()
        .uri("/api/airplanes/1")
        .set_json(json!({"airplane_id": 2, "max_passengers": 10}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"], "airplane_id cannot be changed");
}

#[actix_web::test]
async fn patch_airplane_forwards_partial_update() {
    let mut fleet = MockFleetCommand::new();
    fleet
        .expect_update_airplane()
        .withf(|airplane_id, update| {
            airplane_id.get() == 4
                && update.name.is_none()
                && update.max_passengers == Some(300)
        })
        .times(1)
        .return_once(|_, _| Ok(airplane(4, 300)));
    let app = actix_test::init_service(test_app(with_fleet(fleet))).await;

    let request = actix_test::TestRequest::patch()
        .uri("/api/airplanes/4")
        .set_json(json!({"max_passengers": 300}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn delete_airplane_returns_no_content() {
    let mut fleet = MockFleetCommand::new();
    fleet
        .expect_delete_airplane()
        .times(1)
        .return_once(|_| Ok(()));
    let app = actix_test::init_service(test_app(with_fleet(fleet))).await;

    let request = actix_test::TestRequest::delete()
        .uri("/api/airplanes/4")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
