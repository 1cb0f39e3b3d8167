use super::*;

fn test_client(base_url: &str) -> PantryClient {
    PantryClient::new(base_url, 30, "pantrymap-test/0.1").expect("client construction should not fail")
}

#[test]
fn endpoint_appends_to_root() {
    let client = test_client("https://pantries.example");
    let url = client.endpoint(PANTRY_DATA_PATH).unwrap();
    assert_eq!(url.as_str(), "https://pantries.example/get_pantry_data");
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let client = test_client("https://pantries.example/app/");
    let url = client.endpoint(DELETE_LOCATION_PATH).unwrap();
    assert_eq!(url.as_str(), "https://pantries.example/app/delete-location");
}

#[test]
fn details_url_uses_location_id() {
    let client = test_client("http://localhost:5000");
    let url = client.details_url(17).unwrap();
    assert_eq!(url.as_str(), "http://localhost:5000/location/17");
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = PantryClient::new("not a url", 30, "pantrymap-test/0.1");
    assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
}

#[test]
fn delete_body_uses_camel_case() {
    let body = serde_json::to_value(DeleteLocationBody { location_id: 9 }).unwrap();
    assert_eq!(body, serde_json::json!({ "locationId": 9 }));
}
