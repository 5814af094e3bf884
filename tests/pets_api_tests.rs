//! End-to-end tests for the pet endpoints over a real socket.

mod common;

use common::http::{get, parse_response, post, post_json};
use common::test_server::PetServer;
use serde_json::json;

#[test]
fn test_list_returns_seed_pets_in_order() {
    let server = PetServer::new();
    let (status, body) = parse_response(&get(&server.addr(), "/pets"));
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!([
            {"id": 1, "name": "Fluffy", "type": "Cat"},
            {"id": 2, "name": "Rex", "type": "Dog"}
        ])
    );
}

#[test]
fn test_list_is_idempotent() {
    let server = PetServer::new();
    let first = parse_response(&get(&server.addr(), "/pets"));
    let second = parse_response(&get(&server.addr(), "/pets"));
    assert_eq!(first, second);
}

#[test]
fn test_list_ignores_query_string() {
    let server = PetServer::new();
    let (status, body) = parse_response(&get(&server.addr(), "/pets?limit=1"));
    assert_eq!(status, 200);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_get_existing_pet() {
    let server = PetServer::new();
    let (status, body) = parse_response(&get(&server.addr(), "/pets/1"));
    assert_eq!(status, 200);
    assert_eq!(body, json!({"id": 1, "name": "Fluffy", "type": "Cat"}));
}

#[test]
fn test_get_missing_pet_is_404() {
    let server = PetServer::new();
    let (status, body) = parse_response(&get(&server.addr(), "/pets/999"));
    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "Pet not found"}));
}

#[test]
fn test_get_uses_leading_digits_of_id() {
    let server = PetServer::new();
    let (status, body) = parse_response(&get(&server.addr(), "/pets/2abc"));
    assert_eq!(status, 200);
    assert_eq!(body, json!({"id": 2, "name": "Rex", "type": "Dog"}));

    let (status, body) = parse_response(&get(&server.addr(), "/pets/0x1"));
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Fluffy");
}

#[test]
fn test_get_non_numeric_or_negative_id_is_404() {
    let server = PetServer::new();
    for path in ["/pets/abc", "/pets/-1", "/pets/99999999999999999999999"] {
        let (status, body) = parse_response(&get(&server.addr(), path));
        assert_eq!(status, 404, "{path}");
        assert_eq!(body, json!({"error": "Pet not found"}), "{path}");
    }
}

#[test]
fn test_create_pet_assigns_next_id() {
    let server = PetServer::new();
    let (status, body) = parse_response(&post_json(
        &server.addr(),
        "/pets",
        r#"{"name":"Buddy","type":"Dog"}"#,
    ));
    assert_eq!(status, 201);
    assert_eq!(body, json!({"id": 3, "name": "Buddy", "type": "Dog"}));

    let (_, list) = parse_response(&get(&server.addr(), "/pets"));
    assert_eq!(list[2], json!({"id": 3, "name": "Buddy", "type": "Dog"}));

    let (status, fetched) = parse_response(&get(&server.addr(), "/pets/3"));
    assert_eq!(status, 200);
    assert_eq!(fetched["name"], "Buddy");
}

#[test]
fn test_creates_append_in_order() {
    let server = PetServer::new();
    let names = ["Tweety", "Nemo", "Spike"];
    for name in names {
        let (status, _) = parse_response(&post_json(
            &server.addr(),
            "/pets",
            &format!(r#"{{"name":"{name}","type":"Other"}}"#),
        ));
        assert_eq!(status, 201);
    }

    let (_, list) = parse_response(&get(&server.addr(), "/pets"));
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 5);
    assert_eq!(list[0]["name"], "Fluffy");
    assert_eq!(list[1]["name"], "Rex");
    for (offset, name) in names.iter().enumerate() {
        assert_eq!(list[offset + 2]["name"], *name);
        assert_eq!(list[offset + 2]["id"], offset as u64 + 3);
    }
}

#[test]
fn test_create_with_extra_fields_keeps_only_model_fields() {
    let server = PetServer::new();
    let (status, body) = parse_response(&post_json(
        &server.addr(),
        "/pets",
        r#"{"name":"Buddy","type":"Dog","id":77,"age":3}"#,
    ));
    assert_eq!(status, 201);
    assert_eq!(body, json!({"id": 3, "name": "Buddy", "type": "Dog"}));
}

#[test]
fn test_create_rejects_empty_name_without_side_effect() {
    let server = PetServer::new();
    let (status, body) = parse_response(&post_json(
        &server.addr(),
        "/pets",
        r#"{"name":"","type":"Dog"}"#,
    ));
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "Name and type required"}));
    assert_eq!(server.registry().len(), 2);

    let (_, list) = parse_response(&get(&server.addr(), "/pets"));
    assert_eq!(list.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_create_rejects_missing_fields() {
    let server = PetServer::new();
    for body in [r#"{"type":"Dog"}"#, r#"{"name":"Buddy"}"#, "{}", "[]"] {
        let (status, resp) = parse_response(&post_json(&server.addr(), "/pets", body));
        assert_eq!(status, 400, "{body}");
        assert_eq!(resp, json!({"error": "Name and type required"}), "{body}");
    }
    assert_eq!(server.registry().len(), 2);
}

#[test]
fn test_create_echoes_truthy_non_string_fields() {
    let server = PetServer::new();
    let (status, body) = parse_response(&post_json(
        &server.addr(),
        "/pets",
        r#"{"name":5,"type":true}"#,
    ));
    assert_eq!(status, 201);
    assert_eq!(body, json!({"id": 3, "name": 5, "type": true}));

    let (status, fetched) = parse_response(&get(&server.addr(), "/pets/3"));
    assert_eq!(status, 200);
    assert_eq!(fetched, json!({"id": 3, "name": 5, "type": true}));
}

#[test]
fn test_create_without_json_content_type_has_no_fields() {
    let server = PetServer::new();
    let (status, body) = parse_response(&post(
        &server.addr(),
        "/pets",
        "text/plain",
        r#"{"name":"Buddy","type":"Dog"}"#,
    ));
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "Name and type required"}));
}

#[test]
fn test_create_with_malformed_json_is_400() {
    let server = PetServer::new();
    let (status, body) = parse_response(&post_json(&server.addr(), "/pets", r#"{"name":"Bud"#));
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "Malformed JSON body"}));
    assert_eq!(server.registry().len(), 2);
}

#[test]
fn test_unknown_routes_are_404() {
    let server = PetServer::new();
    let cases = [
        "GET /owners HTTP/1.1\r\nHost: localhost\r\n\r\n",
        "DELETE /pets/1 HTTP/1.1\r\nHost: localhost\r\n\r\n",
        "GET /pets/1/toys HTTP/1.1\r\nHost: localhost\r\n\r\n",
    ];
    for req in cases {
        let (status, body) = parse_response(&common::http::send_request(&server.addr(), req));
        assert_eq!(status, 404, "{req}");
        assert_eq!(body, json!({"error": "Not Found"}), "{req}");
    }
}

#[test]
fn test_responses_are_json() {
    let server = PetServer::new();
    let (status, content_type, _) =
        common::http::parse_response_parts(&get(&server.addr(), "/pets/999"));
    assert_eq!(status, 404);
    assert_eq!(content_type, "application/json");
}

#[test]
fn test_head_answers_get_routes_without_body() {
    let server = PetServer::new();
    for path in ["/pets", "/pets/1"] {
        let req = format!("HEAD {path} HTTP/1.1\r\nHost: localhost\r\n\r\n");
        let (status, content_type, body) =
            common::http::parse_response_parts(&common::http::send_request(&server.addr(), &req));
        assert_eq!(status, 200, "{path}");
        assert_eq!(content_type, "application/json", "{path}");
        assert!(body.is_empty(), "{path}: {body}");
    }

    let req = "HEAD /owners HTTP/1.1\r\nHost: localhost\r\n\r\n";
    let (status, _, body) =
        common::http::parse_response_parts(&common::http::send_request(&server.addr(), req));
    assert_eq!(status, 404);
    assert!(body.is_empty());
}
