use super::*;

fn query_pairs(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

// =============================================================================
// query string
// =============================================================================

#[test]
fn query_string_contains_each_param_once() {
    let req = OutgoingRequest::get("/api/items").param("a", "1").param("b", "2");
    let query = req.query_string();
    let pairs = query_pairs(&query);

    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs.iter().filter(|(k, v)| k == "a" && v == "1").count(), 1);
    assert_eq!(pairs.iter().filter(|(k, v)| k == "b" && v == "2").count(), 1);
}

#[test]
fn query_string_url_encodes_values() {
    let req = OutgoingRequest::get("/search").param("q", "a b&c=d");
    assert_eq!(req.query_string(), "q=a+b%26c%3Dd");
    assert_eq!(query_pairs(&req.query_string()), vec![("q".to_owned(), "a b&c=d".to_owned())]);
}

#[test]
fn repeated_key_replaces_value() {
    let req = OutgoingRequest::get("/x").param("a", "1").param("a", "2");
    assert_eq!(req.params.len(), 1);
    assert_eq!(req.query_string(), "a=2");
}

#[test]
fn values_are_coerced_to_strings() {
    let req = OutgoingRequest::get("/x").param("n", 42).param("flag", true).param("f", 1.5);
    assert_eq!(req.params["n"], "42");
    assert_eq!(req.params["flag"], "true");
    assert_eq!(req.params["f"], "1.5");
}

#[test]
fn params_extend_from_iterator() {
    let req = OutgoingRequest::get("/x").params([("a", 1), ("b", 2)]);
    assert_eq!(req.params.len(), 2);
    assert_eq!(req.params["b"], "2");
}

// =============================================================================
// url
// =============================================================================

#[test]
fn get_url_concatenates_origin_and_path() {
    let req = OutgoingRequest::get("/api/logout");
    assert_eq!(req.url("https://api.example.test"), "https://api.example.test/api/logout");
}

#[test]
fn get_url_appends_query() {
    let req = OutgoingRequest::get("/api/items").param("page", 3);
    assert_eq!(req.url("http://h"), "http://h/api/items?page=3");
}

#[test]
fn get_url_extends_existing_query() {
    let req = OutgoingRequest::get("/api/items?sort=asc").param("page", 3);
    assert_eq!(req.url("http://h"), "http://h/api/items?sort=asc&page=3");
}

#[test]
fn post_url_never_carries_fields() {
    let req = OutgoingRequest::post("/api/login").param("username", "alice");
    assert_eq!(req.url("http://h"), "http://h/api/login");
}

// =============================================================================
// form body
// =============================================================================

#[test]
fn form_fields_contain_exactly_given_fields() {
    let req = OutgoingRequest::post("/api/login").param("username", "alice").param("password", "p");
    let fields: Vec<_> = req.form_fields().collect();
    assert_eq!(fields, vec![("password", "p"), ("username", "alice")]);
}

#[test]
fn multipart_form_has_boundary() {
    let req = OutgoingRequest::post("/api/login").param("username", "alice");
    assert!(!req.multipart_form().boundary().is_empty());
}

#[test]
fn method_display() {
    assert_eq!(Method::Get.to_string(), "GET");
    assert_eq!(Method::Post.to_string(), "POST");
}
