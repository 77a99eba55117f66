use super::*;

#[test]
fn default_query_selects_everything() {
    assert_eq!(TableQuery::new().to_query_string(), "select=*");
}

#[test]
fn query_with_embedded_select_and_order() {
    let q = TableQuery::new()
        .select("*,customer:customers(name,phone)")
        .order_desc("created_at");
    assert_eq!(
        q.to_query_string(),
        "select=*,customer:customers(name,phone)&order=created_at.desc"
    );
}

#[test]
fn query_filters_compose_in_insertion_order() {
    let q = TableQuery::new()
        .select("id,name")
        .eq("status", "in_repair")
        .eq("customer_id", "c42")
        .order_asc("name");
    assert_eq!(
        q.to_query_string(),
        "select=id,name&status=eq.in_repair&customer_id=eq.c42&order=name.asc"
    );
}

#[test]
fn rest_url_joins_base_table_and_query() {
    let api = BackendApi::new("https://backend.example.com/", "anon");
    assert_eq!(
        api.rest_url("devices", "select=*"),
        "https://backend.example.com/rest/v1/devices?select=*"
    );
}

#[test]
fn auth_url_joins_identity_path() {
    let api = BackendApi::new("https://backend.example.com", "anon");
    assert_eq!(
        api.auth_url("/token?grant_type=password"),
        "https://backend.example.com/auth/v1/token?grant_type=password"
    );
}

#[test]
fn bearer_falls_back_to_anon_key_without_session() {
    let api = BackendApi::new("https://backend.example.com", "anon-key");
    assert_eq!(api.bearer(), "Bearer anon-key");
    assert_eq!(api.with_token("tok-1").bearer(), "Bearer tok-1");
}

#[test]
fn error_body_prefers_msg_field() {
    let body = ErrorBody {
        msg: Some("Invalid login credentials".to_string()),
        error_description: Some("other".to_string()),
        message: None,
    };
    assert_eq!(body.text().as_deref(), Some("Invalid login credentials"));
}
