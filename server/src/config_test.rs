use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_port_when_unset() {
    let cfg = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert!(cfg.identity.url.is_empty());
}

#[test]
fn parses_port_and_identity() {
    let cfg = ServerConfig::from_lookup(lookup_from(&[
        ("PORT", " 8080 "),
        ("SUPABASE_URL", "https://proj.supabase.co"),
        ("SUPABASE_SERVICE_ROLE_KEY", "srk"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.identity.url, "https://proj.supabase.co");
    assert_eq!(cfg.identity.service_role_key, "srk");
}

#[test]
fn invalid_port_errors() {
    let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
    assert_eq!(err.to_string(), "invalid PORT: eighty");
}
