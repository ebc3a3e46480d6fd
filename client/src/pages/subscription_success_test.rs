use super::*;
use serde_json::{Map, Value};

fn user(email: Option<&str>, metadata: &[(&str, &str)]) -> User {
    let mut user_metadata = Map::new();
    for (key, value) in metadata {
        user_metadata.insert((*key).to_owned(), Value::String((*value).to_owned()));
    }
    User { id: "u1".into(), email: email.map(str::to_owned), user_metadata }
}

#[test]
fn display_name_prefers_full_name() {
    let u = user(Some("ada@b.test"), &[("full_name", "Ada Lovelace"), ("name", "ada")]);
    assert_eq!(display_name(&u), "Ada Lovelace");
}

#[test]
fn display_name_skips_blank_metadata() {
    let u = user(Some("ada@b.test"), &[("full_name", "  "), ("name", "ada")]);
    assert_eq!(display_name(&u), "ada");
}

#[test]
fn display_name_falls_back_to_email_then_generic() {
    assert_eq!(display_name(&user(Some("ada@b.test"), &[])), "ada@b.test");
    assert_eq!(display_name(&user(None, &[])), "there");
}
