use super::*;

#[test]
fn credentials_trims_email_and_keeps_password() {
    assert_eq!(
        credentials("  ada@b.test ", " secret "),
        Ok(("ada@b.test".to_owned(), " secret ".to_owned()))
    );
}

#[test]
fn credentials_require_both_fields() {
    assert_eq!(credentials("   ", "pw"), Err("Enter both email and password."));
    assert_eq!(credentials("ada@b.test", ""), Err("Enter both email and password."));
}

#[test]
fn credentials_reject_email_without_at() {
    assert_eq!(credentials("ada", "pw"), Err("Enter a valid email address."));
}

#[test]
fn oauth_return_url_is_absent_outside_the_browser() {
    assert_eq!(oauth_return_url(AppRoute::Generators), None);
}
