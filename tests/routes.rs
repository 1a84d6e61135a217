use actix_web::http::{StatusCode, header};
use actix_web::test;
use actix_web_flash_messages::Level;

use keepintouch::domain::profile::{NewProfile, Role};
use keepintouch::domain::types::ProfileEmail;
use keepintouch::repository::{ProfileReader, ProfileWriter};
use keepintouch::routes::alert_level_to_str;

#[macro_use]
mod common;

use common::app::{FLASH_COOKIE, SESSION_COOKIE, token_for};

/// Signs `email` in through the callback and evaluates to the session cookie.
macro_rules! sign_in {
    ($app:expr, $email:expr) => {{
        let uri = format!("/auth/callback?token={}", token_for($email));
        let resp = test::call_service(&$app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        resp.response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.into_owned())
            .expect("session cookie is set")
    }};
}

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn test_dashboard_redirects_anonymous_callers_to_signin() {
    let test_db = common::TestDb::new("test_dashboard_redirects_anonymous_callers.db");
    let app = test_app!(test_db);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/auth/signin"
    );

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/auth/signin").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("http://auth.example.com"));
}

#[actix_web::test]
async fn test_first_sign_in_creates_profile_and_shows_dashboard() {
    let test_db = common::TestDb::new("test_first_sign_in_creates_profile.db");
    let app = test_app!(test_db);

    let session = sign_in!(app, "agent@example.com");
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(session).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("agent@example.com"));

    let profile = test_db
        .repo()
        .get_profile_by_email(&ProfileEmail::new("agent@example.com").unwrap())
        .unwrap()
        .expect("profile created on first sign-in");
    assert_eq!(profile.role, Role::User);
    assert!(profile.is_active);
}

#[actix_web::test]
async fn test_deactivated_account_is_signed_out_with_banner() {
    let test_db = common::TestDb::new("test_deactivated_account_is_signed_out.db");
    let repo = test_db.repo();
    let profile = repo
        .create_profile(&NewProfile::new(
            ProfileEmail::new("gone@example.com").unwrap(),
            Role::User,
        ))
        .unwrap();
    repo.set_profile_active(profile.id, false).unwrap();

    let app = test_app!(test_db);
    let session = sign_in!(app, "gone@example.com");

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(session).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/auth/signin"
    );
    assert!(resp.response().cookies().any(|c| c.name() == FLASH_COOKIE));
    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .expect("session cookie is cleared");
    assert_eq!(cleared.value(), "");
}
