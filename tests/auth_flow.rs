//! Integration tests for the login/logout flow and the route guard,
//! end-to-end over a file-backed store.

use agora::app::{App, LOGIN_ERROR_MESSAGE};
use agora::auth::StaticCredentials;
use agora::config::Config;
use agora::route::Route;
use agora::store::{FileStore, KeyValueStore};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::Arc;

fn store_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("agora_auth_test_{}", name));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("store.json");
    std::fs::remove_file(&path).ok();
    path
}

fn app_over(path: &PathBuf) -> App {
    let kv = Arc::new(FileStore::open(path).unwrap()) as Arc<dyn KeyValueStore>;
    App::new(kv, Box::new(StaticCredentials::default()), &Config::default()).unwrap()
}

#[test]
fn test_full_login_logout_cycle() {
    let path = store_path("cycle");
    let mut app = app_over(&path);

    // Guarded route bounces to login while logged out
    app.navigate(Route::Profile);
    assert_eq!(app.route, Route::Login);

    // Wrong pair: message, no flag, still on login
    app.login.username = "admin".to_string();
    app.login.password = "wrong".to_string();
    app.submit_login().unwrap();
    assert_eq!(app.login.error.as_deref(), Some(LOGIN_ERROR_MESSAGE));
    assert_eq!(app.route, Route::Login);

    // Right pair: flag set, profile reachable
    app.login.username = "admin".to_string();
    app.login.password = "12345".to_string();
    app.submit_login().unwrap();
    assert_eq!(app.route, Route::Profile);
    assert!(app.session.is_authenticated());

    // Logout writes the "false" literal and returns to login
    app.logout().unwrap();
    assert!(!app.session.is_authenticated());
    assert_eq!(app.route, Route::Login);
    app.navigate(Route::Profile);
    assert_eq!(app.route, Route::Login);
}

#[test]
fn test_session_flag_survives_restart() {
    let path = store_path("restart");

    {
        let mut app = app_over(&path);
        app.login.username = "admin".to_string();
        app.login.password = "12345".to_string();
        app.submit_login().unwrap();
    }

    let mut app = app_over(&path);
    assert!(app.session.is_authenticated());
    app.navigate(Route::Profile);
    assert_eq!(app.route, Route::Profile);
}

#[test]
fn test_only_literal_true_in_store_authenticates() {
    let path = store_path("literal");

    for (value, expected) in [
        ("true", true),
        ("false", false),
        ("", false),
        ("True", false),
        ("1", false),
    ] {
        {
            let kv = FileStore::open(&path).unwrap();
            kv.set("isAuth", value).unwrap();
        }
        let app = app_over(&path);
        assert_eq!(
            app.session.is_authenticated(),
            expected,
            "stored literal {:?}",
            value
        );
    }
}

#[test]
fn test_custom_verifier_pair_from_config() {
    let path = store_path("custom_pair");
    let kv = Arc::new(FileStore::open(&path).unwrap()) as Arc<dyn KeyValueStore>;
    let mut app = App::new(
        kv,
        Box::new(StaticCredentials::new("moderator", "hunter2")),
        &Config::default(),
    )
    .unwrap();

    // The shipped default pair no longer verifies
    app.login.username = "admin".to_string();
    app.login.password = "12345".to_string();
    app.submit_login().unwrap();
    assert!(!app.session.is_authenticated());

    app.login.username = "moderator".to_string();
    app.login.password = "hunter2".to_string();
    app.submit_login().unwrap();
    assert!(app.session.is_authenticated());
}
