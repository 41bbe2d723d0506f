use super::*;

/// # Safety
/// Env mutation races other tests touching the same variables; every test in
/// this file resets the variables it reads before and after.
unsafe fn clear_config_env() {
    unsafe {
        std::env::remove_var("DATAMIND_PROCESSING_DELAY_MS");
        std::env::remove_var("DATAMIND_REPLY_DELAY_MS");
        std::env::remove_var("DATAMIND_NOTICE_MS");
        std::env::remove_var("DATAMIND_STORE_PATH");
        std::env::remove_var("OAUTH_CLIENT_ID");
        std::env::remove_var("OAUTH_CLIENT_SECRET");
        std::env::remove_var("OAUTH_REDIRECT_URI");
    }
}

#[test]
fn timings_default_match_simulated_backend() {
    let timings = Timings::default();
    assert_eq!(timings.processing_delay, Duration::from_millis(1500));
    assert_eq!(timings.reply_delay, Duration::from_millis(1000));
    assert_eq!(timings.notice_duration, Duration::from_millis(5000));
}

#[test]
fn env_parse_falls_back_on_garbage() {
    unsafe { std::env::set_var("DATAMIND_TEST_ENV_PARSE", "not-a-number") };
    assert_eq!(env_parse("DATAMIND_TEST_ENV_PARSE", 7_u64), 7);
    unsafe { std::env::set_var("DATAMIND_TEST_ENV_PARSE", "12") };
    assert_eq!(env_parse("DATAMIND_TEST_ENV_PARSE", 7_u64), 12);
    unsafe { std::env::remove_var("DATAMIND_TEST_ENV_PARSE") };
}

#[test]
fn from_env_reads_overrides_and_oauth() {
    unsafe {
        clear_config_env();
        std::env::set_var("DATAMIND_REPLY_DELAY_MS", "10");
        std::env::set_var("DATAMIND_STORE_PATH", "/tmp/datamind-test/storage.json");
        std::env::set_var("OAUTH_CLIENT_ID", "client-123");
    }

    let cfg = Config::from_env();
    assert_eq!(cfg.timings.reply_delay, Duration::from_millis(10));
    assert_eq!(cfg.timings.processing_delay, Duration::from_millis(DEFAULT_PROCESSING_DELAY_MS));
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/datamind-test/storage.json"));
    let oauth = cfg.oauth.unwrap();
    assert_eq!(oauth.client_id, "client-123");
    assert_eq!(oauth.client_secret, None);
    assert_eq!(oauth.redirect_uri, DEFAULT_REDIRECT_URI);

    unsafe {
        std::env::set_var("OAUTH_CLIENT_ID", "   ");
    }
    assert!(OAuthConfig::from_env().is_none());

    unsafe { clear_config_env() };
}

#[test]
fn default_store_path_ends_in_profile_file() {
    let path = default_store_path();
    assert!(path.ends_with(".datamind/storage.json"));
}
