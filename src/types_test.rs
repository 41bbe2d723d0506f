use super::*;

// =============================================================
// Theme
// =============================================================

#[test]
fn theme_default_is_dark() {
    assert_eq!(Theme::default(), Theme::Dark);
}

#[test]
fn theme_toggled_twice_is_identity() {
    for theme in [Theme::Light, Theme::Dark] {
        assert_eq!(theme.toggled().toggled(), theme);
        assert_ne!(theme.toggled(), theme);
    }
}

#[test]
fn theme_parse_accepts_stored_values() {
    assert_eq!(Theme::parse("light"), Some(Theme::Light));
    assert_eq!(Theme::parse(" dark "), Some(Theme::Dark));
    assert_eq!(Theme::parse("sepia"), None);
}

// =============================================================
// User / credentials
// =============================================================

#[test]
fn user_serializes_with_camel_case_preferences() {
    let user = User {
        id: "user-1".to_owned(),
        name: "Alice".to_owned(),
        email: "alice@example.com".to_owned(),
        preferences: Preferences { theme: Theme::Dark, font_size: FontSize::Medium },
        profile_picture: Some("https://example.com/a.png".to_owned()),
    };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["preferences"]["theme"], "dark");
    assert_eq!(json["preferences"]["fontSize"], "medium");
    assert_eq!(json["profilePicture"], "https://example.com/a.png");
}

#[test]
fn user_treats_empty_profile_picture_as_absent() {
    let raw = r#"{"id":"u","name":"n","email":"e@x.io","preferences":{"theme":"dark","fontSize":"medium"},"profilePicture":""}"#;
    let user: User = serde_json::from_str(raw).unwrap();
    assert_eq!(user.profile_picture, None);
}

#[test]
fn user_without_preferences_gets_defaults() {
    let raw = r#"{"id":"u","name":"n","email":"e@x.io"}"#;
    let user: User = serde_json::from_str(raw).unwrap();
    assert_eq!(user.preferences, Preferences::default());
}

#[test]
fn credential_session_user_uses_username_as_name() {
    let record = CredentialRecord {
        id: "user-9".to_owned(),
        username: "bob".to_owned(),
        email: "bob@example.com".to_owned(),
        password: "pw".to_owned(),
        profile_picture: None,
    };
    let user = record.session_user();
    assert_eq!(user.id, "user-9");
    assert_eq!(user.name, "bob");
    assert_eq!(user.email, "bob@example.com");
    assert_eq!(user.preferences.theme, Theme::Dark);
    assert_eq!(user.preferences.font_size, FontSize::Medium);
}

#[test]
fn credential_record_reads_legacy_json() {
    let raw = r#"[{"id":"user-1","username":"a","email":"a@x.io","password":"p"}]"#;
    let records: Vec<CredentialRecord> = serde_json::from_str(raw).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].profile_picture, None);
}

#[test]
fn identity_profile_drops_empty_picture() {
    let profile = IdentityProfile {
        id: "sub-1".to_owned(),
        name: "Carol".to_owned(),
        email: "carol@example.com".to_owned(),
        picture: Some(String::new()),
    };
    assert_eq!(profile.session_user().profile_picture, None);
}

// =============================================================
// Documents / chat
// =============================================================

#[test]
fn document_uses_type_field_for_mime() {
    let doc = Document {
        id: "abc1234".to_owned(),
        name: "a.pdf".to_owned(),
        mime_type: "application/pdf".to_owned(),
        size: 42,
        upload_date: OffsetDateTime::UNIX_EPOCH,
        last_modified: OffsetDateTime::UNIX_EPOCH,
        user_id: "current-user".to_owned(),
        content: None,
        summary: None,
    };
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["type"], "application/pdf");
    assert_eq!(json["uploadDate"], "1970-01-01T00:00:00Z");
    assert!(json.get("content").is_none());
}

#[test]
fn chat_message_new_assigns_distinct_ids() {
    let a = ChatMessage::new(Role::User, "hi", None);
    let b = ChatMessage::new(Role::User, "hi", None);
    assert_ne!(a.id, b.id);
    assert_eq!(a.content, "hi");
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
}

#[test]
fn model_supports_checks_capabilities() {
    let model = AiModel {
        id: "2".to_owned(),
        name: "Claude 3 Opus".to_owned(),
        provider: Provider::Anthropic,
        capabilities: vec![Capability::Summarization, Capability::Chat],
        description: String::new(),
    };
    assert!(model.supports(Capability::Chat));
    assert!(!model.supports(Capability::Grammar));
}
