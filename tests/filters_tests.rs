use chrono::{Duration, TimeZone, Utc};

use skype_tldr::errors::DigestError;
use skype_tldr::skype::{RawChat, RawMessage, RawUser};
use skype_tldr::utils::filters::{
    UNKNOWN_FIELD, UNKNOWN_USER, filter_recent, resolve_title, retention_cutoff,
};

#[test]
fn test_title_prefers_display_name() {
    let chat = RawChat {
        id: "8:live:dana".to_string(),
        user: Some(RawUser {
            id: "live:dana".to_string(),
            display_name: Some("Dana Scully".to_string()),
        }),
    };
    assert_eq!(resolve_title(&chat), "Dana Scully");
}

#[test]
fn test_title_falls_back_to_user_id_then_unknown() {
    let nameless = RawChat {
        id: "8:live:fox".to_string(),
        user: Some(RawUser {
            id: "live:fox".to_string(),
            display_name: None,
        }),
    };
    assert_eq!(resolve_title(&nameless), "live:fox");

    let group = RawChat {
        id: "19:abc@thread.skype".to_string(),
        user: None,
    };
    assert_eq!(resolve_title(&group), UNKNOWN_USER);
}

#[test]
fn test_filter_recent_applies_cutoff_inclusively() {
    let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
    let cutoff = retention_cutoff(now, 5).unwrap();
    assert_eq!(cutoff, now - Duration::days(5));

    let messages = vec![
        RawMessage {
            id: Some("before".to_string()),
            time: Some(cutoff - Duration::seconds(1)),
            ..RawMessage::default()
        },
        RawMessage {
            id: Some("edge".to_string()),
            time: Some(cutoff),
            ..RawMessage::default()
        },
        RawMessage {
            id: Some("undated".to_string()),
            time: None,
            ..RawMessage::default()
        },
        RawMessage {
            id: Some("latest".to_string()),
            time: Some(now),
            ..RawMessage::default()
        },
    ];

    let kept = filter_recent(messages, cutoff);
    let ids: Vec<&str> = kept.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["edge", "latest"]);
}

#[test]
fn test_missing_fields_degrade_to_placeholders() {
    let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
    let kept = filter_recent(
        vec![RawMessage {
            time: Some(now),
            ..RawMessage::default()
        }],
        retention_cutoff(now, 5).unwrap(),
    );

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, UNKNOWN_FIELD);
    assert_eq!(kept[0].content, "");
    assert_eq!(kept[0].sender, UNKNOWN_FIELD);
    assert_eq!(kept[0].time, "2024-06-10T12:00:00+00:00");
}

#[test]
fn test_retention_cutoff_rejects_unusable_windows() {
    let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();

    assert_eq!(retention_cutoff(now, 1).unwrap(), now - Duration::days(1));
    for days in [0, -1, 1_000_000_000, i64::MAX] {
        assert!(
            matches!(
                retention_cutoff(now, days),
                Err(DigestError::InvalidRetention(d)) if d == days
            ),
            "days: {days}"
        );
    }
}
