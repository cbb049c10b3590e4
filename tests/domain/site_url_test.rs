use voice_message::domain::{ChannelId, PostId, SiteUrl};

#[test]
fn given_site_url_with_subpath_when_building_record_url_then_absolute_with_base_path() {
    let site = SiteUrl::parse(Some("https://chat.example.com/team/"));

    let url = site.mobile_record_url(
        "tok/en+1",
        &ChannelId::new("c1"),
        Some(&PostId::new("r1")),
    );

    assert_eq!(site.base_path(), "/team");
    assert_eq!(
        url,
        "https://chat.example.com/team/plugins/com.scientia.voice-message/mobile/record?token=tok%2Fen%2B1&channel_id=c1&root_id=r1"
    );
}

#[test]
fn given_no_site_url_when_building_links_then_relative() {
    let site = SiteUrl::parse(None);

    assert_eq!(
        site.mobile_record_url("t", &ChannelId::new("c1"), None),
        "/plugins/com.scientia.voice-message/mobile/record?token=t&channel_id=c1"
    );
    assert_eq!(site.permalink(&PostId::new("p1")), "/pl/p1");
}

#[test]
fn given_site_url_when_building_upload_path_and_permalink_then_uses_origin_only_for_permalink() {
    let site = SiteUrl::parse(Some("http://localhost:8065"));

    assert_eq!(
        site.mobile_upload_path("abc"),
        "/plugins/com.scientia.voice-message/api/v1/mobile/upload?token=abc"
    );
    assert_eq!(site.permalink(&PostId::new("p1")), "http://localhost:8065/pl/p1");
}

#[test]
fn given_origins_when_checking_then_only_matching_host_allowed() {
    let site = SiteUrl::parse(Some("https://Chat.Example.com"));

    assert!(site.is_allowed_origin("https://chat.example.com"));
    assert!(site.is_allowed_origin(""));
    assert!(site.is_allowed_origin("not a url"));
    assert!(!site.is_allowed_origin("https://evil.example.net"));
    assert!(!site.is_allowed_origin("https://chat.example.com:8443"));
}

#[test]
fn given_unparseable_site_url_when_checking_origin_then_allows() {
    let site = SiteUrl::parse(Some("::::"));

    assert!(site.is_allowed_origin("https://anything.example"));
    assert_eq!(site.base_path(), "");
}
