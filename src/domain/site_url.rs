use url::Url;

use super::{ChannelId, PostId};

pub const PLUGIN_ID: &str = "com.scientia.voice-message";

/// The chat server's public URL, used to build links handed to users.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteUrl {
    origin: Option<String>,
    authority: Option<String>,
    base_path: String,
}

impl SiteUrl {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };
        let Ok(url) = Url::parse(raw) else {
            return Self::default();
        };

        let base_path = url.path().trim_end_matches('/').to_string();
        let origin = url.origin();
        let origin = origin
            .is_tuple()
            .then(|| origin.ascii_serialization());

        Self {
            origin,
            authority: authority(&url),
            base_path,
        }
    }

    /// Path prefix when the server is hosted under a sub-path; empty otherwise.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    fn absolute(&self, path: String) -> String {
        match &self.origin {
            Some(origin) => format!("{}{}", origin, path),
            None => path,
        }
    }

    pub fn mobile_record_url(
        &self,
        token: &str,
        channel_id: &ChannelId,
        root_id: Option<&PostId>,
    ) -> String {
        let mut path = format!(
            "{}/plugins/{}/mobile/record?token={}",
            self.base_path,
            PLUGIN_ID,
            urlencoding::encode(token)
        );
        if !channel_id.is_empty() {
            path.push_str("&channel_id=");
            path.push_str(&urlencoding::encode(channel_id.as_str()));
        }
        if let Some(root) = root_id.filter(|r| !r.is_empty()) {
            path.push_str("&root_id=");
            path.push_str(&urlencoding::encode(root.as_str()));
        }
        self.absolute(path)
    }

    /// Same-origin upload target embedded in the recording page.
    pub fn mobile_upload_path(&self, token: &str) -> String {
        format!(
            "{}/plugins/{}/api/v1/mobile/upload?token={}",
            self.base_path,
            PLUGIN_ID,
            urlencoding::encode(token)
        )
    }

    pub fn permalink(&self, post_id: &PostId) -> String {
        self.absolute(format!("{}/pl/{}", self.base_path, post_id))
    }

    /// An `Origin` is accepted unless both it and the site URL parse and their hosts differ.
    pub fn is_allowed_origin(&self, origin: &str) -> bool {
        let origin = origin.trim();
        if origin.is_empty() {
            return true;
        }
        let Some(site) = &self.authority else {
            return true;
        };
        match Url::parse(origin).ok().as_ref().and_then(authority) {
            Some(candidate) => candidate.eq_ignore_ascii_case(site),
            None => true,
        }
    }
}

fn authority(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
