use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! host_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Host-style identifier: 26 lowercase alphanumerics.
            pub fn generate() -> Self {
                let raw = Uuid::new_v4().simple().to_string();
                Self(raw[..26].to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

host_id!(
    /// Identifier of a post (message) on the chat host.
    PostId
);
host_id!(ChannelId);
host_id!(UserId);
host_id!(
    /// Identifier of a file held by the host's file storage.
    FileId
);
