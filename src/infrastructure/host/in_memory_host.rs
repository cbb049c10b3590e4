use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::application::ports::{
    CommandDefinition, CommandRegistry, Directory, EphemeralMessenger, FileStore, HostError,
    KvStore, PostStore,
};
use crate::domain::{ChannelId, FileId, Post, PostId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub channel_id: ChannelId,
    pub filename: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EphemeralPost {
    pub user_id: UserId,
    pub channel_id: ChannelId,
    pub message: String,
}

/// Process-local stand-in for the chat server.
///
/// Backs the standalone binary and the test suite. State lives in plain
/// maps behind mutexes that are never held across an await.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    posts: Mutex<HashMap<PostId, Post>>,
    files: Mutex<HashMap<FileId, StoredFile>>,
    kv: Mutex<HashMap<String, Vec<u8>>>,
    members: Mutex<HashSet<(ChannelId, UserId)>>,
    roles: Mutex<HashMap<UserId, String>>,
    channels: Mutex<HashMap<ChannelId, String>>,
    ephemeral: Mutex<HashMap<PostId, EphemeralPost>>,
    commands: Mutex<BTreeMap<String, CommandDefinition>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_channel(&self, channel_id: &ChannelId, display_name: &str) {
        lock(&self.channels).insert(channel_id.clone(), display_name.to_string());
    }

    pub fn add_member(&self, channel_id: &ChannelId, user_id: &UserId) {
        lock(&self.members).insert((channel_id.clone(), user_id.clone()));
    }

    /// Seeds memberships from `channel_id:user_id` pairs. Malformed entries are skipped.
    pub fn add_members_from_pairs<S: AsRef<str>>(&self, pairs: &[S]) -> usize {
        let mut added = 0;
        for pair in pairs {
            let Some((channel, user)) = pair.as_ref().split_once(':') else {
                tracing::warn!(entry = pair.as_ref(), "Ignoring malformed member seed");
                continue;
            };
            let (channel, user) = (channel.trim(), user.trim());
            if channel.is_empty() || user.is_empty() {
                continue;
            }
            self.add_member(&ChannelId::new(channel), &UserId::new(user));
            added += 1;
        }
        added
    }

    pub fn set_user_roles(&self, user_id: &UserId, roles: &str) {
        lock(&self.roles).insert(user_id.clone(), roles.to_string());
    }

    pub fn insert_post(&self, post: Post) {
        lock(&self.posts).insert(post.id.clone(), post);
    }

    pub fn post(&self, id: &PostId) -> Option<Post> {
        lock(&self.posts).get(id).cloned()
    }

    pub fn post_count(&self) -> usize {
        lock(&self.posts).len()
    }

    pub fn insert_file(&self, id: &FileId, file: StoredFile) {
        lock(&self.files).insert(id.clone(), file);
    }

    pub fn file(&self, id: &FileId) -> Option<StoredFile> {
        lock(&self.files).get(id).cloned()
    }

    pub fn kv_value(&self, key: &str) -> Option<Vec<u8>> {
        lock(&self.kv).get(key).cloned()
    }

    pub fn kv_keys(&self) -> Vec<String> {
        lock(&self.kv).keys().cloned().collect()
    }

    pub fn ephemeral_post(&self, id: &PostId) -> Option<EphemeralPost> {
        lock(&self.ephemeral).get(id).cloned()
    }

    pub fn registered_triggers(&self) -> Vec<String> {
        lock(&self.commands).keys().cloned().collect()
    }
}

#[async_trait]
impl PostStore for InMemoryHost {
    async fn create_post(&self, mut post: Post) -> Result<Post, HostError> {
        if post.id.is_empty() {
            post.id = PostId::generate();
        }
        let mut posts = lock(&self.posts);
        if posts.contains_key(&post.id) {
            return Err(HostError::StorageFailed(format!(
                "post {} already exists",
                post.id
            )));
        }
        posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: &PostId) -> Result<Option<Post>, HostError> {
        Ok(self.post(id))
    }

    async fn update_post(&self, post: &Post) -> Result<Post, HostError> {
        let mut posts = lock(&self.posts);
        match posts.get_mut(&post.id) {
            Some(stored) => {
                *stored = post.clone();
                Ok(post.clone())
            }
            None => Err(HostError::NotFound(format!("post {}", post.id))),
        }
    }
}

#[async_trait]
impl FileStore for InMemoryHost {
    async fn upload_file(
        &self,
        data: &[u8],
        channel_id: &ChannelId,
        filename: &str,
    ) -> Result<FileId, HostError> {
        let id = FileId::generate();
        self.insert_file(
            &id,
            StoredFile {
                channel_id: channel_id.clone(),
                filename: filename.to_string(),
                data: data.to_vec(),
            },
        );
        Ok(id)
    }

    async fn get_file(&self, id: &FileId) -> Result<Vec<u8>, HostError> {
        self.file(id)
            .map(|f| f.data)
            .ok_or_else(|| HostError::NotFound(format!("file {}", id)))
    }
}

#[async_trait]
impl KvStore for InMemoryHost {
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), HostError> {
        lock(&self.kv).insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, HostError> {
        Ok(self.kv_value(key))
    }

    async fn delete(&self, key: &str) -> Result<bool, HostError> {
        Ok(lock(&self.kv).remove(key).is_some())
    }
}

#[async_trait]
impl Directory for InMemoryHost {
    async fn is_channel_member(
        &self,
        channel_id: &ChannelId,
        user_id: &UserId,
    ) -> Result<bool, HostError> {
        Ok(lock(&self.members).contains(&(channel_id.clone(), user_id.clone())))
    }

    async fn user_roles(&self, user_id: &UserId) -> Result<String, HostError> {
        Ok(lock(&self.roles)
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| "system_user".to_string()))
    }

    async fn channel_display_name(
        &self,
        channel_id: &ChannelId,
    ) -> Result<Option<String>, HostError> {
        Ok(lock(&self.channels).get(channel_id).cloned())
    }
}

#[async_trait]
impl EphemeralMessenger for InMemoryHost {
    async fn send_ephemeral(
        &self,
        user_id: &UserId,
        channel_id: &ChannelId,
        message: &str,
    ) -> Result<PostId, HostError> {
        let id = PostId::generate();
        lock(&self.ephemeral).insert(
            id.clone(),
            EphemeralPost {
                user_id: user_id.clone(),
                channel_id: channel_id.clone(),
                message: message.to_string(),
            },
        );
        Ok(id)
    }

    async fn update_ephemeral(
        &self,
        user_id: &UserId,
        post_id: &PostId,
        channel_id: &ChannelId,
        message: &str,
    ) -> Result<(), HostError> {
        lock(&self.ephemeral).insert(
            post_id.clone(),
            EphemeralPost {
                user_id: user_id.clone(),
                channel_id: channel_id.clone(),
                message: message.to_string(),
            },
        );
        Ok(())
    }

    async fn delete_ephemeral(&self, _user_id: &UserId, post_id: &PostId) -> Result<(), HostError> {
        lock(&self.ephemeral).remove(post_id);
        Ok(())
    }
}

#[async_trait]
impl CommandRegistry for InMemoryHost {
    async fn register_command(&self, command: CommandDefinition) -> Result<(), HostError> {
        lock(&self.commands).insert(command.trigger.clone(), command);
        Ok(())
    }

    async fn unregister_command(&self, trigger: &str) -> Result<(), HostError> {
        lock(&self.commands).remove(trigger);
        Ok(())
    }
}
