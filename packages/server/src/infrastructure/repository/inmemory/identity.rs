//! InMemory Identity Repository 実装

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ClientDescriptor, ConnectionId, DisplayName, IdentityRepository};

/// インメモリ Identity Repository 実装
///
/// 接続 ID → 表示名 の HashMap を保持します。
#[derive(Default)]
pub struct InMemoryIdentityRepository {
    identities: Arc<Mutex<HashMap<ConnectionId, DisplayName>>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録済みの接続数
    pub async fn len(&self) -> usize {
        self.identities.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.identities.lock().await.is_empty()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn set_identity(&self, connection_id: ConnectionId, display_name: DisplayName) {
        let mut identities = self.identities.lock().await;
        if let Some(previous) = identities.insert(connection_id.clone(), display_name) {
            tracing::debug!(
                "Identity of '{}' re-registered (was '{}')",
                connection_id,
                previous.as_str()
            );
        }
    }

    async fn get_identity(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        self.identities.lock().await.get(connection_id).cloned()
    }

    async fn remove_identity(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        self.identities.lock().await.remove(connection_id)
    }

    async fn describe(&self, connection_ids: &[ConnectionId]) -> Vec<ClientDescriptor> {
        let identities = self.identities.lock().await;
        connection_ids
            .iter()
            .map(|id| ClientDescriptor::new(id.clone(), identities.get(id).cloned()))
            .collect()
    }
}
