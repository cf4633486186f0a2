//! Notification Relay Module
//!
//! 把订单/预订状态变更实时推送给在线客户端。HTTP 层只依赖
//! `notify_user` / `notify_admins`，socket.io 细节都留在本模块内。

pub mod registry;
mod socket;

pub use registry::{Session, SessionRegistry, SessionRole};

use saffron_shared::RelayEvent;
use serde::Serialize;
use socketioxide::SocketIo;
use socketioxide::layer::SocketIoLayer;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Relay handle shared with the HTTP layer
#[derive(Clone)]
pub struct Relay {
    io: SocketIo,
    registry: SessionRegistry,
    shutdown: CancellationToken,
}

impl Relay {
    /// Build the socket.io layer and start the idle-session sweeper
    pub fn new(session_ttl: Duration) -> (SocketIoLayer, Relay) {
        let registry = SessionRegistry::new();
        let (layer, io) = SocketIo::builder()
            .with_state(registry.clone())
            .build_layer();
        io.ns("/", socket::on_connect);
        let shutdown = CancellationToken::new();
        registry.spawn_sweeper(session_ttl, shutdown.clone());
        (
            layer,
            Relay {
                io,
                registry,
                shutdown,
            },
        )
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Stop the background sweeper
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Targeted push to one user's room; a silent no-op when offline
    pub async fn notify_user<T: Serialize>(&self, user_id: i64, event: RelayEvent, payload: &T) {
        if !self.registry.is_online(user_id) {
            debug!(user_id, event = event.as_str(), "relay target offline");
            return;
        }
        self.registry.touch(user_id);
        if let Err(e) = self
            .io
            .to(socket::user_room(user_id))
            .emit(event.as_str(), payload)
            .await
        {
            warn!(user_id, event = event.as_str(), "relay emit failed: {e}");
        }
    }

    /// Push to every connected admin session
    pub async fn notify_admins<T: Serialize>(&self, event: RelayEvent, payload: &T) {
        if let Err(e) = self
            .io
            .to(socket::ADMIN_ROOM)
            .emit(event.as_str(), payload)
            .await
        {
            warn!(event = event.as_str(), "relay admin emit failed: {e}");
        }
    }
}
