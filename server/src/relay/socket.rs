//! Socket.io connection surface
//!
//! 客户端以 `?userId=<id>&role=<customer|admin>` 连接默认命名空间。
//! 连接即注册会话并加入自己的房间，admin 额外加入管理员房间。

use super::registry::{SessionRegistry, SessionRole};
use saffron_shared::RelayEvent;
use socketioxide::extract::{SocketRef, State};
use tracing::{debug, warn};

pub const ADMIN_ROOM: &str = "admins";

pub fn user_room(user_id: i64) -> String {
    format!("user:{user_id}")
}

/// Pull `userId` / `role` out of the connection query string
fn parse_query(query: &str) -> (Option<i64>, SessionRole) {
    let mut user_id = None;
    let mut role = SessionRole::Customer;
    for pair in query.split('&') {
        match pair.split_once('=') {
            Some(("userId", value)) => user_id = value.parse().ok(),
            Some(("role", value)) => role = SessionRole::parse(value),
            _ => {}
        }
    }
    (user_id, role)
}

pub async fn on_connect(socket: SocketRef, State(registry): State<SessionRegistry>) {
    let query = socket.req_parts().uri.query().unwrap_or("");
    let (user_id, role) = parse_query(query);

    let Some(user_id) = user_id else {
        warn!(socket_id = %socket.id, "relay connection without userId, dropping");
        socket.disconnect().ok();
        return;
    };

    registry.register(user_id, socket.id, role);
    socket.join(user_room(user_id));
    if role == SessionRole::Admin {
        socket.join(ADMIN_ROOM);
    }
    debug!(user_id, ?role, socket_id = %socket.id, "relay connected");

    socket.on(
        RelayEvent::Heartbeat.as_str(),
        |socket: SocketRef, State(registry): State<SessionRegistry>| async move {
            registry.touch_socket(socket.id);
        },
    );

    socket.on_disconnect(
        |socket: SocketRef, State(registry): State<SessionRegistry>| async move {
            if let Some(user_id) = registry.remove_socket(socket.id) {
                debug!(user_id, "relay disconnected");
            }
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_parsing() {
        let (user, role) = parse_query("userId=42&role=admin");
        assert_eq!(user, Some(42));
        assert_eq!(role, SessionRole::Admin);

        let (user, role) = parse_query("role=customer&userId=7&extra=1");
        assert_eq!(user, Some(7));
        assert_eq!(role, SessionRole::Customer);

        let (user, _) = parse_query("token=abc");
        assert_eq!(user, None);
    }
}
