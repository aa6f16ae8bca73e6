//! Unit-style tests for the WebSocket connection manager (no database).

use assert_matches::assert_matches;
use axum::extract::ws::Message;
use duet_api::ws::WsManager;

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();
    assert_eq!(manager.connection_count().await, 0);

    let _rx_a = manager.add("conn-a".to_string(), 1).await;
    let _rx_b = manager.add("conn-b".to_string(), 2).await;
    assert_eq!(manager.connection_count().await, 2);

    manager.remove("conn-a").await;
    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn send_to_user_reaches_all_of_their_connections() {
    let manager = WsManager::new();
    let mut phone = manager.add("phone".to_string(), 7).await;
    let mut laptop = manager.add("laptop".to_string(), 7).await;
    let mut other = manager.add("other".to_string(), 8).await;

    let delivered = manager.send_to_user(7, Message::Text("hello".into())).await;
    assert_eq!(delivered, 2);

    assert_matches!(phone.try_recv(), Ok(Message::Text(t)) if t.as_str() == "hello");
    assert_matches!(laptop.try_recv(), Ok(Message::Text(t)) if t.as_str() == "hello");
    assert!(other.try_recv().is_err(), "user 8 must not receive it");
}

#[tokio::test]
async fn send_to_unknown_user_delivers_nothing() {
    let manager = WsManager::new();
    let _rx = manager.add("conn".to_string(), 1).await;

    let delivered = manager.send_to_user(99, Message::Text("ghost".into())).await;
    assert_eq!(delivered, 0);
}

#[tokio::test]
async fn shutdown_closes_and_clears_every_connection() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn".to_string(), 1).await;

    manager.shutdown_all().await;

    assert_matches!(rx.try_recv(), Ok(Message::Close(_)));
    assert_eq!(manager.connection_count().await, 0);
}
