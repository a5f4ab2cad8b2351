//! Scenario: undecodable frames print the fixed notice and the loop goes on
//!
//! Three garbage bytes produce exactly one failure line; the next valid
//! request is still decoded and printed, unaffected by the bad frame before it.

mod support;

use cr_receiver::{CancelReplaceRequest, Sender, StatsSnapshot};
use prost::Message;
use support::{block, start_receiver, wait_until, FAILURE};
use zeromq::{PushSocket, Socket, SocketSend, ZmqMessage};

#[tokio::test]
async fn garbage_then_valid_request() {
    let rx = start_receiver().await;
    let mut sender = Sender::connect(&rx.endpoint).await.unwrap();

    sender.send_raw(vec![0xFF, 0xFF, 0xFF]).await.unwrap();
    sender
        .send(&CancelReplaceRequest::new("ABC123", 101.5, 10, 1_700_000_000_000_000_000))
        .await
        .unwrap();

    wait_until(&rx.out, |t| t.contains("ts_ns: ")).await;
    let out = rx.out.clone();
    let stats = rx.stop().await;

    assert_eq!(
        out.text(),
        format!("{FAILURE}{}", block("ABC123", "101.5", "10", "1700000000000000000"))
    );
    assert_eq!(
        stats,
        StatsSnapshot {
            received: 2,
            decoded: 1,
            failed: 1
        }
    );
}

#[tokio::test]
async fn bad_frame_between_two_good_ones_changes_nothing() {
    let rx = start_receiver().await;
    let mut sender = Sender::connect(&rx.endpoint).await.unwrap();
    let req = CancelReplaceRequest::new("ORD-1", 99.75, 3, 5);

    sender.send(&req).await.unwrap();
    // tag 1 (string) com wire type varint
    sender.send_raw(vec![0x08, 0x01]).await.unwrap();
    sender.send(&req).await.unwrap();

    wait_until(&rx.out, |t| t.matches("Received CancelReplaceRequest:").count() == 2).await;
    let out = rx.out.clone();
    rx.stop().await;

    let one = block("ORD-1", "99.75", "3", "5");
    assert_eq!(out.text(), format!("{one}{FAILURE}{one}"));
}

#[tokio::test]
async fn each_frame_of_a_multipart_message_is_its_own_request() {
    let rx = start_receiver().await;
    let mut push = PushSocket::new();
    push.connect(&rx.endpoint).await.unwrap();

    let mut msg = ZmqMessage::from(CancelReplaceRequest::new("PART-1", 1.0, 1, 1).encode_to_vec());
    msg.push_back(vec![0xFFu8, 0xFF, 0xFF].into());
    msg.push_back(CancelReplaceRequest::new("PART-3", 3.0, 3, 3).encode_to_vec().into());
    push.send(msg).await.unwrap();

    wait_until(&rx.out, |t| t.contains("order_id: PART-3")).await;
    let out = rx.out.clone();
    let stats = rx.stop().await;

    assert_eq!(
        out.text(),
        format!(
            "{}{FAILURE}{}",
            block("PART-1", "1", "1", "1"),
            block("PART-3", "3", "3", "3")
        )
    );
    assert_eq!(stats.received, 3);
    assert_eq!(stats.failed, 1);
}
