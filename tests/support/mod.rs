#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cr_receiver::{Receiver, ReceiverError, StatsSnapshot};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Console compartilhado entre o teste e a task do receiver.
#[derive(Clone, Default)]
pub struct SharedOut(Arc<Mutex<Vec<u8>>>);

impl SharedOut {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedOut {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct Running {
    pub endpoint: String,
    pub out: SharedOut,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<Result<StatsSnapshot, ReceiverError>>,
}

impl Running {
    pub async fn stop(self) -> StatsSnapshot {
        let _ = self.stop.send(());
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("receiver did not stop")
            .expect("receiver task panicked")
            .expect("receiver failed")
    }
}

/// Sobe um receiver numa porta livre do loopback.
pub async fn start_receiver() -> Running {
    let receiver = Receiver::bind("tcp://127.0.0.1:0").await.expect("bind failed");
    let endpoint = receiver.endpoint().to_string();
    let out = SharedOut::default();
    let (stop, stop_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(receiver.run(out.clone(), async move {
        let _ = stop_rx.await;
    }));

    Running {
        endpoint,
        out,
        stop,
        handle,
    }
}

/// Espera até `cond(texto do console)` ser verdadeiro (limite de 5s).
pub async fn wait_until(out: &SharedOut, cond: impl Fn(&str) -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if cond(&out.text()) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("condition not met; console was:\n{}", out.text()));
}

pub fn block(order_id: &str, price: &str, qty: &str, ts_ns: &str) -> String {
    format!(
        "Received CancelReplaceRequest:\n  order_id: {order_id}\n  new_price: {price}\n  new_qty: {qty}\n  ts_ns: {ts_ns}\n"
    )
}

pub const FAILURE: &str = "Failed to parse CancelReplaceRequest protobuf!\n";
