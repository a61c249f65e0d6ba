//! Scripted in-memory transport for unit tests.

use super::query::QueryParams;
use super::transport::{ApiTransport, ServiceUrl};
use crate::domain::error::{RecibosError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use tokio::sync::oneshot;

struct Step {
    gate: Option<oneshot::Receiver<()>>,
    reply: Result<Value>,
}

#[derive(Default)]
struct Script {
    routes: HashMap<String, VecDeque<Step>>,
    calls: Vec<(String, QueryParams)>,
}

/// Answers each path from a FIFO of queued replies. Unscripted calls fail
/// with a network error.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<Script>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self, path: &str, step: Step) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .routes
            .entry(path.to_string())
            .or_default()
            .push_back(step);
    }

    pub fn reply(&self, path: &str, body: Value) -> &Self {
        self.queue(path, Step { gate: None, reply: Ok(body) });
        self
    }

    pub fn fail(&self, path: &str, status: u16) -> &Self {
        let reply = Err(RecibosError::Server { status, detail: None });
        self.queue(path, Step { gate: None, reply });
        self
    }

    /// Queues a reply that is held back until the returned sender fires.
    pub fn gated_reply(&self, path: &str, body: Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.queue(path, Step { gate: Some(rx), reply: Ok(body) });
        tx
    }

    pub fn calls(&self) -> Vec<(String, QueryParams)> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner).calls.clone()
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn get_json(&self, path: &str, params: &QueryParams) -> Result<Value> {
        let step = {
            let mut script = self.script.lock().unwrap_or_else(PoisonError::into_inner);
            script.calls.push((path.to_string(), params.clone()));
            script.routes.get_mut(path).and_then(VecDeque::pop_front)
        };
        let Some(step) = step else {
            return Err(RecibosError::Network(format!("unscripted path {path}")));
        };
        if let Some(gate) = step.gate {
            let _ = gate.await;
        }
        step.reply
    }
}

pub fn service() -> ServiceUrl {
    ServiceUrl::parse("https://api-dzemul-production.up.railway.app/").unwrap()
}

pub fn receipt_json(id: u32, payer: &str, net: i64, status: &str) -> Value {
    json!({
        "recibo": id,
        "contribuyente": payer,
        "concepto": "Predial",
        "fecha": "250423",
        "neto": net,
        "descuento": 0,
        "status": status,
    })
}

pub fn receipt_totals_json(net: i64, discount: i64, cancelled: u64) -> Value {
    json!({
        "total_neto": net,
        "total_descuento": discount,
        "cantidad_status_1": cancelled,
    })
}
