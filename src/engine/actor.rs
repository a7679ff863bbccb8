// ============================================================================
// Engine Actor
// A dedicated tokio task owns the engine and serves commands in order
// ============================================================================

use crate::domain::{EngineError, OrderId, OrderView, RejectReason, Side, TradeEvent};
use crate::engine::MatchingEngine;
use crate::numeric::{Price, Quantity};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Commands processed by the engine task
#[derive(Debug)]
pub enum EngineCommand {
    SubmitOrder {
        side: Side,
        symbol: String,
        quantity: Quantity,
        price: Price,
        response_tx: oneshot::Sender<Result<OrderId, RejectReason>>,
    },
    MatchOrders {
        response_tx: oneshot::Sender<Vec<TradeEvent>>,
    },
    Snapshot {
        side: Side,
        response_tx: oneshot::Sender<Vec<OrderView>>,
    },
}

/// Cloneable front-end to an engine task.
///
/// Commands from all handles are served one at a time in arrival order,
/// giving linearizable semantics without locking inside the book.
#[derive(Clone)]
pub struct EngineHandle {
    command_tx: mpsc::UnboundedSender<EngineCommand>,
}

impl EngineHandle {
    /// Move `engine` onto a new task.
    ///
    /// The task exits once every handle is dropped and returns the engine
    /// through the join handle.
    pub fn spawn(engine: MatchingEngine) -> (Self, JoinHandle<MatchingEngine>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(Self::run(engine, command_rx));
        (Self { command_tx }, task)
    }

    pub async fn submit_order(
        &self,
        side: Side,
        symbol: impl Into<String>,
        quantity: Quantity,
        price: Price,
    ) -> Result<OrderId, EngineError> {
        let (response_tx, response_rx) = oneshot::channel();
        self.send(EngineCommand::SubmitOrder {
            side,
            symbol: symbol.into(),
            quantity,
            price,
            response_tx,
        })?;

        let order_id = response_rx.await.map_err(|_| EngineError::Closed)??;
        Ok(order_id)
    }

    pub async fn match_orders(&self) -> Result<Vec<TradeEvent>, EngineError> {
        let (response_tx, response_rx) = oneshot::channel();
        self.send(EngineCommand::MatchOrders { response_tx })?;
        response_rx.await.map_err(|_| EngineError::Closed)
    }

    pub async fn snapshot(&self, side: Side) -> Result<Vec<OrderView>, EngineError> {
        let (response_tx, response_rx) = oneshot::channel();
        self.send(EngineCommand::Snapshot { side, response_tx })?;
        response_rx.await.map_err(|_| EngineError::Closed)
    }

    fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.command_tx
            .send(command)
            .map_err(|_| EngineError::Closed)
    }

    async fn run(
        mut engine: MatchingEngine,
        mut command_rx: mpsc::UnboundedReceiver<EngineCommand>,
    ) -> MatchingEngine {
        info!(algorithm = engine.algorithm_name(), "Engine task started");

        while let Some(command) = command_rx.recv().await {
            match command {
                EngineCommand::SubmitOrder {
                    side,
                    symbol,
                    quantity,
                    price,
                    response_tx,
                } => {
                    let result = engine.submit_order(side, &symbol, quantity, price);
                    let _ = response_tx.send(result);
                },
                EngineCommand::MatchOrders { response_tx } => {
                    let _ = response_tx.send(engine.match_orders());
                },
                EngineCommand::Snapshot { side, response_tx } => {
                    let _ = response_tx.send(engine.snapshot(side).collect());
                },
            }
        }

        debug!(resting = engine.order_count(), "Engine task stopped");
        engine
    }
}
