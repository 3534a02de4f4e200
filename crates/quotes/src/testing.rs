//! Test doubles shared by the unit tests of this crate.

use async_trait::async_trait;
use price_board::{PriceBoardClient, PriceBoardError, PriceBoardResult, PriceTable, StaticPriceBoard};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Price board client that records every call.
pub struct CountingClient {
    board: StaticPriceBoard,
    table: Option<PriceTable>,
    failure: Option<PriceBoardError>,
    calls: AtomicUsize,
    last_symbols: Mutex<Vec<String>>,
}

impl CountingClient {
    pub fn new(board: StaticPriceBoard) -> Self {
        Self {
            board,
            table: None,
            failure: None,
            calls: AtomicUsize::new(0),
            last_symbols: Mutex::new(Vec::new()),
        }
    }

    /// A client whose every call fails with `err`.
    pub fn failing(err: PriceBoardError) -> Self {
        Self {
            failure: Some(err),
            ..Self::new(StaticPriceBoard::new())
        }
    }

    /// A client that answers every call with a copy of `table`.
    pub fn with_table(table: PriceTable) -> Self {
        Self {
            table: Some(table),
            ..Self::new(StaticPriceBoard::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_symbols(&self) -> Vec<String> {
        self.last_symbols.lock().clone()
    }
}

#[async_trait]
impl PriceBoardClient for CountingClient {
    fn source(&self) -> &str {
        "counting"
    }

    async fn price_board(&self, symbols: &[String]) -> PriceBoardResult<PriceTable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_symbols.lock() = symbols.to_vec();

        match (&self.failure, &self.table) {
            (Some(err), _) => Err(err.clone()),
            (None, Some(table)) => Ok(table.clone()),
            (None, None) => self.board.price_board(symbols).await,
        }
    }
}
