use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use super::Result;

/// Opens a live connection. Implementations check liveness before returning.
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: Send + Sync;

    async fn connect(&self) -> Result<Self::Connection>;
}

/// A connection opened on first use and shared afterwards.
///
/// A failed attempt leaves the cell empty so the next call tries again.
pub struct LazyConnection<C: Connector> {
    connector: C,
    cell: OnceCell<Arc<C::Connection>>,
}

impl<C: Connector> LazyConnection<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            cell: OnceCell::new(),
        }
    }

    pub async fn get(&self) -> Result<Arc<C::Connection>> {
        self.cell
            .get_or_try_init(|| async {
                log::debug!("Opening database connection");
                self.connector.connect().await.map(Arc::new)
            })
            .await
            .map(Arc::clone)
    }

    pub fn is_connected(&self) -> bool {
        self.cell.initialized()
    }
}
