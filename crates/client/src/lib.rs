use serde_json::Value;

pub use categories::CategoryDraft;
pub use error::ClientError;
pub use people::PersonDraft;
pub use reports::{GrandTotals, TotalsReport, TotalsRow};
pub use transactions::TransactionDraft;
pub use transport::{HttpTransport, Transport, TransportError, Verb, WireResponse};
pub use wire::{FieldCase, FieldName, FromWire, decode_list};
pub use writer::{WirePayload, WriteOp};

mod categories;
mod error;
mod people;
mod reports;
mod transactions;
mod transport;
mod wire;
mod writer;

/// Typed client for the expense-control API.
///
/// Stateless between calls: every method reads only the transport and its
/// arguments, so a caller that overlaps requests can race its own view of
/// the data but cannot corrupt the client.
#[derive(Clone, Debug)]
pub struct ApiClient<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// One transport exchange, mapped to the client error taxonomy.
    async fn request(
        &self,
        verb: Verb,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let response = self
            .transport
            .send(verb, path, body)
            .await
            .map_err(ClientError::Unreachable)?;
        if response.is_success() {
            Ok(response.body)
        } else {
            Err(ClientError::from_rejection(response.status, &response.body))
        }
    }

    pub(crate) async fn get<E: FromWire>(&self, path: &str) -> Result<E, ClientError> {
        let body = self.request(Verb::Get, path, None).await?;
        Ok(E::from_wire(&body))
    }

    pub(crate) async fn get_list<E: FromWire>(&self, path: &str) -> Result<Vec<E>, ClientError> {
        let body = self.request(Verb::Get, path, None).await?;
        Ok(decode_list(&body))
    }

    pub(crate) async fn get_raw(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Verb::Get, path, None).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.request(Verb::Delete, path, None).await.map(|_| ())
    }
}
