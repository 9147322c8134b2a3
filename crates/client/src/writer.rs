//! The resilient write protocol.
//!
//! Writes are encoded under a primary casing scheme and, when the store
//! rejects the schema (HTTP 400 exactly), re-encoded and resubmitted with
//! the next scheme in the DTO's list. The list bounds the retries: with the
//! usual two entries this is exactly one fallback, strictly sequenced after
//! the rejection that triggered it.

use serde_json::Value;
use tracing::debug;

use crate::{
    ApiClient,
    error::ClientError,
    transport::{Transport, Verb},
    wire::{FieldCase, FromWire},
};

/// Status the store answers with when the payload's field casing does not
/// match its expected contract.
const SCHEMA_REJECTED: u16 = 400;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Update,
}

impl WriteOp {
    fn verb(self) -> Verb {
        match self {
            Self::Create => Verb::Post,
            Self::Update => Verb::Put,
        }
    }
}

/// A write DTO together with its encoding strategy list.
pub trait WirePayload {
    /// Casing schemes to try, in order. Never empty; a single entry means
    /// the resource has no fallback contract.
    const ENCODINGS: &'static [FieldCase];

    fn encode(&self, case: FieldCase) -> Value;
}

impl<T: Transport> ApiClient<T> {
    /// Submits a write and decodes the accepted body into an entity.
    pub(crate) async fn write<D: WirePayload, E: FromWire>(
        &self,
        op: WriteOp,
        path: &str,
        dto: &D,
    ) -> Result<E, ClientError> {
        let body = self.submit(op, path, dto).await?;
        Ok(E::from_wire(&body))
    }

    /// Submits a write whose accepted response carries no body worth
    /// decoding.
    pub(crate) async fn write_unit<D: WirePayload>(
        &self,
        op: WriteOp,
        path: &str,
        dto: &D,
    ) -> Result<(), ClientError> {
        self.submit(op, path, dto).await.map(|_| ())
    }

    async fn submit<D: WirePayload>(
        &self,
        op: WriteOp,
        path: &str,
        dto: &D,
    ) -> Result<Value, ClientError> {
        let last = D::ENCODINGS.len().saturating_sub(1);
        for (index, case) in D::ENCODINGS.iter().enumerate() {
            let payload = dto.encode(*case);
            let response = self
                .transport
                .send(op.verb(), path, Some(&payload))
                .await
                .map_err(ClientError::Unreachable)?;

            if response.is_success() {
                return Ok(response.body);
            }
            if response.status == SCHEMA_REJECTED && index < last {
                debug!(path, ?case, "schema rejection, resubmitting with the next casing");
                continue;
            }
            return Err(ClientError::from_rejection(response.status, &response.body));
        }
        unreachable!("encoding strategy list is never empty")
    }
}
