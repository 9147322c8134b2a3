//! `/transacoes` resource.

use engine::{Admitted, Transaction, TransactionKind};
use serde_json::Value;

use crate::{
    ApiClient,
    error::ClientError,
    transport::Transport,
    wire::{FieldCase, FieldName, FromWire, WireObject},
    writer::{WirePayload, WriteOp},
};

const ID: FieldName = FieldName::new("id", "Id");
const DESCRIPTION: FieldName = FieldName::new("descricao", "Descricao");
const AMOUNT: FieldName = FieldName::new("valor", "Valor");
const KIND: FieldName = FieldName::new("tipo", "Tipo");
const CATEGORY_ID: FieldName = FieldName::new("categoriaId", "CategoriaId");
const PERSON_ID: FieldName = FieldName::new("pessoaId", "PessoaId");

const TRANSACTIONS: &str = "/transacoes";

impl FromWire for Transaction {
    fn from_wire(raw: &Value) -> Self {
        Transaction {
            id: ID.int(raw),
            description: DESCRIPTION.text(raw),
            amount: AMOUNT.number(raw),
            kind: TransactionKind::from_number(KIND.int(raw)),
            category_id: CATEGORY_ID.int(raw),
            person_id: PERSON_ID.int(raw),
        }
    }
}

/// Fields of a transaction create request.
///
/// Built from an [`Admitted`] candidate; the admission rules guarantee the
/// description is trimmed and the amount positive before this exists.
#[derive(Clone, Debug)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category_id: i64,
    pub person_id: i64,
}

impl From<Admitted> for TransactionDraft {
    fn from(admitted: Admitted) -> Self {
        Self {
            description: admitted.description,
            amount: admitted.amount,
            kind: admitted.kind,
            category_id: admitted.category_id,
            person_id: admitted.person_id,
        }
    }
}

impl WirePayload for TransactionDraft {
    const ENCODINGS: &'static [FieldCase] = &[FieldCase::LowerCamel, FieldCase::Pascal];

    fn encode(&self, case: FieldCase) -> Value {
        let mut body = WireObject::new(case);
        body.set(&DESCRIPTION, self.description.trim());
        body.set(&AMOUNT, self.amount);
        body.set(&KIND, self.kind.as_number());
        body.set(&CATEGORY_ID, self.category_id);
        body.set(&PERSON_ID, self.person_id);
        body.into_value()
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn transactions(&self) -> Result<Vec<Transaction>, ClientError> {
        self.get_list(TRANSACTIONS).await
    }

    pub async fn create_transaction(
        &self,
        draft: &TransactionDraft,
    ) -> Result<Transaction, ClientError> {
        self.write(WriteOp::Create, TRANSACTIONS, draft).await
    }
}
