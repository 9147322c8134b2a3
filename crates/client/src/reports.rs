//! `/relatorios` read-only aggregates.
//!
//! Row fields are dual-cased like everything else; the `pessoas`,
//! `categorias` and `totaisGerais` section keys are consulted camel-case
//! only, which is the only shape the store emits them in.

use serde_json::Value;

use crate::{ApiClient, error::ClientError, transport::Transport, wire::FieldName};

const PERSON_ID: FieldName = FieldName::new("pessoaId", "PessoaId");
const CATEGORY_ID: FieldName = FieldName::new("categoriaId", "CategoriaId");
const NAME: FieldName = FieldName::new("nome", "Nome");
const DESCRIPTION: FieldName = FieldName::new("descricao", "Descricao");
const TOTAL_INCOME: FieldName = FieldName::new("totalReceitas", "TotalReceitas");
const TOTAL_EXPENSE: FieldName = FieldName::new("totalDespesas", "TotalDespesas");
const BALANCE: FieldName = FieldName::new("saldo", "Saldo");
const NET_BALANCE: FieldName = FieldName::new("saldoLiquido", "SaldoLiquido");

const BY_PERSON: &str = "/relatorios/totais-por-pessoa";
const BY_CATEGORY: &str = "/relatorios/totais-por-categoria";

/// One aggregate line: a person or category with its totals.
#[derive(Clone, Debug, PartialEq)]
pub struct TotalsRow {
    pub entity_id: i64,
    pub label: String,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GrandTotals {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TotalsReport {
    pub rows: Vec<TotalsRow>,
    pub totals: GrandTotals,
}

fn decode_rows(raw: &Value, section: &str, id: &FieldName, label: &FieldName) -> Vec<TotalsRow> {
    raw.get(section)
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .map(|row| TotalsRow {
                    entity_id: id.int(row),
                    label: label.text(row),
                    total_income: TOTAL_INCOME.number(row),
                    total_expense: TOTAL_EXPENSE.number(row),
                    balance: BALANCE.number(row),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn decode_totals(raw: &Value) -> GrandTotals {
    let section = raw.get("totaisGerais").unwrap_or(&Value::Null);
    GrandTotals {
        total_income: TOTAL_INCOME.number(section),
        total_expense: TOTAL_EXPENSE.number(section),
        net_balance: NET_BALANCE.number(section),
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn totals_by_person(&self) -> Result<TotalsReport, ClientError> {
        let body = self.get_raw(BY_PERSON).await?;
        Ok(TotalsReport {
            rows: decode_rows(&body, "pessoas", &PERSON_ID, &NAME),
            totals: decode_totals(&body),
        })
    }

    pub async fn totals_by_category(&self) -> Result<TotalsReport, ClientError> {
        let body = self.get_raw(BY_CATEGORY).await?;
        Ok(TotalsReport {
            rows: decode_rows(&body, "categorias", &CATEGORY_ID, &DESCRIPTION),
            totals: decode_totals(&body),
        })
    }
}
