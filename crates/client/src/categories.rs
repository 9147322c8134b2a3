//! `/categorias` resource.

use engine::{Category, CategoryPurpose};
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
const PURPOSE: FieldName = FieldName::new("finalidade", "Finalidade");

const CATEGORIES: &str = "/categorias";

impl FromWire for Category {
    fn from_wire(raw: &Value) -> Self {
        Category {
            id: ID.int(raw),
            description: DESCRIPTION.text(raw),
            purpose: CategoryPurpose::from_number(PURPOSE.int(raw)),
        }
    }
}

/// Fields of a category create/update request.
#[derive(Clone, Debug)]
pub struct CategoryDraft {
    pub description: String,
    pub purpose: CategoryPurpose,
}

impl WirePayload for CategoryDraft {
    /// No fallback casing: the upstream contract defines none for category
    /// writes. The asymmetry with people/transactions is deliberate.
    const ENCODINGS: &'static [FieldCase] = &[FieldCase::LowerCamel];

    fn encode(&self, case: FieldCase) -> Value {
        let mut body = WireObject::new(case);
        body.set(&DESCRIPTION, self.description.trim());
        body.set(&PURPOSE, self.purpose.as_number());
        body.into_value()
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        self.get_list(CATEGORIES).await
    }

    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ClientError> {
        self.write(WriteOp::Create, CATEGORIES, draft).await
    }

    pub async fn update_category(
        &self,
        id: i64,
        draft: &CategoryDraft,
    ) -> Result<Category, ClientError> {
        self.write(WriteOp::Update, &format!("{CATEGORIES}/{id}"), draft)
            .await
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("{CATEGORIES}/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn drafts_encode_the_numeric_purpose() {
        let draft = CategoryDraft {
            description: "Mesada".to_string(),
            purpose: CategoryPurpose::Income,
        };
        assert_eq!(
            draft.encode(FieldCase::LowerCamel),
            json!({ "descricao": "Mesada", "finalidade": 1 })
        );
    }

    #[test]
    fn out_of_range_purpose_decodes_to_the_zero_variant() {
        let category = Category::from_wire(&json!({ "Id": 4, "Descricao": "??", "Finalidade": 9 }));
        assert_eq!(category.purpose, CategoryPurpose::Expense);
    }

    #[test]
    fn either_casing_decodes_to_the_same_category() {
        let camel = Category::from_wire(&json!({
            "id": 2, "descricao": "Mercado", "finalidade": 0
        }));
        let pascal = Category::from_wire(&json!({
            "Id": 2, "Descricao": "Mercado", "Finalidade": 0
        }));
        assert_eq!(camel, pascal);
    }
}
