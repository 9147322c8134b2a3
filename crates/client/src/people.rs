//! `/pessoas` resource.

use engine::Person;
use serde_json::Value;

use crate::{
    ApiClient,
    error::ClientError,
    transport::Transport,
    wire::{FieldCase, FieldName, FromWire, WireObject},
    writer::{WirePayload, WriteOp},
};

const ID: FieldName = FieldName::new("id", "Id");
const NAME: FieldName = FieldName::new("nome", "Nome");
const AGE: FieldName = FieldName::new("idade", "Idade");

const PEOPLE: &str = "/pessoas";

impl FromWire for Person {
    fn from_wire(raw: &Value) -> Self {
        Person {
            id: ID.int(raw),
            name: NAME.text(raw),
            age: AGE.unsigned(raw),
        }
    }
}

/// Fields of a person create/update request.
#[derive(Clone, Debug)]
pub struct PersonDraft {
    pub name: String,
    pub age: u32,
}

impl WirePayload for PersonDraft {
    const ENCODINGS: &'static [FieldCase] = &[FieldCase::LowerCamel, FieldCase::Pascal];

    fn encode(&self, case: FieldCase) -> Value {
        let mut body = WireObject::new(case);
        body.set(&NAME, self.name.trim());
        body.set(&AGE, self.age);
        body.into_value()
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn people(&self) -> Result<Vec<Person>, ClientError> {
        self.get_list(PEOPLE).await
    }

    pub async fn person(&self, id: i64) -> Result<Person, ClientError> {
        self.get(&format!("{PEOPLE}/{id}")).await
    }

    pub async fn create_person(&self, draft: &PersonDraft) -> Result<Person, ClientError> {
        self.write(WriteOp::Create, PEOPLE, draft).await
    }

    /// The store answers person updates with an empty body, so there is no
    /// entity to return.
    pub async fn update_person(&self, id: i64, draft: &PersonDraft) -> Result<(), ClientError> {
        self.write_unit(WriteOp::Update, &format!("{PEOPLE}/{id}"), draft)
            .await
    }

    pub async fn delete_person(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("{PEOPLE}/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn encoding_then_decoding_either_casing_round_trips() {
        let draft = PersonDraft {
            name: " Ana ".to_string(),
            age: 16,
        };

        let camel = draft.encode(FieldCase::LowerCamel);
        assert_eq!(camel, json!({ "nome": "Ana", "idade": 16 }));

        let pascal = draft.encode(FieldCase::Pascal);
        assert_eq!(pascal, json!({ "Nome": "Ana", "Idade": 16 }));

        for body in [camel, pascal] {
            let person = Person::from_wire(&body);
            assert_eq!(person.name, "Ana");
            assert_eq!(person.age, 16);
        }
    }

    #[test]
    fn missing_fields_decode_to_defaults() {
        let person = Person::from_wire(&json!({ "Nome": "Bruno" }));
        assert_eq!(person.id, 0);
        assert_eq!(person.name, "Bruno");
        assert_eq!(person.age, 0);
    }
}
