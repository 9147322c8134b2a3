//! Resilient writer behavior against a scripted transport stub.

use std::sync::Mutex;

use serde_json::{Value, json};

use client::{
    ApiClient, CategoryDraft, ClientError, PersonDraft, TransactionDraft, Transport,
    TransportError, Verb, WireResponse,
};
use engine::{CategoryPurpose, TransactionKind};

#[derive(Clone, Debug)]
struct Recorded {
    verb: Verb,
    path: String,
    body: Option<Value>,
}

/// Feeds scripted responses in order and records every request.
struct StubTransport {
    responses: Mutex<Vec<Result<WireResponse, TransportError>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl StubTransport {
    fn new(responses: Vec<Result<WireResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for StubTransport {
    async fn send(
        &self,
        verb: Verb,
        path: &str,
        body: Option<&Value>,
    ) -> Result<WireResponse, TransportError> {
        self.requests.lock().unwrap().push(Recorded {
            verb,
            path: path.to_string(),
            body: body.cloned(),
        });
        self.responses.lock().unwrap().remove(0)
    }
}

fn ok(status: u16, body: Value) -> Result<WireResponse, TransportError> {
    Ok(WireResponse { status, body })
}

fn unreachable() -> Result<WireResponse, TransportError> {
    Err(TransportError {
        reason: "connection refused".to_string(),
    })
}

fn person_draft() -> PersonDraft {
    PersonDraft {
        name: "Ana".to_string(),
        age: 16,
    }
}

fn transaction_draft() -> TransactionDraft {
    TransactionDraft {
        description: "mesada".to_string(),
        amount: 50.0,
        kind: TransactionKind::Income,
        category_id: 10,
        person_id: 2,
    }
}

#[tokio::test]
async fn schema_rejection_falls_back_to_the_capitalized_encoding() {
    let stub = StubTransport::new(vec![
        ok(400, json!({ "message": "field casing mismatch" })),
        ok(201, json!({ "Id": 7, "Nome": "Ana", "Idade": 16 })),
    ]);
    let api = ApiClient::new(stub);

    let person = api.create_person(&person_draft()).await.unwrap();
    assert_eq!(person.id, 7);
    assert_eq!(person.name, "Ana");
    assert_eq!(person.age, 16);

    let requests = api.transport().requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(request.verb, Verb::Post);
        assert_eq!(request.path, "/pessoas");
    }
    let first = requests[0].body.as_ref().unwrap();
    let second = requests[1].body.as_ref().unwrap();
    assert!(first.get("nome").is_some());
    assert!(second.get("Nome").is_some());
}

#[tokio::test]
async fn a_second_rejection_surfaces_the_second_error() {
    let stub = StubTransport::new(vec![
        ok(400, json!({ "message": "first" })),
        ok(400, json!({ "message": "second" })),
    ]);
    let api = ApiClient::new(stub);

    let err = api.create_person(&person_draft()).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "second");
        }
        other => panic!("expected an api error, got {other:?}"),
    }
    assert_eq!(api.transport().requests().len(), 2);
}

#[tokio::test]
async fn non_schema_failures_are_not_retried() {
    let stub = StubTransport::new(vec![ok(500, json!({ "message": "boom" }))]);
    let api = ApiClient::new(stub);

    let err = api.create_person(&person_draft()).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected an api error, got {other:?}"),
    }
    assert_eq!(api.transport().requests().len(), 1);
}

#[tokio::test]
async fn category_writes_have_no_fallback() {
    let stub = StubTransport::new(vec![ok(400, json!({ "title": "bad category" }))]);
    let api = ApiClient::new(stub);

    let draft = CategoryDraft {
        description: "Mesada".to_string(),
        purpose: CategoryPurpose::Income,
    };
    let err = api.create_category(&draft).await.unwrap_err();
    assert_eq!(err.to_string(), "bad category");

    let requests = api.transport().requests();
    assert_eq!(requests.len(), 1);
    let body = requests[0].body.as_ref().unwrap();
    assert!(body.get("descricao").is_some());
    assert!(body.get("finalidade").is_some());
}

#[tokio::test]
async fn transaction_fallback_returns_the_second_responses_entity() {
    let stub = StubTransport::new(vec![
        ok(400, json!({ "title": "schema" })),
        ok(
            201,
            json!({
                "Id": 31,
                "Descricao": "mesada",
                "Valor": 50.0,
                "Tipo": 1,
                "CategoriaId": 10,
                "PessoaId": 2,
            }),
        ),
    ]);
    let api = ApiClient::new(stub);

    let transaction = api.create_transaction(&transaction_draft()).await.unwrap();
    assert_eq!(transaction.id, 31);
    assert_eq!(transaction.kind, TransactionKind::Income);
    assert_eq!(transaction.amount, 50.0);

    let second = api.transport().requests()[1].body.clone().unwrap();
    assert!(second.get("Descricao").is_some());
    assert!(second.get("Valor").is_some());
    assert!(second.get("CategoriaId").is_some());
}

#[tokio::test]
async fn person_updates_fall_back_over_put() {
    let stub = StubTransport::new(vec![
        ok(400, json!({ "message": "casing" })),
        ok(204, Value::Null),
    ]);
    let api = ApiClient::new(stub);

    api.update_person(3, &person_draft()).await.unwrap();

    let requests = api.transport().requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(request.verb, Verb::Put);
        assert_eq!(request.path, "/pessoas/3");
    }
}

#[tokio::test]
async fn network_failures_surface_the_fixed_message_without_retrying() {
    let stub = StubTransport::new(vec![unreachable()]);
    let api = ApiClient::new(stub);

    let err = api.create_transaction(&transaction_draft()).await.unwrap_err();
    assert!(matches!(err, ClientError::Unreachable(_)));
    assert_eq!(err.to_string(), "could not reach the expense API");
    assert_eq!(api.transport().requests().len(), 1);
}

#[tokio::test]
async fn list_responses_decode_wrapped_or_bare() {
    let stub = StubTransport::new(vec![
        ok(
            200,
            json!({ "itens": [{ "id": 1, "nome": "Ana", "idade": 16 }] }),
        ),
        ok(200, json!([{ "Id": 2, "Nome": "Bruno", "Idade": 34 }])),
        ok(200, json!({ "foo": 1 })),
    ]);
    let api = ApiClient::new(stub);

    let wrapped = api.people().await.unwrap();
    assert_eq!(wrapped.len(), 1);
    assert_eq!(wrapped[0].name, "Ana");

    let bare = api.people().await.unwrap();
    assert_eq!(bare.len(), 1);
    assert_eq!(bare[0].name, "Bruno");

    let unrelated = api.people().await.unwrap();
    assert!(unrelated.is_empty());
}
