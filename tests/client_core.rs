// HTTP contract of the notes client, against a mockito server.
use mockito::{Matcher, Server};
use notepad::actions::NoteActions;
use notepad::client::{NotesApi, NotesClient};
use notepad::error::{ActionError, ErrorPage};
use notepad::model::{NoteFields, NoteId, NotePatch};
use notepad::navigation::{History, Route};
use notepad::store::NoteStore;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const NOTE: &str = r#"{"id": 1, "title": "T", "content": "C", "liked": false, "deleted": false}"#;

fn client(server: &Server) -> NotesClient {
    NotesClient::new(&server.url(), "notepad-tests").unwrap()
}

#[tokio::test]
async fn test_list_notes_sends_json_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/notes/")
        .match_header("content-type", "application/json")
        .match_header("accept", "application/json")
        .match_header("user-agent", "notepad-tests")
        .with_status(200)
        .with_body(format!("[{}]", NOTE))
        .create_async()
        .await;

    let notes = client(&server).list_notes().await.unwrap();

    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, NoteId::Num(1));
    assert_eq!(notes[0].title, "T");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_posts_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/notes/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"title": "T", "content": "C"})))
        .with_status(201)
        .with_body(NOTE)
        .create_async()
        .await;

    let note = client(&server)
        .create_note(&NoteFields::new("T", "C"))
        .await
        .unwrap();

    assert_eq!(note.content, "C");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_patch_sends_only_set_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/notes/1")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"liked": true})))
        .with_status(200)
        .with_body(NOTE)
        .create_async()
        .await;

    client(&server)
        .patch_note(&NoteId::Num(1), &NotePatch::liked(true))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_clear_trash_deletes_trash_collection() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/notes/trash")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body(r#"{"deleted": 4}"#)
        .create_async()
        .await;

    let body = client(&server).clear_trash().await.unwrap();

    assert_eq!(body, json!({"deleted": 4}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_maps_to_status_text() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/notes/42")
        .with_status(404)
        .create_async()
        .await;

    let err = client(&server)
        .delete_note(&NoteId::Num(42))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ActionError::Status {
            status: 404,
            reason: "Not Found".into()
        }
    );
    assert_eq!(err.to_string(), "Not Found");
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/notes/trash")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let err = client(&server).list_trash().await.unwrap_err();
    assert!(matches!(err, ActionError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = NotesClient::new("http://127.0.0.1:1", "notepad-tests").unwrap();

    let err = client.list_notes().await.unwrap_err();
    assert!(matches!(err, ActionError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn test_trailing_slash_in_base_url_is_ignored() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/notes/")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = NotesClient::new(&format!("{}/", server.url()), "ua").unwrap();
    assert!(client.list_notes().await.unwrap().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_soft_delete_flow_against_server() {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", "/notes/")
        .with_status(200)
        .with_body(format!("[{}]", NOTE))
        .create_async()
        .await;
    let patch = server
        .mock("PATCH", "/notes/1")
        .match_body(Matcher::Json(json!({"deleted": true})))
        .with_status(200)
        .with_body(r#"{"id": 1, "title": "T", "content": "C", "deleted": true}"#)
        .create_async()
        .await;

    let store = Arc::new(NoteStore::new());
    let history = Arc::new(History::default());
    let reporter = Arc::new(ErrorPage::new(history.clone()));
    let actions = NoteActions::new(
        Arc::new(client(&server)),
        store.clone(),
        history.clone(),
        reporter,
    )
    .with_follow_up_delay(Duration::from_millis(50));

    actions.fetch_notes().await.unwrap();
    assert_eq!(store.snapshot().notes.len(), 1);

    actions.delete_note(NoteId::Num(1)).await.unwrap();
    patch.assert_async().await;

    let state = store.snapshot();
    assert!(state.notes.is_empty());
    assert_eq!(state.trash.len(), 1);
    assert_eq!(state.deleted_note.as_ref().map(|n| n.title.as_str()), Some("T"));
    assert!(!state.loading);
    assert_eq!(history.current(), Route::Deleted(NoteId::Num(1)));

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(history.current(), Route::Trash);
}

#[tokio::test]
async fn test_server_error_lands_on_error_page() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("PATCH", "/notes/5")
        .with_status(500)
        .create_async()
        .await;

    let store = Arc::new(NoteStore::new());
    let history = Arc::new(History::default());
    let reporter = Arc::new(ErrorPage::new(history.clone()));
    let actions = NoteActions::new(
        Arc::new(client(&server)),
        store.clone(),
        history.clone(),
        reporter.clone(),
    );

    let result = actions.restore_note(NoteId::Num(5)).await;

    assert!(result.is_err());
    assert_eq!(history.entries(), vec![Route::Root, Route::Root, Route::Error]);
    assert_eq!(
        reporter.last_error().as_deref(),
        Some("Internal Server Error")
    );
    assert!(store.snapshot().loading);
}

#[tokio::test]
async fn test_server_reason_phrase_is_kept() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(b"HTTP/1.1 423 Note Is Being Edited\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
            .await
            .unwrap();
    });

    let client = NotesClient::new(&format!("http://{}", addr), "ua").unwrap();
    let err = client
        .patch_note(&NoteId::Num(1), &NotePatch::liked(true))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ActionError::Status {
            status: 423,
            reason: "Note Is Being Edited".into()
        }
    );
}

#[tokio::test]
async fn test_text_ids_are_sent_as_one_segment() {
    let mut server = Server::new_async().await;
    let trash = server
        .mock("DELETE", "/notes/trash")
        .expect(0)
        .create_async()
        .await;
    let encoded = server
        .mock("DELETE", "/notes/a%2Fb")
        .with_status(200)
        .with_body(r#"{"id": "a/b"}"#)
        .create_async()
        .await;

    let client = client(&server);
    let err = client.delete_note(&NoteId::from("trash")).await.unwrap_err();
    assert!(matches!(err, ActionError::InvalidUrl(_)), "got {err:?}");

    let body = client.delete_note(&NoteId::from("a/b")).await.unwrap();
    assert_eq!(body, json!({"id": "a/b"}));

    trash.assert_async().await;
    encoded.assert_async().await;
}
