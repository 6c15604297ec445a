//! Full lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the synchronizer
//! through load / create / toggle / inline edit / delete over real HTTP,
//! with ureq playing the host transport role. Validates that request
//! building, response parsing, and state reconciliation work end-to-end
//! against the actual server.

use todo_sync::{
    Applied, HttpMethod, HttpRequest, HttpResponse, StartError, Synchronizer, TodoClient,
    TransportError,
};

/// Execute an `HttpRequest` using ureq, mapping transport-level failures to
/// `TransportError` and returning any HTTP status as data.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the
/// synchronizer handle status interpretation.
fn execute(req: HttpRequest) -> Result<HttpResponse, TransportError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    }
    .map_err(|e| TransportError(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

/// Start one operation, run it over the wire, and reconcile.
fn run_op(
    sync: &mut Synchronizer,
    start: impl FnOnce(&mut Synchronizer) -> (todo_sync::PendingOp, HttpRequest),
) -> Applied {
    let (pending, request) = start(sync);
    let result = execute(request);
    sync.complete(pending, result).unwrap()
}

#[test]
fn synchronizer_lifecycle() {
    // Step 1: start mock server on a random port.
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    let client = TodoClient::new(&format!("http://{addr}/api/todos"));
    let mut sync = Synchronizer::new(client);

    // Step 2: initial load — empty collection.
    let applied = run_op(&mut sync, |s| s.start_load().unwrap());
    assert_eq!(applied, Applied::Loaded { count: 0 });
    assert!(sync.state().items().is_empty());

    // Step 3: create from the draft; server assigns the id.
    sync.set_draft("  Integration test ");
    let (pending, request) = sync.start_create().unwrap().expect("non-empty draft");
    let applied = sync.complete(pending, execute(request)).unwrap();
    let id = match applied {
        Applied::Created(todo) => {
            assert_eq!(todo.text, "Integration test");
            assert!(!todo.completed);
            todo.id
        }
        other => panic!("expected Created, got {other:?}"),
    };
    assert_eq!(sync.state().draft_text(), "");
    assert_eq!(sync.state().items().len(), 1);
    assert_eq!(sync.state().items()[0].id, id);

    // Step 4: a fresh load returns the same single item.
    let applied = run_op(&mut sync, |s| s.start_load().unwrap());
    assert_eq!(applied, Applied::Loaded { count: 1 });

    // Step 5: toggle — server reply replaces the local item.
    run_op(&mut sync, |s| s.start_toggle(&id).unwrap());
    assert!(sync.state().items()[0].completed);

    // Step 6: toggle back.
    run_op(&mut sync, |s| s.start_toggle(&id).unwrap());
    assert!(!sync.state().items()[0].completed);

    // Step 7: inline edit.
    sync.begin_edit(&id).unwrap();
    assert_eq!(sync.state().edit_buffer(), "Integration test");
    sync.set_edit_buffer("Edited over the wire");
    run_op(&mut sync, |s| s.start_commit_edit(&id).unwrap());
    assert_eq!(sync.state().items()[0].text, "Edited over the wire");
    assert!(sync.state().editing_id().is_none());

    // Step 8: delete.
    let applied = run_op(&mut sync, |s| s.start_delete(&id).unwrap());
    assert_eq!(applied, Applied::Deleted { id: id.clone() });
    assert!(sync.state().items().is_empty());

    // Step 9: the item is gone locally, so a second delete is refused
    // before any request is built.
    assert!(matches!(sync.start_delete(&id), Err(StartError::UnknownItem)));

    // Step 10: final load — empty again.
    let applied = run_op(&mut sync, |s| s.start_load().unwrap());
    assert_eq!(applied, Applied::Loaded { count: 0 });
}
