//! `WorksClient` against a live works server

use pretty_assertions::assert_eq;
use std::net::SocketAddr;
use works_catalog::{CatalogView, ClientError, SourceError, WorksClient};
use works_repository::{NewWork, WorkPatch};
use works_store::WorkId;
use works_test_utils::{new_work, sample_works, TempStore};

/// Serve `temp` on an ephemeral port for the rest of the test
fn spawn_server(temp: &TempStore) -> SocketAddr {
    let (addr, server) =
        warp::serve(works_server::routes(temp.repository())).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

fn client(addr: SocketAddr) -> WorksClient {
    WorksClient::new(format!("http://{addr}/"))
}

#[tokio::test]
async fn crud_cycle_over_http() {
    let temp = TempStore::new();
    let client = client(spawn_server(&temp));

    assert!(client.list().await.unwrap().is_empty());

    let created = client.create(&new_work("Launch Film")).await.unwrap();
    assert_eq!(created.id, WorkId(1));

    let updated = client
        .update(created.id, &WorkPatch::new().status("Completed").awards(None))
        .await
        .unwrap();
    assert_eq!(updated.status, "Completed");
    assert_eq!(updated.title, "Launch Film");

    assert_eq!(client.get(created.id).await.unwrap(), updated);

    client.delete(created.id).await.unwrap();
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn api_errors_carry_server_message() {
    let temp = TempStore::with_works(&sample_works());
    let client = client(spawn_server(&temp));

    let err = client.get(WorkId(404)).await.unwrap_err();
    assert!(matches!(
        &err,
        ClientError::Api { status: 404, message } if message == "Work not found"
    ));
    assert_eq!(err.status(), Some(404));

    let err = client
        .create(&NewWork {
            title: Some("No client".into()),
            ..NewWork::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Api { status: 400, ref message } if message == "Missing field: client"
    ));
}

#[tokio::test]
async fn view_refreshes_from_client() {
    let temp = TempStore::with_works(&sample_works());
    let client = client(spawn_server(&temp));

    let mut view = CatalogView::new();
    view.refresh(&client).await.unwrap();
    view.set_category("Animation");

    assert_eq!(view.summary().to_string(), "Showing 2 of 5 projects");

    client.delete(WorkId(2)).await.unwrap();
    view.refresh(&client).await.unwrap();

    assert_eq!(view.summary().to_string(), "Showing 1 of 4 projects");
    assert_eq!(view.visible()[0].client, "Spotify");
}

#[tokio::test]
async fn unreachable_server_falls_back_to_empty() {
    let mut view = CatalogView::from_snapshot(sample_works());

    // Nothing listens on the discard port.
    let client = WorksClient::new("http://127.0.0.1:9");
    let err = view.refresh(&client).await.unwrap_err();

    assert!(matches!(err, SourceError::Client(ClientError::Http(_))));
    assert!(view.all().is_empty());
    assert_eq!(view.summary().to_string(), "Showing 0 of 0 projects");
}
