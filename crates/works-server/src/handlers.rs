//! Request handlers
//!
//! Each handler is one repository call rendered as JSON. Errors never
//! escape as rejections; they are answered here.

use crate::error::{error_reply, Operation};
use serde_json::json;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;
use works_repository::{NewWork, WorkPatch, WorkRepository};
use works_store::{RecordStore, WorkId};

fn json_reply<T: serde::Serialize>(value: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(value), status).into_response()
}

pub(crate) async fn list_works<S: RecordStore>(
    repo: WorkRepository<S>,
) -> Result<Response, Infallible> {
    Ok(match repo.list().await {
        Ok(works) => json_reply(&works, StatusCode::OK),
        Err(e) => error_reply(&e, Operation::Load),
    })
}

pub(crate) async fn get_work<S: RecordStore>(
    id: u64,
    repo: WorkRepository<S>,
) -> Result<Response, Infallible> {
    Ok(match repo.get(WorkId(id)).await {
        Ok(work) => json_reply(&work, StatusCode::OK),
        Err(e) => error_reply(&e, Operation::Load),
    })
}

pub(crate) async fn create_work<S: RecordStore>(
    input: NewWork,
    repo: WorkRepository<S>,
) -> Result<Response, Infallible> {
    Ok(match repo.create(input).await {
        Ok(work) => json_reply(&work, StatusCode::CREATED),
        Err(e) => error_reply(&e, Operation::Create),
    })
}

pub(crate) async fn update_work<S: RecordStore>(
    id: u64,
    patch: WorkPatch,
    repo: WorkRepository<S>,
) -> Result<Response, Infallible> {
    Ok(match repo.update(WorkId(id), patch).await {
        Ok(work) => json_reply(&work, StatusCode::OK),
        Err(e) => error_reply(&e, Operation::Update),
    })
}

pub(crate) async fn delete_work<S: RecordStore>(
    id: u64,
    repo: WorkRepository<S>,
) -> Result<Response, Infallible> {
    Ok(match repo.delete(WorkId(id)).await {
        Ok(()) => json_reply(&json!({ "success": true }), StatusCode::OK),
        Err(e) => error_reply(&e, Operation::Delete),
    })
}
