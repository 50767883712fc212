//! `/works` route table
//!
//! ```text
//! GET    /works        list
//! POST   /works        create
//! GET    /works/{id}   get
//! PUT    /works/{id}   update
//! DELETE /works/{id}   delete
//! ```

use crate::error::json_error;
use crate::handlers;
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};
use works_repository::{NewWork, WorkPatch, WorkRepository};
use works_store::RecordStore;

/// Largest accepted request body
pub const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Full service: routes, rejection handling and request tracing
pub fn routes<S>(
    repo: WorkRepository<S>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone
where
    S: RecordStore + Clone + 'static,
{
    api(repo)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

/// Route table without rejection recovery
pub fn api<S>(
    repo: WorkRepository<S>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone
where
    S: RecordStore + Clone + 'static,
{
    let list = warp::path("works")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_repo(repo.clone()))
        .and_then(handlers::list_works::<S>);

    let create = warp::path("works")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<NewWork>())
        .and(with_repo(repo.clone()))
        .and_then(handlers::create_work::<S>);

    let get = warp::path!("works" / u64)
        .and(warp::get())
        .and(with_repo(repo.clone()))
        .and_then(handlers::get_work::<S>);

    let update = warp::path!("works" / u64)
        .and(warp::put())
        .and(json_body::<WorkPatch>())
        .and(with_repo(repo.clone()))
        .and_then(handlers::update_work::<S>);

    let delete = warp::path!("works" / u64)
        .and(warp::delete())
        .and(with_repo(repo))
        .and_then(handlers::delete_work::<S>);

    list.or(create).or(get).or(update).or(delete)
}

fn with_repo<S>(
    repo: WorkRepository<S>,
) -> impl Filter<Extract = (WorkRepository<S>,), Error = Infallible> + Clone
where
    S: RecordStore + Clone + 'static,
{
    warp::any().map(move || repo.clone())
}

fn json_body<T>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
where
    T: DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found")
    } else if err.find::<BodyDeserializeError>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid request body")
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required")
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported media type")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        tracing::error!(rejection = ?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };

    Ok(json_error(status, message))
}
