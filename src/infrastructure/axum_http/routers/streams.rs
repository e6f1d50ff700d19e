use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    auth::AuthUser,
    domain::{
        repositories::streams::StreamRepository,
        value_objects::streams::{
            CreateStreamModel, SimpleStreamModel, StreamModel, UpdateStreamModel,
        },
    },
    infrastructure::{
        mux::client::MuxClient,
        postgres::{postgres_connection::PgPoolSquad, repositories::streams::StreamPostgres},
    },
    usecases::{gateway::MuxGateway, streams::StreamUseCase},
};

pub fn routes(db_pool: Arc<PgPoolSquad>, mux: Arc<MuxClient>) -> Router {
    let stream_repository = StreamPostgres::new(Arc::clone(&db_pool));
    let stream_usecase = StreamUseCase::new(Arc::new(stream_repository), mux);

    Router::new()
        .route(
            "/",
            get(list_streams::<StreamPostgres, MuxClient>)
                .post(create_stream::<StreamPostgres, MuxClient>),
        )
        .route(
            "/:stream_id",
            get(get_stream::<StreamPostgres, MuxClient>)
                .patch(update_stream::<StreamPostgres, MuxClient>)
                .delete(delete_stream::<StreamPostgres, MuxClient>),
        )
        .route(
            "/:stream_id/finish",
            post(finish_stream::<StreamPostgres, MuxClient>),
        )
        .route(
            "/:stream_id/reset-key",
            post(reset_stream_key::<StreamPostgres, MuxClient>),
        )
        .route(
            "/:stream_id/enable",
            post(enable_stream::<StreamPostgres, MuxClient>),
        )
        .route(
            "/:stream_id/disable",
            post(disable_stream::<StreamPostgres, MuxClient>),
        )
        .with_state(Arc::new(stream_usecase))
}

pub async fn list_streams<S, M>(
    State(stream_usecase): State<Arc<StreamUseCase<S, M>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    match stream_usecase.list().await {
        Ok(records) => {
            // Staff get the full representation, everyone else the reduced one.
            if auth.is_staff() {
                let models: Vec<StreamModel> = records
                    .into_iter()
                    .map(|(stream, thumbnail)| StreamModel::from_record(stream, &thumbnail))
                    .collect();
                (StatusCode::OK, Json(models)).into_response()
            } else {
                let models: Vec<SimpleStreamModel> = records
                    .into_iter()
                    .map(|(stream, thumbnail)| SimpleStreamModel::from_record(stream, &thumbnail))
                    .collect();
                (StatusCode::OK, Json(models)).into_response()
            }
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_stream<S, M>(
    State(stream_usecase): State<Arc<StreamUseCase<S, M>>>,
    _auth: AuthUser,
    Json(create_stream_model): Json<CreateStreamModel>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    match stream_usecase.create(create_stream_model).await {
        Ok((stream, thumbnail)) => (
            StatusCode::CREATED,
            Json(StreamModel::from_record(stream, &thumbnail)),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_stream<S, M>(
    State(stream_usecase): State<Arc<StreamUseCase<S, M>>>,
    auth: AuthUser,
    Path(stream_id): Path<String>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    match stream_usecase.get(&stream_id).await {
        Ok((stream, thumbnail)) => {
            if auth.is_staff() {
                (
                    StatusCode::OK,
                    Json(StreamModel::from_record(stream, &thumbnail)),
                )
                    .into_response()
            } else {
                (
                    StatusCode::OK,
                    Json(SimpleStreamModel::from_record(stream, &thumbnail)),
                )
                    .into_response()
            }
        }
        Err(err) => err.into_response(),
    }
}

pub async fn update_stream<S, M>(
    State(stream_usecase): State<Arc<StreamUseCase<S, M>>>,
    _auth: AuthUser,
    Path(stream_id): Path<String>,
    Json(update_stream_model): Json<UpdateStreamModel>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    match stream_usecase.update(&stream_id, update_stream_model).await {
        Ok((stream, thumbnail)) => (
            StatusCode::OK,
            Json(StreamModel::from_record(stream, &thumbnail)),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_stream<S, M>(
    State(stream_usecase): State<Arc<StreamUseCase<S, M>>>,
    _auth: AuthUser,
    Path(stream_id): Path<String>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    match stream_usecase.delete(&stream_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn finish_stream<S, M>(
    State(stream_usecase): State<Arc<StreamUseCase<S, M>>>,
    _auth: AuthUser,
    Path(stream_id): Path<String>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    match stream_usecase.finish(&stream_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn reset_stream_key<S, M>(
    State(stream_usecase): State<Arc<StreamUseCase<S, M>>>,
    _auth: AuthUser,
    Path(stream_id): Path<String>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    match stream_usecase.reset_key(&stream_id).await {
        Ok((stream, thumbnail)) => (
            StatusCode::OK,
            Json(StreamModel::from_record(stream, &thumbnail)),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn enable_stream<S, M>(
    State(stream_usecase): State<Arc<StreamUseCase<S, M>>>,
    _auth: AuthUser,
    Path(stream_id): Path<String>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    match stream_usecase.enable(&stream_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn disable_stream<S, M>(
    State(stream_usecase): State<Arc<StreamUseCase<S, M>>>,
    _auth: AuthUser,
    Path(stream_id): Path<String>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    match stream_usecase.disable(&stream_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
