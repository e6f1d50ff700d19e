use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::{
    auth::AuthUser,
    domain::{
        repositories::{simulcasts::SimulcastRepository, streams::StreamRepository},
        value_objects::simulcasts::{CreateSimulcastModel, SimulcastModel},
    },
    infrastructure::{
        mux::client::MuxClient,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{simulcasts::SimulcastPostgres, streams::StreamPostgres},
        },
    },
    usecases::{gateway::MuxGateway, simulcasts::SimulcastUseCase},
};

pub fn routes(db_pool: Arc<PgPoolSquad>, mux: Arc<MuxClient>) -> Router {
    let stream_repository = StreamPostgres::new(Arc::clone(&db_pool));
    let simulcast_repository = SimulcastPostgres::new(Arc::clone(&db_pool));
    let simulcast_usecase = SimulcastUseCase::new(
        Arc::new(stream_repository),
        Arc::new(simulcast_repository),
        mux,
    );

    Router::new()
        .route(
            "/",
            get(list_simulcasts::<StreamPostgres, SimulcastPostgres, MuxClient>)
                .post(create_simulcast::<StreamPostgres, SimulcastPostgres, MuxClient>),
        )
        .route(
            "/:simulcast_id",
            get(get_simulcast::<StreamPostgres, SimulcastPostgres, MuxClient>)
                .delete(delete_simulcast::<StreamPostgres, SimulcastPostgres, MuxClient>),
        )
        .with_state(Arc::new(simulcast_usecase))
}

pub async fn list_simulcasts<S, T, M>(
    State(simulcast_usecase): State<Arc<SimulcastUseCase<S, T, M>>>,
    _auth: AuthUser,
    Path(stream_id): Path<String>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    T: SimulcastRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    match simulcast_usecase.list(&stream_id).await {
        Ok(entities) => {
            let models: Vec<SimulcastModel> =
                entities.into_iter().map(SimulcastModel::from).collect();
            (StatusCode::OK, Json(models)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn create_simulcast<S, T, M>(
    State(simulcast_usecase): State<Arc<SimulcastUseCase<S, T, M>>>,
    _auth: AuthUser,
    Path(stream_id): Path<String>,
    Json(create_simulcast_model): Json<CreateSimulcastModel>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    T: SimulcastRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    match simulcast_usecase
        .create(&stream_id, create_simulcast_model)
        .await
    {
        Ok(entity) => (StatusCode::CREATED, Json(SimulcastModel::from(entity))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_simulcast<S, T, M>(
    State(simulcast_usecase): State<Arc<SimulcastUseCase<S, T, M>>>,
    _auth: AuthUser,
    Path((stream_id, simulcast_id)): Path<(String, String)>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    T: SimulcastRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    match simulcast_usecase.get(&stream_id, &simulcast_id).await {
        Ok(entity) => (StatusCode::OK, Json(SimulcastModel::from(entity))).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_simulcast<S, T, M>(
    State(simulcast_usecase): State<Arc<SimulcastUseCase<S, T, M>>>,
    _auth: AuthUser,
    Path((stream_id, simulcast_id)): Path<(String, String)>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    T: SimulcastRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    match simulcast_usecase.delete(&stream_id, &simulcast_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
