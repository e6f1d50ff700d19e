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
    config::config_model::MuxSigning,
    domain::repositories::{
        status_credentials::StatusCredentialRepository, streams::StreamRepository,
    },
    infrastructure::{
        mux::client::MuxClient,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                status_credentials::StatusCredentialPostgres, streams::StreamPostgres,
            },
        },
    },
    usecases::{gateway::MuxGateway, stream_status::StreamStatusUseCase},
};

pub fn routes(db_pool: Arc<PgPoolSquad>, mux: Arc<MuxClient>, signing: MuxSigning) -> Router {
    let stream_repository = StreamPostgres::new(Arc::clone(&db_pool));
    let credential_repository = StatusCredentialPostgres::new(Arc::clone(&db_pool));
    let stream_status_usecase = StreamStatusUseCase::new(
        Arc::new(stream_repository),
        Arc::new(credential_repository),
        mux,
        signing,
    );

    Router::new()
        .route(
            "/",
            get(get_stream_status::<StreamPostgres, StatusCredentialPostgres, MuxClient>),
        )
        .with_state(Arc::new(stream_status_usecase))
}

pub async fn get_stream_status<S, C, M>(
    State(stream_status_usecase): State<Arc<StreamStatusUseCase<S, C, M>>>,
    _auth: AuthUser,
    Path(stream_id): Path<String>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    C: StatusCredentialRepository + Send + Sync + 'static,
    M: MuxGateway + 'static,
{
    match stream_status_usecase.get_status(&stream_id).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => err.into_response(),
    }
}
