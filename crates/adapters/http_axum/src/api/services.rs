//! JSON handlers for services and styles.
//!
//! Both endpoints accept the same `?map=<zoom>/<lat>/<lon>` parameter as the
//! directory page and return links resolved against it.

use axum::Json;
use axum::extract::{Path, RawQuery, State};
use axum::response::{IntoResponse, Response};

use osmlinks_app::ports::PreferenceStore;
use osmlinks_app::services::directory_service::ResolvedLink;
use osmlinks_domain::params::ParameterSet;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<ResolvedLink>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<ResolvedLink>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/services`: every service and style with its link.
pub async fn list<P>(
    State(state): State<AppState<P>>,
    RawQuery(query): RawQuery,
) -> ListResponse
where
    P: PreferenceStore + Send + Sync + 'static,
{
    let params = ParameterSet::from_fragment(query.as_deref().unwrap_or_default());
    ListResponse::Ok(Json(state.directory_service.resolve_all(&params)))
}

/// `GET /api/services/{id}`: one service or style with its link.
pub async fn get<P>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<GetResponse, ApiError>
where
    P: PreferenceStore + Send + Sync + 'static,
{
    let params = ParameterSet::from_fragment(query.as_deref().unwrap_or_default());
    let link = state.directory_service.resolve(&id, &params)?;
    Ok(GetResponse::Ok(Json(link)))
}
