//! Static site data: route table, page copy, expertise areas, the intro
//! schedule and the header search.

use axum::extract::{Path, Query};
use axum::Json;
use siliconedge_core::content::{self, ExpertiseArea, PageContent, SiteRoute};
use siliconedge_core::error::CoreError;
use siliconedge_core::search::{filter_owned, site_index, EmptyQuery, SiteEntry};
use siliconedge_core::sequencing::{intro_schedule, PhaseSchedule};

use crate::error::AppResult;
use crate::query::{ResolveParams, SearchParams};
use crate::response::DataResponse;

/// GET /api/v1/site/routes
pub async fn list_routes() -> Json<DataResponse<&'static [SiteRoute]>> {
    Json(DataResponse {
        data: content::routes(),
    })
}

/// GET /api/v1/site/routes/resolve?path=
pub async fn resolve_route(
    Query(params): Query<ResolveParams>,
) -> AppResult<Json<DataResponse<&'static SiteRoute>>> {
    let route = content::resolve_route(&params.path)
        .ok_or_else(|| CoreError::not_found("Route", params.path.trim()))?;
    Ok(Json(DataResponse { data: route }))
}

/// GET /api/v1/site/pages/{slug}
pub async fn get_page(
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<&'static PageContent>>> {
    let page = content::page(&slug).ok_or_else(|| CoreError::not_found("Page", slug))?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/site/expertise
pub async fn list_expertise() -> Json<DataResponse<&'static [ExpertiseArea]>> {
    Json(DataResponse {
        data: content::expertise_areas(),
    })
}

/// GET /api/v1/site/intro
///
/// Phase timings for the home-page loader.
pub async fn intro() -> Json<DataResponse<PhaseSchedule>> {
    Json(DataResponse {
        data: intro_schedule(),
    })
}

/// GET /api/v1/search?q=
///
/// A blank query returns no results.
pub async fn search(Query(params): Query<SearchParams>) -> Json<DataResponse<Vec<SiteEntry>>> {
    Json(DataResponse {
        data: filter_owned(site_index(), &params.q, EmptyQuery::None),
    })
}
