use actix_web::{HttpResponse, Responder, get, web};
use log::error;

use crate::domain::condition::SearchCondition;
use crate::domain::page::PageRequest;
use crate::dto::api::{ErrorResponse, MemberPageResponse};
use crate::forms::FormError;
use crate::forms::search::MemberSearchParams;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::SearchError;
use crate::services::search::{ExecutorOptions, SearchExecutor};

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse { error: message })
}

fn search_error_response(err: SearchError) -> HttpResponse {
    match err {
        SearchError::InvalidArgument(message) => bad_request(message),
        SearchError::StoreUnavailable(e) => {
            error!("Member search failed: {e}");
            HttpResponse::ServiceUnavailable().json(ErrorResponse {
                error: "store unavailable".to_string(),
            })
        }
        SearchError::InconsistentProjection(message) => {
            error!("Member search returned an inconsistent projection: {message}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn parse_page(
    params: &MemberSearchParams,
    config: &ServerConfig,
) -> Result<(SearchCondition, PageRequest), FormError> {
    let condition = params.condition()?;
    let page = params.page_request(config.default_page_size, config.max_page_size)?;
    Ok((condition, page))
}

#[get("/v1/members")]
pub async fn api_v1_members(
    params: web::Query<MemberSearchParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let condition = match params.condition() {
        Ok(condition) => condition,
        Err(e) => return bad_request(e.to_string()),
    };

    let result =
        web::block(move || SearchExecutor::new(repo.get_ref()).search(&condition)).await;

    match result {
        Ok(Ok(members)) => HttpResponse::Ok().json(members),
        Ok(Err(e)) => search_error_response(e),
        Err(e) => {
            error!("Member search task failed: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/members/page")]
pub async fn api_v1_members_page(
    params: web::Query<MemberSearchParams>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let (condition, page) = match parse_page(&params, &server_config) {
        Ok(parsed) => parsed,
        Err(e) => return bad_request(e.to_string()),
    };
    let options = ExecutorOptions {
        concurrent_count: server_config.concurrent_count,
        ..ExecutorOptions::default()
    };

    let result = web::block(move || {
        SearchExecutor::with_options(repo.get_ref(), options).search_page_simple(&condition, &page)
    })
    .await;

    match result {
        Ok(Ok(page)) => HttpResponse::Ok().json(MemberPageResponse::from(page)),
        Ok(Err(e)) => search_error_response(e),
        Err(e) => {
            error!("Member page task failed: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/members/page/complex")]
pub async fn api_v1_members_page_complex(
    params: web::Query<MemberSearchParams>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let (condition, page) = match parse_page(&params, &server_config) {
        Ok(parsed) => parsed,
        Err(e) => return bad_request(e.to_string()),
    };

    let result = web::block(move || {
        SearchExecutor::new(repo.get_ref()).search_page_complex(&condition, &page)
    })
    .await;

    match result {
        Ok(Ok(page)) => HttpResponse::Ok().json(MemberPageResponse::from(page)),
        Ok(Err(e)) => search_error_response(e),
        Err(e) => {
            error!("Member page task failed: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
