use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::errors::AppError;
use crate::handlers::{FetchQueryParams, FilterParams};
use crate::models::department::{DepartmentFilter, NewDepartment, UpdateDepartment};
use crate::services::department::DepartmentService;
use crate::utils::etag::{self, Freshness};

pub async fn create_department(
    service: web::Data<DepartmentService>,
    payload: web::Json<NewDepartment>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|err| AppError::Constraint(err.to_string()))?;

    let department = service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(department))
}

pub async fn fetch_departments(
    req: HttpRequest,
    service: web::Data<DepartmentService>,
    params: web::Query<FetchQueryParams>,
) -> Result<HttpResponse, AppError> {
    let params = FilterParams::try_from(params.into_inner())?;
    let page = service
        .fetch(DepartmentFilter {
            ids: params.ids,
            keyword: params.keyword,
            num: params.num,
            cursor: params.cursor,
        })
        .await?;

    // Conditional check comes first: a 304 carries neither cursor nor tag.
    if let Some(first) = page.items.first() {
        let if_none_match = req
            .headers()
            .get("If-None-Match")
            .and_then(|v| v.to_str().ok());
        return match etag::evaluate(&first.id, if_none_match) {
            Freshness::NotModified => Err(AppError::NotModified),
            Freshness::Fresh(tag) => Ok(HttpResponse::Ok()
                .insert_header(("ETag", tag))
                .insert_header(("X-Cursor", page.next_cursor.clone()))
                .json(page.items)),
        };
    }

    Ok(HttpResponse::Ok().json(page.items))
}

pub async fn get_department(
    service: web::Data<DepartmentService>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let department = service.get(&id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(department))
}

pub async fn update_department(
    service: web::Data<DepartmentService>,
    id: web::Path<String>,
    payload: web::Json<UpdateDepartment>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|err| AppError::Constraint(err.to_string()))?;

    let department = service.update(&id.into_inner(), payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(department))
}

pub async fn delete_department(
    service: web::Data<DepartmentService>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
