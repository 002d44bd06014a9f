mod db;
mod errors;
mod handlers;
mod models;
mod repository;
mod services;
mod utils;

use actix_web::{web, App, HttpResponse, HttpServer};
use dotenv::dotenv;
use log::info;
use std::env;
use std::sync::Arc;

use repository::postgres::department::PgDepartmentRepository;
use repository::postgres::employee::PgEmployeeRepository;
use repository::{DepartmentRepository, EmployeeRepository};
use services::department::DepartmentService;
use services::employee::EmployeeService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let pool = db::create_pool().await;

    // Repositories and services are built once here and injected into
    // the handlers; nothing is wired through globals.
    let department_repo: Arc<dyn DepartmentRepository> =
        Arc::new(PgDepartmentRepository::new(pool.clone()));
    let employee_repo: Arc<dyn EmployeeRepository> =
        Arc::new(PgEmployeeRepository::new(pool.clone()));

    let department_service =
        DepartmentService::new(department_repo.clone(), employee_repo.clone());
    let employee_service = EmployeeService::new(employee_repo, department_repo);

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    info!("Starting server at {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(department_service.clone()))
            .app_data(web::Data::new(employee_service.clone()))
            .route(
                "/ping",
                web::get().to(|| async { HttpResponse::Ok().json("pong") }),
            )
            .service(
                web::resource("/v1/departments")
                    .route(web::post().to(handlers::department::create_department))
                    .route(web::get().to(handlers::department::fetch_departments)),
            )
            .service(
                web::resource("/v1/departments/{id}")
                    .route(web::get().to(handlers::department::get_department))
                    .route(web::put().to(handlers::department::update_department))
                    .route(web::delete().to(handlers::department::delete_department)),
            )
            .service(
                web::resource("/v1/employees")
                    .route(web::post().to(handlers::employee::create_employee))
                    .route(web::get().to(handlers::employee::fetch_employees)),
            )
            .service(
                web::resource("/v1/employees/{id}")
                    .route(web::get().to(handlers::employee::get_employee))
                    .route(web::put().to(handlers::employee::update_employee))
                    .route(web::delete().to(handlers::employee::delete_employee)),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
