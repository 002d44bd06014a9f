use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Constraint(String),
    Conflict(String),
    NotModified,
    Database(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Constraint(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::NotModified => write!(f, "Not Modified"),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(msg) => {
                HttpResponse::NotFound().json(ErrorResponse { error: msg.clone() })
            }
            AppError::Constraint(msg) => {
                HttpResponse::BadRequest().json(ErrorResponse { error: msg.clone() })
            }
            AppError::Conflict(msg) => {
                HttpResponse::Conflict().json(ErrorResponse { error: msg.clone() })
            }
            // Conditional-fetch short-circuit: empty body, no ETag, no cursor.
            AppError::NotModified => HttpResponse::NotModified().finish(),
            AppError::Database(msg) => {
                error!("database error: {}", msg);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "internal server error".to_string(),
                })
            }
            AppError::Internal(msg) => {
                error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "internal server error".to_string(),
                })
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("resource is not found".to_string()),
            other => AppError::Database(other.to_string()),
        }
    }
}
