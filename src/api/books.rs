//! Book endpoints: CRUD, reservation and the catalog report

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::{Book, CreateBook, ReserveBook},
        BookWithAuthor, ReportResponse,
    },
};

/// List all books sorted by rating (desc) then publication date (desc)
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Sorted list of books with authors", body = Vec<BookWithAuthor>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookWithAuthor>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created with status available", body = Book),
        (status = 422, description = "Validation failed, field-keyed error map")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.books.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Reserve an available book for an email address
#[utoipa::path(
    post,
    path = "/books/{id}/reserve",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = ReserveBook,
    responses(
        (status = 200, description = "Book reserved", body = Book),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Already reserved or invalid email")
    )
)]
pub async fn reserve_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ReserveBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.reserve(id, request).await?;
    Ok(Json(book))
}

/// Generate the per-author catalog report
#[utoipa::path(
    get,
    path = "/books/generate_report",
    tag = "books",
    responses(
        (status = 200, description = "Catalog report", body = ReportResponse)
    )
)]
pub async fn generate_report(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ReportResponse>> {
    let report = state.services.report.generate().await?;
    Ok(Json(report))
}
