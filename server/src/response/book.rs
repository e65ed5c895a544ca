use application::transfer::{BookDto, DeletedAllBooksDto, DeletedBookDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::controller::Exhaust;

pub const DELETE_SUCCESSFUL: &str = "delete successful";
pub const COMPLETE_DELETE_SUCCESSFUL: &str = "complete delete successful";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    id: Uuid,
    title: String,
    comment_count: usize,
    comments: Vec<String>,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            comment_count: value.comment_count,
            comments: value.comments,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug)]
pub struct CreatedBookResponse(BookResponse);

impl IntoResponse for CreatedBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<BookDto> for BookPresenter {
    type To = BookResponse;
    fn emit(&self, output: BookDto) -> Self::To {
        BookResponse::from(output)
    }
}

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = Json<Vec<BookResponse>>;
    fn emit(&self, output: Vec<BookDto>) -> Self::To {
        let result = output
            .into_iter()
            .map(BookResponse::from)
            .collect::<Vec<_>>();

        Json::from(result)
    }
}

impl Exhaust<DeletedBookDto> for BookPresenter {
    type To = &'static str;
    fn emit(&self, _: DeletedBookDto) -> Self::To {
        DELETE_SUCCESSFUL
    }
}

impl Exhaust<DeletedAllBooksDto> for BookPresenter {
    type To = &'static str;
    fn emit(&self, _: DeletedAllBooksDto) -> Self::To {
        COMPLETE_DELETE_SUCCESSFUL
    }
}

pub struct CreatedBookPresenter;

impl Exhaust<BookDto> for CreatedBookPresenter {
    type To = CreatedBookResponse;
    fn emit(&self, output: BookDto) -> Self::To {
        CreatedBookResponse(BookResponse::from(output))
    }
}
