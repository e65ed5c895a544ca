use std::convert::Infallible;

use application::transfer::{AddBookCommentDto, CreateBookDto, DeleteBookDto, GetBookDto};
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::controller::Intake;

/// Request body read as JSON or as an urlencoded form.
///
/// A body that is missing or does not parse yields `T::default()`, so an
/// absent field reaches validation instead of being rejected here.
#[derive(Debug)]
pub struct Fields<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for Fields<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));
        let fields = if is_form {
            Form::<T>::from_request(req, state)
                .await
                .ok()
                .map(|Form(fields)| fields)
        } else {
            Json::<T>::from_request(req, state)
                .await
                .ok()
                .map(|Json(fields)| fields)
        };
        Ok(Self(fields.unwrap_or_default()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(text) => text,
            Scalar::Integer(number) => number.to_string(),
            Scalar::Float(number) => number.to_string(),
            Scalar::Bool(flag) => flag.to_string(),
        }
    }
}

/// Text fields also accept numbers and booleans, stored as their string form.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default, deserialize_with = "scalar_text")]
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddCommentRequest {
    #[serde(default, deserialize_with = "scalar_text")]
    comment: Option<String>,
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: String,
}

impl GetBookRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: String,
}

impl DeleteBookRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

pub struct BookTransformer;

impl Intake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto { title: input.title }
    }
}

impl Intake<(String, AddCommentRequest)> for BookTransformer {
    type To = AddBookCommentDto;
    fn emit(&self, input: (String, AddCommentRequest)) -> Self::To {
        let (id, input) = input;
        AddBookCommentDto {
            id,
            comment: input.comment,
        }
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}
