use log::error;
use mongodb::error::Error as DbError;
use rocket::{
    http::Status,
    response::{status::Custom, Responder},
    serde::json::json,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{1}")]
    Status(Status, String),
}

impl Error {
    /// A 404 carrying the given message.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::Status(Status::NotFound, msg.into())
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        match self {
            Self::Db(err) => {
                error!("Database error: {err}");
                Err(Status::InternalServerError)
            }
            Self::Status(status, msg) => Custom(status, json!({ "msg": msg })).respond_to(req),
        }
    }
}
