use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
mod upload;

pub fn router() -> Router<AppState> {
    handlers::router()
}
