use actix_web::{web, HttpResponse};

use crate::api::today;
use crate::auth::Caller;
use crate::error::AppError;
use crate::views::ProfileView;
use crate::AppState;

pub async fn get_profile(
    caller: Caller,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = ProfileView::load(state.store.as_ref(), &caller.user, today()).await?;
    Ok(HttpResponse::Ok().json(view))
}
