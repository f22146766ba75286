use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::daily_log_page))
        .route("/meal-plan", get(handlers::meal_plan_page))
        .route("/api/days/:date", get(handlers::get_day).put(handlers::put_day))
        .route("/api/days/:date/commit", post(handlers::commit_day))
        .route(
            "/api/days/:date/meals/:meal/options/:option",
            post(handlers::apply_option),
        )
        .route(
            "/api/days/:date/supplements/paste",
            post(handlers::paste_plan_supplements),
        )
        .route("/api/days/:date/streak", get(handlers::get_streak))
        .route("/api/weeks/:date", get(handlers::get_week))
        .route("/api/weeks/:date/summary", get(handlers::get_weekly_summary))
        .route(
            "/api/meal-plan",
            get(handlers::get_meal_plan).put(handlers::put_meal_plan),
        )
        .with_state(state)
}
