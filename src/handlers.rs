use crate::daily_log::DailyLogStore;
use crate::errors::AppError;
use crate::meal_plan::{MealPlanStore, MealSlot, OptionSlot, apply_meal_option, paste_supplements};
use crate::models::{
    ClientQuery, CommitResponse, DailyRecord, DayResponse, MealPlanTemplate, StreakResponse,
    WebhookPayload, WeekStrip, WeeklySummary,
};
use crate::state::AppState;
use crate::stats::{closes_week, commit_message, streak, week_strip, weekly_summary};
use crate::storage::Storage;
use crate::ui::{render_daily_log, render_meal_plan, render_missing_client};
use crate::webhook::spawn_transmission;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

pub async fn daily_log_page(Query(query): Query<ClientQuery>) -> Response {
    match client_id(&query) {
        Ok(client) => Html(render_daily_log(client, today())).into_response(),
        Err(_) => missing_client_page(),
    }
}

pub async fn meal_plan_page(Query(query): Query<ClientQuery>) -> Response {
    match client_id(&query) {
        Ok(client) => Html(render_meal_plan(client)).into_response(),
        Err(_) => missing_client_page(),
    }
}

pub async fn get_day(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<DayResponse>, AppError> {
    client_id(&query)?;
    let storage = state.storage.lock().await;
    Ok(Json(day_response(&storage, date)))
}

pub async fn put_day(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
    Path(date): Path<NaiveDate>,
    Json(record): Json<DailyRecord>,
) -> Result<Json<DayResponse>, AppError> {
    client_id(&query)?;
    record.validate().map_err(AppError::bad_request)?;

    let mut storage = state.storage.lock().await;
    storage.update(|storage| storage.save_day(date, &record)).await?;
    debug!(%date, "saved daily log");

    Ok(Json(day_response(&storage, date)))
}

/// Stores the submitted record, marks the day completed and forwards the
/// record to the webhook once the local write has succeeded.
pub async fn commit_day(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
    Path(date): Path<NaiveDate>,
    Json(record): Json<DailyRecord>,
) -> Result<Json<CommitResponse>, AppError> {
    let client = client_id(&query)?;
    record.validate().map_err(AppError::bad_request)?;

    let response = {
        let mut storage = state.storage.lock().await;
        storage
            .update(|storage| {
                storage.save_day(date, &record)?;
                storage.mark_completed(date)
            })
            .await?;

        let streak = streak(&*storage, date);
        CommitResponse {
            date,
            streak,
            message: commit_message(storage.completed_dates().len(), streak),
            weekly_summary: closes_week(date).then(|| weekly_summary(&*storage, date)),
        }
    };
    info!(%date, streak = response.streak, "committed daily log");

    spawn_transmission(
        state.transmitter.clone(),
        WebhookPayload::new(client, date, record),
    );

    Ok(Json(response))
}

pub async fn apply_option(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
    Path((date, meal, option)): Path<(NaiveDate, usize, usize)>,
) -> Result<Json<DayResponse>, AppError> {
    client_id(&query)?;
    let meal = meal
        .checked_sub(1)
        .and_then(MealSlot::new)
        .ok_or_else(|| AppError::bad_request("meal must be between 1 and 4"))?;
    let option = option
        .checked_sub(1)
        .and_then(OptionSlot::new)
        .ok_or_else(|| AppError::bad_request("option must be between 1 and 4"))?;

    let mut storage = state.storage.lock().await;
    let mut record = storage.load_day(date);
    if apply_meal_option(&*storage, &mut record, meal, option) {
        storage.update(|storage| storage.save_day(date, &record)).await?;
    }

    Ok(Json(day_response(&storage, date)))
}

pub async fn paste_plan_supplements(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<DayResponse>, AppError> {
    client_id(&query)?;
    let mut storage = state.storage.lock().await;
    let plan = storage.load_plan();
    let mut record = storage.load_day(date);
    paste_supplements(&plan, &mut record);
    storage.update(|storage| storage.save_day(date, &record)).await?;

    Ok(Json(day_response(&storage, date)))
}

pub async fn get_streak(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<StreakResponse>, AppError> {
    client_id(&query)?;
    let storage = state.storage.lock().await;
    Ok(Json(StreakResponse {
        date,
        streak: streak(&*storage, date),
    }))
}

pub async fn get_week(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<WeekStrip>, AppError> {
    client_id(&query)?;
    let storage = state.storage.lock().await;
    Ok(Json(week_strip(&*storage, date, today())))
}

pub async fn get_weekly_summary(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<WeeklySummary>, AppError> {
    client_id(&query)?;
    let storage = state.storage.lock().await;
    Ok(Json(weekly_summary(&*storage, date)))
}

pub async fn get_meal_plan(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
) -> Result<Json<MealPlanTemplate>, AppError> {
    client_id(&query)?;
    let storage = state.storage.lock().await;
    Ok(Json(storage.load_plan()))
}

pub async fn put_meal_plan(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
    Json(plan): Json<MealPlanTemplate>,
) -> Result<Json<MealPlanTemplate>, AppError> {
    client_id(&query)?;
    let mut storage = state.storage.lock().await;
    storage.update(|storage| storage.save_plan(&plan)).await?;
    debug!("saved meal plan");

    Ok(Json(plan))
}

fn client_id(query: &ClientQuery) -> Result<&str, AppError> {
    query
        .client
        .as_deref()
        .map(str::trim)
        .filter(|client| !client.is_empty())
        .ok_or_else(AppError::missing_client)
}

fn missing_client_page() -> Response {
    (StatusCode::BAD_REQUEST, Html(render_missing_client())).into_response()
}

fn day_response(storage: &Storage, date: NaiveDate) -> DayResponse {
    DayResponse {
        date,
        completed: storage.is_completed(date),
        record: storage.load_day(date),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
