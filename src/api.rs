//! HTTP surface: the page at `/` and one REST endpoint per user action.
//!
//! Every mutating endpoint answers with the full [`PageView`](crate::PageView) so the client
//! re-renders from it. Rejected actions still answer 200 with the unchanged view.

use crate::logic::{Column, RosterPage};
use crate::models::{Counter, InputField, PlayerInput, PlayerKey};
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    HttpResponse, Responder,
};
use serde::Deserialize;
use std::sync::RwLock;

/// Shared page state. The app is single-user; the lock serializes actions across workers.
pub type AppState = Data<RwLock<RosterPage>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AdjustCounterBody {
    delta: i64,
}

#[derive(Deserialize)]
struct FormFieldBody {
    field: InputField,
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
struct FilterBody {
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
struct VisibilityBody {
    visible: bool,
}

#[derive(Deserialize)]
struct SelectionBody {
    selected: bool,
}

/// Path segment: player key (e.g. /api/players/{key})
#[derive(Deserialize)]
struct PlayerPath {
    key: PlayerKey,
}

/// Path segments: player key and counter id (e.g. /api/players/{key}/counters/vipSlots)
#[derive(Deserialize)]
struct CounterPath {
    key: PlayerKey,
    counter: String,
}

/// Path segment: column id (e.g. /api/table/sort/name)
#[derive(Deserialize)]
struct ColumnPath {
    column: String,
}

/// Run one action under the write lock and answer with the resulting view.
fn act(state: &AppState, action: impl FnOnce(&mut RosterPage)) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    action(&mut *g);
    HttpResponse::Ok().json(g.view())
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "roster-widget",
    })
}

#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Current view (roster, table state, form values).
#[get("/api/roster")]
async fn api_get_roster(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.view())
}

/// Add a player from raw input values.
#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<PlayerInput>) -> HttpResponse {
    act(&state, |page| page.add_player(&body))
}

#[delete("/api/players/{key}")]
async fn api_delete_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    act(&state, |page| page.delete_player(path.key))
}

/// Apply a delta (usually +1 / -1) to one of a player's counters.
#[post("/api/players/{key}/counters/{counter}")]
async fn api_adjust_counter(
    state: AppState,
    path: Path<CounterPath>,
    body: Json<AdjustCounterBody>,
) -> HttpResponse {
    let Some(counter) = Counter::from_id(&path.counter) else {
        return bad_request(format!("Unknown counter {}", path.counter));
    };
    act(&state, |page| page.adjust_counter(path.key, counter, body.delta))
}

/// "Copy info" text for the clipboard.
#[get("/api/players/{key}/summary")]
async fn api_player_summary(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.summary(path.key) {
        Some(text) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(text),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No player" })),
    }
}

#[put("/api/form")]
async fn api_set_form_field(state: AppState, body: Json<FormFieldBody>) -> HttpResponse {
    let body = body.into_inner();
    act(&state, |page| page.set_form_field(body.field, body.value))
}

#[post("/api/form/submit")]
async fn api_submit_form(state: AppState) -> HttpResponse {
    act(&state, RosterPage::submit_form)
}

#[put("/api/table/filter")]
async fn api_set_filter(state: AppState, body: Json<FilterBody>) -> HttpResponse {
    let body = body.into_inner();
    act(&state, |page| page.set_filter(body.value))
}

/// Header click on a sortable column.
#[post("/api/table/sort/{column}")]
async fn api_toggle_sort(state: AppState, path: Path<ColumnPath>) -> HttpResponse {
    let Some(column) = Column::from_id(&path.column) else {
        return bad_request(format!("Unknown column {}", path.column));
    };
    act(&state, |page| page.toggle_sort(column))
}

#[put("/api/table/columns/{column}")]
async fn api_set_column_visible(
    state: AppState,
    path: Path<ColumnPath>,
    body: Json<VisibilityBody>,
) -> HttpResponse {
    let Some(column) = Column::from_id(&path.column) else {
        return bad_request(format!("Unknown column {}", path.column));
    };
    act(&state, |page| page.set_column_visible(column, body.visible))
}

/// Header checkbox: select or clear every row on the current page.
#[put("/api/table/selection")]
async fn api_set_page_selected(state: AppState, body: Json<SelectionBody>) -> HttpResponse {
    act(&state, |page| page.set_page_selected(body.selected))
}

#[put("/api/table/selection/{key}")]
async fn api_set_row_selected(
    state: AppState,
    path: Path<PlayerPath>,
    body: Json<SelectionBody>,
) -> HttpResponse {
    act(&state, |page| page.set_row_selected(path.key, body.selected))
}

#[post("/api/table/page/previous")]
async fn api_previous_page(state: AppState) -> HttpResponse {
    act(&state, RosterPage::previous_page)
}

#[post("/api/table/page/next")]
async fn api_next_page(state: AppState) -> HttpResponse {
    act(&state, RosterPage::next_page)
}

async fn serve_index() -> HttpResponse {
    let html = include_str!("../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// Register the page and every API route. Static assets are mounted by the binary.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_index))
        .service(api_health)
        .service(favicon)
        .service(api_get_roster)
        .service(api_add_player)
        .service(api_delete_player)
        .service(api_adjust_counter)
        .service(api_player_summary)
        .service(api_set_form_field)
        .service(api_submit_form)
        .service(api_set_filter)
        .service(api_toggle_sort)
        .service(api_set_column_visible)
        .service(api_set_page_selected)
        .service(api_set_row_selected)
        .service(api_previous_page)
        .service(api_next_page);
}
