use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer, Result};
use serde::{Deserialize, Serialize};

use crate::config::{check_sales_target, RosterOptions, ServerConfig, DEFAULT_SALES_TARGET};
use crate::error::RosterError;
use crate::export::{roster_columns, roster_to_csv_string, CSV_MIME, SCHEDULE_FILENAME};
use crate::parser::parse_records_str;
use crate::schedule::aggregate::aggregate;
use crate::schedule::types::{day_name, ScheduleEntry, SlotStats};
use crate::schedule::{generate_schedule, ScheduleReport};

/// Query string shared by the upload endpoints; the CSV itself is the request body
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    pub target: Option<f64>,
    pub departments: Option<bool>,
    pub single_shift_per_day: Option<bool>,
}

impl ScheduleQuery {
    fn options(&self) -> RosterOptions {
        RosterOptions::for_variant(self.departments.unwrap_or(false), self.single_shift_per_day)
    }

    fn sales_target(&self) -> f64 {
        self.target.unwrap_or(DEFAULT_SALES_TARGET)
    }
}

#[derive(Serialize)]
pub struct AverageRow {
    day: String,
    shift: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    department: Option<String>,
    average_sales: f64,
    average_employees: u32,
}

impl From<&SlotStats> for AverageRow {
    fn from(stats: &SlotStats) -> Self {
        AverageRow {
            day: day_name(stats.slot.day).to_string(),
            shift: stats.slot.shift.to_string(),
            department: stats.slot.department.clone(),
            average_sales: stats.average_sales,
            average_employees: stats.average_employees,
        }
    }
}

#[derive(Serialize)]
pub struct ScheduleRow {
    day: String,
    shift: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    department: Option<String>,
    sales_target: f64,
    employees_needed: u32,
    assigned_employees: Vec<String>,
    assigned_display: String,
}

impl From<&ScheduleEntry> for ScheduleRow {
    fn from(entry: &ScheduleEntry) -> Self {
        ScheduleRow {
            day: day_name(entry.slot.day).to_string(),
            shift: entry.slot.shift.to_string(),
            department: entry.slot.department.clone(),
            sales_target: entry.sales_target,
            employees_needed: entry.employees_needed,
            assigned_employees: entry.assigned_employees.clone(),
            assigned_display: entry.assigned_display(),
        }
    }
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    success: bool,
    department_aware: bool,
    sales_target: f64,
    columns: Vec<&'static str>,
    averages: Vec<AverageRow>,
    rows: Vec<ScheduleRow>,
}

impl ScheduleResponse {
    fn new(report: &ScheduleReport, sales_target: f64) -> Self {
        let department_aware = report.roster.department_aware;
        ScheduleResponse {
            success: true,
            department_aware,
            sales_target,
            columns: roster_columns(department_aware),
            averages: report.averages.iter().map(AverageRow::from).collect(),
            rows: report.roster.entries.iter().map(ScheduleRow::from).collect(),
        }
    }
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": message
    }))
}

fn roster_error(e: RosterError) -> HttpResponse {
    log::warn!("rejected upload: {e}");
    bad_request(e.to_string())
}

fn body_text(body: &web::Bytes) -> std::result::Result<&str, HttpResponse> {
    std::str::from_utf8(body).map_err(|_| bad_request("Uploaded file is not valid UTF-8 text".to_string()))
}

fn run_pipeline(body: &web::Bytes, query: &ScheduleQuery) -> std::result::Result<ScheduleReport, HttpResponse> {
    let text = body_text(body)?;
    let sales_target = query.sales_target();
    check_sales_target(sales_target);
    generate_schedule(text, sales_target, query.options()).map_err(roster_error)
}

// Historical averages only
async fn post_averages(query: web::Query<ScheduleQuery>, body: web::Bytes) -> Result<HttpResponse> {
    let text = match body_text(&body) {
        Ok(text) => text,
        Err(response) => return Ok(response),
    };
    let department_aware = query.departments.unwrap_or(false);

    let averages = match parse_records_str(text, department_aware)
        .and_then(|records| aggregate(&records, department_aware))
    {
        Ok(averages) => averages,
        Err(e) => return Ok(roster_error(e)),
    };

    let rows: Vec<AverageRow> = averages.iter().map(AverageRow::from).collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "department_aware": department_aware,
        "averages": rows
    })))
}

// Roster as JSON for the table view
async fn post_schedule(query: web::Query<ScheduleQuery>, body: web::Bytes) -> Result<HttpResponse> {
    match run_pipeline(&body, &query) {
        Ok(report) => Ok(HttpResponse::Ok().json(ScheduleResponse::new(&report, query.sales_target()))),
        Err(response) => Ok(response),
    }
}

// Roster as a CSV download
async fn post_schedule_csv(query: web::Query<ScheduleQuery>, body: web::Bytes) -> Result<HttpResponse> {
    let report = match run_pipeline(&body, &query) {
        Ok(report) => report,
        Err(response) => return Ok(response),
    };

    let csv = roster_to_csv_string(&report.roster)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to write CSV: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type(CSV_MIME)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", SCHEDULE_FILENAME),
        ))
        .body(csv))
}

// HTML page handler
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Routes of the roster service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/averages", web::post().to(post_averages))
        .route("/api/schedule", web::post().to(post_schedule))
        .route("/api/schedule/csv", web::post().to(post_schedule_csv));
}

pub async fn start_server(config: ServerConfig) -> std::io::Result<()> {
    let max_upload_bytes = config.max_upload_bytes;

    HttpServer::new(move || {
        App::new()
            .app_data(web::PayloadConfig::new(max_upload_bytes))
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((config.bind.as_str(), config.port))?
    .run()
    .await
}
