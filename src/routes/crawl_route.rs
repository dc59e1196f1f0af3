use std::path::Path;

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::{
    configuration::ExportSettings,
    domain::profile::ProfileRecord,
    error::CrawlError,
    services::{export_to_csv, ProfileCrawler, ProfileExtractor, SessionLauncher},
};

#[derive(Serialize)]
struct CrawlResponse {
    profiles: Vec<ProfileRecord>,
    csv_export: CsvExport,
}

#[derive(Serialize)]
struct CsvExport {
    success: bool,
    filename: Option<String>,
    path: Option<String>,
}

#[derive(Serialize)]
struct ErrorDetail {
    detail: String,
}

fn error_detail(detail: impl ToString) -> ErrorDetail {
    ErrorDetail {
        detail: detail.to_string(),
    }
}

/// `POST /crawl` with a json array of profile urls.
pub async fn crawl_profiles<L, E>(
    crawler: web::Data<ProfileCrawler<L, E>>,
    export: web::Data<ExportSettings>,
    body: web::Json<Vec<String>>,
) -> HttpResponse
where
    L: SessionLauncher + 'static,
    E: ProfileExtractor + 'static,
{
    let profiles = match crawler.crawl_profiles(&body).await {
        Ok(profiles) => profiles,
        Err(e @ CrawlError::InvalidProfiles) => {
            return HttpResponse::BadRequest().json(error_detail(e))
        }
        Err(e) => {
            log::error!("Crawl failed: {}", e);
            return HttpResponse::InternalServerError().json(error_detail(e));
        }
    };

    let csv_path = match export_to_csv(&profiles, Path::new(&export.directory), None) {
        Ok(path) => path,
        Err(e) => {
            log::error!("Export failed: {}", e);
            return HttpResponse::InternalServerError().json(error_detail(e));
        }
    };

    let csv_export = CsvExport {
        success: csv_path.is_some(),
        filename: csv_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().to_string()),
        path: csv_path.as_ref().map(|p| p.display().to_string()),
    };

    HttpResponse::Ok().json(CrawlResponse {
        profiles,
        csv_export,
    })
}
