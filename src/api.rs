use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::error;

use crate::config::Config;
use crate::domain::solve::solve_linear_program;
use crate::domain::solver_factory::SolverType;
use crate::models::{ErrorResponse, SolveRequest, SolversResponse};

pub const API_KEY_HEADER: &str = "X-API-Key";

// ---------- Route table ----------

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root_redirect))
        .route("/solve", web::post().to(solve))
        .route("/solvers", web::get().to(solvers))
        .route("/health", web::get().to(health_check));
}

/// JSON extractor config: body size limit and `{"error": ...}` on bad payloads.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _| {
            let err_string = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(serde_json::json!({ "error": err_string })),
            )
            .into()
        })
}

// ---------- Route handlers ----------

/// POST /solve
pub async fn solve(
    config: web::Data<Config>,
    http: HttpRequest,
    req: web::Json<SolveRequest>,
) -> HttpResponse {
    if let Err(response) = authorize(&http, &config) {
        return response;
    }

    let settings = config.solve.clone();
    let request = req.into_inner();

    // The solve is synchronous; keep it off the async workers.
    match web::block(move || solve_linear_program(&request, &settings)).await {
        Ok(Ok(result)) => HttpResponse::Ok().json(result),
        Ok(Err(err)) => HttpResponse::BadRequest().json(ErrorResponse::from(&err)),
        Err(err) => {
            error!("Solve worker failed: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Something went wrong".to_string(),
                kind: None,
            })
        }
    }
}

/// GET /solvers
pub async fn solvers(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(SolversResponse {
        default: config.solve.default_solver.clone(),
        solvers: SolverType::names().into_iter().map(String::from).collect(),
    })
}

/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// GET / - Redirect to health
pub async fn root_redirect() -> impl Responder {
    HttpResponse::Found()
        .append_header(("Location", "/health"))
        .finish()
}

fn authorize(http: &HttpRequest, config: &Config) -> Result<(), HttpResponse> {
    let Some(expected) = config.api_key.as_deref() else {
        return Ok(());
    };

    let provided = http
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == expected => Ok(()),
        _ => Err(HttpResponse::Unauthorized().json(ErrorResponse {
            error: "Missing or invalid API key".to_string(),
            kind: None,
        })),
    }
}
