use actix_cors::Cors;
use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Result;

use shiftdesk::database::{
    init_database,
    repositories::{
        AssignmentRepository, EmployeeRepository, ShiftRequestRepository, ShiftSlotRepository,
    },
};
use shiftdesk::handlers::{assignments, auth, employees, requests, slots};
use shiftdesk::{AppState, AuthService, Config};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Shiftdesk API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    println!("🚀 Starting Shiftdesk API server...");

    // Load configuration
    let config = Config::from_env()?;
    println!(
        "📋 Configuration loaded (environment: {})",
        config.environment
    );

    // Initialize database
    let pool = init_database(&config.database_url).await?;
    println!("✅ Database initialized");

    // Initialize repositories and services
    let employee_repository = EmployeeRepository::new(pool.clone());
    let slot_repository = ShiftSlotRepository::new(pool.clone());
    let assignment_repository = AssignmentRepository::new(pool.clone());
    let request_repository = ShiftRequestRepository::new(pool.clone());
    let auth_service = AuthService::new(employee_repository.clone(), config.clone());

    let app_state = web::Data::new(AppState { auth_service });
    let employee_repo_data = web::Data::new(employee_repository);
    let slot_repo_data = web::Data::new(slot_repository);
    let assignment_repo_data = web::Data::new(assignment_repository);
    let request_repo_data = web::Data::new(request_repository);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    println!("🌐 Server starting on http://{}", server_address);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(employee_repo_data.clone())
            .app_data(slot_repo_data.clone())
            .app_data(assignment_repo_data.clone())
            .app_data(request_repo_data.clone())
            .app_data(config_data.clone())
            .wrap(if config_data.is_development() {
                Cors::permissive()
            } else {
                Cors::default()
                    .allowed_origin("http://localhost:3000")
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
                    .max_age(3600)
            })
            .wrap(Logger::default())
            .service(hello)
            .service(health)
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(auth::register))
                            .route("/login", web::post().to(auth::login))
                            .route("/me", web::get().to(auth::me)),
                    )
                    .service(
                        web::scope("/employees")
                            .route("", web::get().to(employees::get_employees))
                            .route("/{id}", web::get().to(employees::get_employee))
                            .route("/{id}", web::put().to(employees::update_employee))
                            .route("/{id}", web::delete().to(employees::delete_employee))
                            .route("/{id}/admin", web::put().to(employees::set_admin_flag)),
                    )
                    .service(
                        web::scope("/slots")
                            .route("", web::post().to(slots::create_slot))
                            .route("", web::get().to(slots::get_slots))
                            .route("/{id}", web::get().to(slots::get_slot))
                            .route("/{id}", web::put().to(slots::update_slot))
                            .route("/{id}", web::delete().to(slots::delete_slot)),
                    )
                    .service(
                        web::scope("/assignments")
                            .route("", web::post().to(assignments::create_assignment))
                            .route("", web::get().to(assignments::get_assignments))
                            .route("/swap", web::post().to(assignments::swap_assignments))
                            .route("/{id}", web::get().to(assignments::get_assignment))
                            .route("/{id}", web::delete().to(assignments::delete_assignment)),
                    )
                    .service(
                        web::scope("/requests")
                            .route("", web::post().to(requests::create_request))
                            .route("", web::get().to(requests::get_requests))
                            .route("/{id}", web::get().to(requests::get_request))
                            .route("/{id}", web::put().to(requests::update_request))
                            .route("/{id}", web::delete().to(requests::delete_request)),
                    ),
            )
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
