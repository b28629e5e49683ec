use actix_web::{
    dev::Payload, error::ErrorUnauthorized, web::Data, Error as ActixError, FromRequest,
    HttpRequest,
};
use anyhow::{anyhow, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

use crate::config::Config;
use crate::database::models::{Employee, EmployeeInfo};
use crate::database::repositories::EmployeeRepository;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // employee id
    pub email: String,
    pub admin: bool,
    pub exp: usize, // expiration time
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn employee_id(&self) -> Result<i64> {
        self.sub
            .parse()
            .map_err(|_| anyhow!("Invalid employee id in token: {}", self.sub))
    }
}

impl FromRequest for Claims {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let auth_header = req.headers().get("Authorization");

        if let Some(auth_header) = auth_header {
            if let Ok(auth_str) = auth_header.to_str() {
                if auth_str.starts_with("Bearer ") {
                    let token = &auth_str[7..]; // Remove "Bearer " prefix

                    // Get the config from app data
                    if let Some(config) = req.app_data::<Data<Config>>() {
                        match decode::<Claims>(
                            token,
                            &DecodingKey::from_secret(config.jwt_secret.as_ref()),
                            &Validation::new(Algorithm::HS256),
                        ) {
                            Ok(token_data) => {
                                return ready(Ok(token_data.claims));
                            }
                            Err(_) => {
                                return ready(Err(ErrorUnauthorized("Invalid token")));
                            }
                        }
                    }
                }
            }
        }

        ready(Err(ErrorUnauthorized(
            "Missing or invalid authorization header",
        )))
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub employee: EmployeeInfo,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct AuthService {
    employee_repository: EmployeeRepository,
    config: Config,
}

impl AuthService {
    pub fn new(employee_repository: EmployeeRepository, config: Config) -> Self {
        Self {
            employee_repository,
            config,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse> {
        // Check if email already exists
        if self
            .employee_repository
            .email_exists(&request.email)
            .await?
        {
            return Err(anyhow!("Email already exists"));
        }

        // Hash password
        let password_hash = hash(&request.password, DEFAULT_COST)?;

        let employee = self
            .employee_repository
            .create_employee(
                &request.name,
                &request.email,
                request.phone.as_deref(),
                &password_hash,
            )
            .await?;

        // Generate JWT token
        let token = self.generate_token(&employee)?;

        Ok(AuthResponse {
            token,
            employee: employee.into(),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        // Find employee by email
        let employee = self
            .employee_repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| anyhow!("Invalid email or password"))?;

        // Verify password
        if !verify(&request.password, &employee.password_hash)? {
            return Err(anyhow!("Invalid email or password"));
        }

        // Generate JWT token
        let token = self.generate_token(&employee)?;

        Ok(AuthResponse {
            token,
            employee: employee.into(),
        })
    }

    pub async fn get_employee_from_claims(&self, claims: &Claims) -> Result<Employee> {
        let employee = self
            .employee_repository
            .find_by_id(claims.employee_id()?)
            .await?
            .ok_or_else(|| anyhow!("Employee not found"))?;

        Ok(employee)
    }

    fn generate_token(&self, employee: &Employee) -> Result<String> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::days(self.config.jwt_expiration_days))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: employee.id.to_string(),
            email: employee.email.clone(),
            admin: employee.is_admin,
            exp: expiration,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )?;

        Ok(token)
    }
}
