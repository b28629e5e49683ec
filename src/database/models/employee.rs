use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
}

/// Public projection joined into assignment and request listings.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmployeeInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<Employee> for EmployeeInfo {
    fn from(employee: Employee) -> Self {
        EmployeeInfo {
            id: employee.id,
            name: employee.name,
            email: employee.email,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmployeeInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminFlagInput {
    pub admin: bool,
}
