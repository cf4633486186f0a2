//! Employee Repository

use super::{BaseRepository, CursorParams, Page, RepoError, RepoResult, page_sql};
use crate::db::models::{self, Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate};
use saffron_shared::{now_millis, snowflake_id};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "employee";
const DEFAULT_PAGE: usize = 10;

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// One keyset page of employees
    pub async fn list_page(&self, params: &CursorParams) -> RepoResult<Page<Employee>> {
        let (sql, limit) = page_sql(TABLE, None, params, DEFAULT_PAGE);
        let mut query = self.base.db().query(sql).bind(("limit", limit as i64));
        if let Some(cursor) = params.cursor {
            query = query.bind(("cursor", cursor));
        }
        let employees: Vec<Employee> = query.await?.take(0)?;
        Ok(Page::from_rows(employees, limit, |e| {
            e.id.as_ref().and_then(models::record_key)
        }))
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let thing = super::parse_thing(TABLE, id)?;
        let employee: Option<Employee> = self.base.db().select(thing).await?;
        Ok(employee)
    }

    /// Find employee by email (unique)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Create a new employee
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Employee with email '{}' already exists",
                data.email
            )));
        }

        let now = now_millis();
        let employee = Employee {
            id: None,
            name: data.name,
            email: data.email,
            phone: data.phone,
            role: data.role,
            salary: data.salary,
            shift: data.shift,
            status: EmployeeStatus::Active,
            address: data.address,
            date_of_joining: now,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Employee> = self
            .base
            .db()
            .create((TABLE, snowflake_id()))
            .content(employee)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Update an employee
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        let thing = super::parse_thing(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

        if let Some(email) = data.email.as_ref()
            && *email != existing.email
            && self.find_by_email(email).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Employee with email '{}' already exists",
                email
            )));
        }

        let merged = Employee {
            id: None,
            name: data.name.unwrap_or(existing.name),
            email: data.email.unwrap_or(existing.email),
            phone: data.phone.unwrap_or(existing.phone),
            role: data.role.unwrap_or(existing.role),
            salary: data.salary.unwrap_or(existing.salary),
            shift: data.shift.unwrap_or(existing.shift),
            status: data.status.unwrap_or(existing.status),
            address: data.address.unwrap_or(existing.address),
            date_of_joining: existing.date_of_joining,
            created_at: existing.created_at,
            updated_at: now_millis(),
        };

        let updated: Option<Employee> = self.base.db().update(thing).content(merged).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    /// Hard delete an employee
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = super::parse_thing(TABLE, id)?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
