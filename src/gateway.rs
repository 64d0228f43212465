use crate::data::student::{StudentInput, StudentRecord};
use snafu::{ResultExt, Snafu, ensure};
use sqlx::{Pool, Postgres, postgres::PgArguments, query::QueryAs};
use uuid::Uuid;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum GatewayError {
    #[snafu(display("Error making SQL query"))]
    Query { source: sqlx::Error },
    #[snafu(display("No student found with id {id}"))]
    StudentNotFound { id: Uuid },
}

/// Boundary contract to the student table. Owns no business logic: callers
/// validate before insert/update, and the server assigns ids and timestamps.
pub trait StudentGateway {
    async fn insert(&self, input: &StudentInput) -> Result<StudentRecord, GatewayError>;
    async fn update(&self, id: Uuid, input: &StudentInput) -> Result<StudentRecord, GatewayError>;
    async fn delete(&self, id: Uuid) -> Result<(), GatewayError>;
    async fn list(&self) -> Result<Vec<StudentRecord>, GatewayError>;
}

#[derive(Clone, Debug)]
pub struct PgStudentGateway {
    pool: Pool<Postgres>,
}

impl PgStudentGateway {
    pub const fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn bind_domain_fields<'q>(
    query: QueryAs<'q, Postgres, StudentRecord, PgArguments>,
    input: &'q StudentInput,
) -> QueryAs<'q, Postgres, StudentRecord, PgArguments> {
    query
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(input.date_of_birth)
        .bind(input.enrollment_date)
        .bind(&input.grade_level)
        .bind(&input.major)
        .bind(input.gpa)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.zip_code)
        .bind(&input.emergency_contact_name)
        .bind(&input.emergency_contact_phone)
        .bind(input.status)
}

impl StudentGateway for PgStudentGateway {
    async fn insert(&self, input: &StudentInput) -> Result<StudentRecord, GatewayError> {
        bind_domain_fields(
            sqlx::query_as(
                "INSERT INTO public.students \
                 (first_name, last_name, email, phone, date_of_birth, enrollment_date, \
                  grade_level, major, gpa, address, city, state, zip_code, \
                  emergency_contact_name, emergency_contact_phone, status) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
                 RETURNING *",
            ),
            input,
        )
        .fetch_one(&self.pool)
        .await
        .context(QuerySnafu)
    }

    async fn update(&self, id: Uuid, input: &StudentInput) -> Result<StudentRecord, GatewayError> {
        bind_domain_fields(
            sqlx::query_as(
                "UPDATE public.students SET \
                 first_name = $1, last_name = $2, email = $3, phone = $4, \
                 date_of_birth = $5, enrollment_date = $6, grade_level = $7, major = $8, \
                 gpa = $9, address = $10, city = $11, state = $12, zip_code = $13, \
                 emergency_contact_name = $14, emergency_contact_phone = $15, status = $16, \
                 updated_at = now() \
                 WHERE id = $17 \
                 RETURNING *",
            ),
            input,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context(QuerySnafu)?
        .ok_or(GatewayError::StudentNotFound { id })
    }

    async fn delete(&self, id: Uuid) -> Result<(), GatewayError> {
        let result = sqlx::query("DELETE FROM public.students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context(QuerySnafu)?;
        ensure!(result.rows_affected() > 0, StudentNotFoundSnafu { id });
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StudentRecord>, GatewayError> {
        sqlx::query_as("SELECT * FROM public.students ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .context(QuerySnafu)
    }
}
