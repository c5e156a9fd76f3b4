use crate::db::SqlitePool;
use crate::db::models::{Department, DepartmentDetail, Organization, OrganizationDetail};
use crate::error::ApiError;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Store for organizations and their departments. Plain CRUD; the only
/// relational wrinkle is the FK cascade from organizations to departments.
#[derive(Clone)]
pub struct OrgStore {
    pool: SqlitePool,
}

impl OrgStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_org(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<Organization, ApiError> {
        let res = sqlx::query("INSERT INTO organizations (name, description) VALUES (?, ?)")
            .bind(&name)
            .bind(&description)
            .execute(&self.pool)
            .await?;
        Ok(Organization {
            id: res.last_insert_rowid(),
            name,
            description,
        })
    }

    pub async fn list_orgs(&self) -> Result<Vec<Organization>, ApiError> {
        let rows = sqlx::query("SELECT id, name, description FROM organizations ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Self::row_to_org).collect()
    }

    pub async fn find_org(&self, id: i64) -> Result<Option<Organization>, ApiError> {
        let row = sqlx::query("SELECT id, name, description FROM organizations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Self::row_to_org).transpose()
    }

    /// Organization detail view with its departments embedded.
    pub async fn org_detail(&self, id: i64) -> Result<Option<OrganizationDetail>, ApiError> {
        let Some(organization) = self.find_org(id).await? else {
            return Ok(None);
        };
        let rows = sqlx::query("SELECT id, name, org_id FROM departments WHERE org_id = ? ORDER BY id")
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        let departments = rows
            .into_iter()
            .map(Self::row_to_dept)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(OrganizationDetail {
            organization,
            departments,
        }))
    }

    pub async fn update_org(
        &self,
        id: i64,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Organization, ApiError> {
        let res = sqlx::query(
            r#"UPDATE organizations SET
                name = COALESCE(?, name),
                description = COALESCE(?, description)
              WHERE id = ?"#,
        )
        .bind(name)
        .bind(description)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 0 {
            return Err(ApiError::NotFound("Organization"));
        }
        self.find_org(id)
            .await?
            .ok_or(ApiError::NotFound("Organization"))
    }

    /// Delete an organization; its departments go with it (FK cascade).
    pub async fn delete_org(&self, id: i64) -> Result<(), ApiError> {
        let res = sqlx::query("DELETE FROM organizations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(ApiError::NotFound("Organization"));
        }
        Ok(())
    }

    /// Create a department under an existing organization.
    pub async fn create_dept(&self, name: String, org_id: i64) -> Result<Department, ApiError> {
        if self.find_org(org_id).await?.is_none() {
            return Err(ApiError::NotFound("Organization"));
        }
        let res = sqlx::query("INSERT INTO departments (name, org_id) VALUES (?, ?)")
            .bind(&name)
            .bind(org_id)
            .execute(&self.pool)
            .await?;
        Ok(Department {
            id: res.last_insert_rowid(),
            name,
            org_id,
        })
    }

    pub async fn list_depts(&self) -> Result<Vec<DepartmentDetail>, ApiError> {
        let rows = sqlx::query(
            r#"SELECT d.id, d.name, d.org_id, o.id AS o_id, o.name AS o_name, o.description AS o_description
               FROM departments d JOIN organizations o ON o.id = d.org_id
               ORDER BY d.id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_dept_detail).collect()
    }

    pub async fn dept_detail(&self, id: i64) -> Result<Option<DepartmentDetail>, ApiError> {
        let row = sqlx::query(
            r#"SELECT d.id, d.name, d.org_id, o.id AS o_id, o.name AS o_name, o.description AS o_description
               FROM departments d JOIN organizations o ON o.id = d.org_id
               WHERE d.id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_dept_detail).transpose()
    }

    /// Partial update; a new `org_id` must reference an existing organization.
    pub async fn update_dept(
        &self,
        id: i64,
        name: Option<String>,
        org_id: Option<i64>,
    ) -> Result<Department, ApiError> {
        if let Some(org_id) = org_id
            && self.find_org(org_id).await?.is_none()
        {
            return Err(ApiError::NotFound("Organization"));
        }
        let res = sqlx::query(
            r#"UPDATE departments SET
                name = COALESCE(?, name),
                org_id = COALESCE(?, org_id)
              WHERE id = ?"#,
        )
        .bind(name)
        .bind(org_id)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 0 {
            return Err(ApiError::NotFound("Department"));
        }
        let row = sqlx::query("SELECT id, name, org_id FROM departments WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Self::row_to_dept(row)
    }

    pub async fn delete_dept(&self, id: i64) -> Result<(), ApiError> {
        let res = sqlx::query("DELETE FROM departments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(ApiError::NotFound("Department"));
        }
        Ok(())
    }

    fn row_to_org(row: SqliteRow) -> Result<Organization, ApiError> {
        Ok(Organization {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
        })
    }

    fn row_to_dept(row: SqliteRow) -> Result<Department, ApiError> {
        Ok(Department {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            org_id: row.try_get("org_id")?,
        })
    }

    fn row_to_dept_detail(row: SqliteRow) -> Result<DepartmentDetail, ApiError> {
        let organization = Organization {
            id: row.try_get("o_id")?,
            name: row.try_get("o_name")?,
            description: row.try_get("o_description")?,
        };
        Ok(DepartmentDetail {
            department: Department {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                org_id: row.try_get("org_id")?,
            },
            organization,
        })
    }
}
