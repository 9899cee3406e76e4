//! Equipment repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{map_write_error, AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment, by name
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment ORDER BY name ASC, id ASC"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                name, equipment_type, brand, certificate_number,
                install_year, condition_percent, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.equipment_type)
        .bind(&data.brand)
        .bind(&data.certificate_number)
        .bind(data.install_year)
        .bind(data.condition_percent)
        .bind(data.status.unwrap_or_default())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Equipment"))
    }

    /// Update the provided fields of a piece of equipment
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.equipment_type, "equipment_type");
        add_field!(data.brand, "brand");
        add_field!(data.certificate_number, "certificate_number");
        add_field!(data.install_year, "install_year");
        add_field!(data.condition_percent, "condition_percent");
        add_field!(data.status, "status");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.equipment_type);
        bind_field!(data.brand);
        bind_field!(data.certificate_number);
        bind_field!(data.install_year);
        bind_field!(data.condition_percent);
        bind_field!(data.status);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Equipment"))?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment (its logs cascade)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }
}
