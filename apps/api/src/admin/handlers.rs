use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query as SqlxQuery;
use sqlx::{PgPool, Postgres, Row};
use uuid::Uuid;

use crate::admin::schema::{self, ColumnKind, EntitySpec};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/admin
/// The declarative entity/field configuration that drives the panel's
/// list and edit forms.
pub async fn handle_admin_config() -> Json<Value> {
    Json(json!({ "entities": schema::ENTITIES }))
}

#[derive(Deserialize)]
pub struct ListParams {
    pub parent: Option<Uuid>,
}

/// GET /api/v1/admin/:entity
pub async fn handle_admin_list(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, AppError> {
    let spec = find_spec(&entity)?;

    let mut sql = format!("SELECT * FROM {}", spec.table);
    if params.parent.is_some() {
        let fk = spec.parent.ok_or_else(|| {
            AppError::Validation(format!("entity '{}' has no parent filter", spec.name))
        })?;
        sql.push_str(&format!(" WHERE {fk} = $1"));
    }
    sql.push_str(&format!(" ORDER BY {}", order_clause(spec)));

    let mut query = sqlx::query(&sql);
    if let Some(parent) = params.parent {
        query = query.bind(parent);
    }
    let rows = query.fetch_all(&state.db).await?;
    let rows = rows
        .iter()
        .map(|row| row_to_json(spec, row))
        .collect::<Result<Vec<_>, sqlx::Error>>()?;

    Ok(Json(json!({ "entity": spec.name, "rows": rows })))
}

/// GET /api/v1/admin/:entity/:id
pub async fn handle_admin_get(
    State(state): State<AppState>,
    Path((entity, id)): Path<(String, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let spec = find_spec(&entity)?;
    let sql = format!("SELECT * FROM {} WHERE id = $1", spec.table);
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {id} not found", spec.name)))?;
    Ok(Json(row_to_json(spec, &row)?))
}

/// POST /api/v1/admin/:entity
pub async fn handle_admin_create(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let spec = find_spec(&entity)?;
    schema::validate_payload(spec, &payload, false)?;

    let id = Uuid::new_v4();
    let mut columns: Vec<&str> = vec!["id"];
    let mut binds: Vec<Bind> = vec![Bind::Id(id)];

    let parent_id = match spec.parent {
        Some(fk) => {
            let parent = parent_from_payload(&payload, fk)?;
            columns.push(fk);
            binds.push(Bind::Id(parent));
            Some(parent)
        }
        None => None,
    };

    if spec.positioned {
        let position = match payload.get("position").and_then(Value::as_i64) {
            Some(p) => p as i32,
            None => match parent_id {
                Some(parent) => next_position(&state.db, spec, parent).await?,
                None => 0,
            },
        };
        columns.push("position");
        binds.push(Bind::Int(position));
    }

    for column in spec.columns {
        let Some(value) = payload.get(column.name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        match column.kind {
            ColumnKind::Number => {
                if let Some(n) = value.as_i64() {
                    columns.push(column.name);
                    binds.push(Bind::Int(n as i32));
                }
            }
            _ => {
                if let Some(s) = value.as_str() {
                    columns.push(column.name);
                    binds.push(Bind::Text(s.to_string()));
                }
            }
        }
    }

    let placeholders = (1..=binds.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        spec.table,
        columns.join(", "),
        placeholders
    );
    apply_binds(sqlx::query(&sql), &binds)
        .execute(&state.db)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// PUT /api/v1/admin/:entity/:id
pub async fn handle_admin_update(
    State(state): State<AppState>,
    Path((entity, id)): Path<(String, Uuid)>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<Value>, AppError> {
    let spec = find_spec(&entity)?;
    schema::validate_payload(spec, &payload, true)?;

    let mut assignments: Vec<String> = Vec::new();
    let mut binds: Vec<Bind> = Vec::new();

    if spec.positioned {
        if let Some(p) = payload.get("position").and_then(Value::as_i64) {
            binds.push(Bind::Int(p as i32));
            assignments.push(format!("position = ${}", binds.len()));
        }
    }

    for column in spec.columns {
        let Some(value) = payload.get(column.name) else {
            continue;
        };
        match (column.kind, value) {
            (_, Value::Null) => binds.push(Bind::Null),
            (ColumnKind::Number, v) => match v.as_i64() {
                Some(n) => binds.push(Bind::Int(n as i32)),
                None => continue,
            },
            (_, v) => match v.as_str() {
                Some(s) => binds.push(Bind::Text(s.to_string())),
                None => continue,
            },
        }
        assignments.push(format!("{} = ${}", column.name, binds.len()));
    }

    if assignments.is_empty() {
        return Err(AppError::Validation(
            "payload contains no editable fields".to_string(),
        ));
    }
    if spec.table == "resumes" {
        assignments.push("updated_at = now()".to_string());
    }

    binds.push(Bind::Id(id));
    let sql = format!(
        "UPDATE {} SET {} WHERE id = ${}",
        spec.table,
        assignments.join(", "),
        binds.len()
    );
    let result = apply_binds(sqlx::query(&sql), &binds)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("{} {id} not found", spec.name)));
    }

    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/v1/admin/:entity/:id
/// Child rows cascade via foreign keys.
pub async fn handle_admin_delete(
    State(state): State<AppState>,
    Path((entity, id)): Path<(String, Uuid)>,
) -> Result<StatusCode, AppError> {
    let spec = find_spec(&entity)?;
    let sql = format!("DELETE FROM {} WHERE id = $1", spec.table);
    let result = sqlx::query(&sql).bind(id).execute(&state.db).await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("{} {id} not found", spec.name)));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn find_spec(entity: &str) -> Result<&'static EntitySpec, AppError> {
    schema::find_entity(entity)
        .ok_or_else(|| AppError::NotFound(format!("unknown entity '{entity}'")))
}

fn order_clause(spec: &EntitySpec) -> &'static str {
    if spec.positioned {
        "position ASC"
    } else if spec.table == "resumes" {
        "created_at ASC"
    } else {
        "id"
    }
}

fn parent_from_payload(payload: &Map<String, Value>, fk: &str) -> Result<Uuid, AppError> {
    let raw = payload
        .get(fk)
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Validation(format!("field '{fk}' is required")))?;
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("field '{fk}' must be a UUID")))
}

async fn next_position(
    pool: &PgPool,
    spec: &EntitySpec,
    parent: Uuid,
) -> Result<i32, sqlx::Error> {
    let fk = match spec.parent {
        Some(fk) => fk,
        None => return Ok(0),
    };
    let sql = format!(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM {} WHERE {fk} = $1",
        spec.table
    );
    sqlx::query_scalar(&sql).bind(parent).fetch_one(pool).await
}

enum Bind {
    Id(Uuid),
    Int(i32),
    Text(String),
    Null,
}

fn apply_binds<'q>(
    mut query: SqlxQuery<'q, Postgres, PgArguments>,
    binds: &'q [Bind],
) -> SqlxQuery<'q, Postgres, PgArguments> {
    for bind in binds {
        query = match bind {
            Bind::Id(v) => query.bind(*v),
            Bind::Int(v) => query.bind(*v),
            Bind::Text(v) => query.bind(v.as_str()),
            Bind::Null => query.bind(None::<String>),
        };
    }
    query
}

fn row_to_json(spec: &EntitySpec, row: &PgRow) -> Result<Value, sqlx::Error> {
    let mut obj = Map::new();
    let id: Uuid = row.try_get("id")?;
    obj.insert("id".to_string(), Value::String(id.to_string()));
    if let Some(fk) = spec.parent {
        let parent: Uuid = row.try_get(fk)?;
        obj.insert(fk.to_string(), Value::String(parent.to_string()));
    }
    if spec.positioned {
        let position: i32 = row.try_get("position")?;
        obj.insert("position".to_string(), Value::Number(position.into()));
    }
    for column in spec.columns {
        let value = match column.kind {
            ColumnKind::Number => row
                .try_get::<Option<i32>, _>(column.name)?
                .map(|n| Value::Number(n.into())),
            _ => row
                .try_get::<Option<String>, _>(column.name)?
                .map(Value::String),
        };
        obj.insert(column.name.to_string(), value.unwrap_or(Value::Null));
    }
    Ok(Value::Object(obj))
}
