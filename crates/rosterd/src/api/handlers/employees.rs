//! Employee CRUD handlers.
//!
//! Create and update accept `multipart/form-data` so the optional image
//! travels alongside the text fields.

use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::Field},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use super::auth::MessageResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::auth::CurrentUser;
use crate::employee::{Employee, NewEmployee, UpdateEmployee};
use crate::uploads::ImageStore;

/// Fields collected from a multipart employee form.
#[derive(Debug, Default)]
struct EmployeeForm {
    name: Option<String>,
    email: Option<String>,
    mobile: Option<String>,
    designation: Option<String>,
    gender: Option<String>,
    course: Vec<String>,
    image: Option<String>,
}

async fn read_text(field: Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::validation(format!("Malformed form data: {e}")))
}

/// Drain a multipart request into an [`EmployeeForm`], storing the image
/// part as it streams through.
async fn read_employee_form(state: &AppState, mut multipart: Multipart) -> ApiResult<EmployeeForm> {
    let mut form = EmployeeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Malformed form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "name" => form.name = Some(read_text(field).await?),
            "email" => form.email = Some(read_text(field).await?),
            "mobile" => form.mobile = Some(read_text(field).await?),
            "designation" => form.designation = Some(read_text(field).await?),
            "gender" => form.gender = Some(read_text(field).await?),
            // Repeated `course` fields accumulate into the list
            "course" => form.course.push(read_text(field).await?),
            "image" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                if !ImageStore::allowed_content_type(&content_type) {
                    return Err(ApiError::validation("Only jpg and png files allowed"));
                }

                let original = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "upload".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(format!("Malformed form data: {e}")))?;

                form.image = Some(state.images.save(&original, data).await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Treat empty strings as absent, so a blank form field leaves the stored
/// value untouched on update.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Create an employee. All text fields are required; the image is optional.
#[instrument(skip(state, multipart))]
pub async fn create_employee(
    State(state): State<AppState>,
    _user: CurrentUser,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = read_employee_form(&state, multipart).await?;

    let (Some(name), Some(email), Some(mobile), Some(designation), Some(gender)) = (
        non_empty(form.name),
        non_empty(form.email),
        non_empty(form.mobile),
        non_empty(form.designation),
        non_empty(form.gender),
    ) else {
        return Err(ApiError::validation("All fields are required"));
    };

    if form.course.is_empty() {
        return Err(ApiError::validation("All fields are required"));
    }

    state
        .employees
        .create(NewEmployee {
            name,
            email,
            mobile,
            designation,
            gender,
            course: form.course,
            image: form.image,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Employee created successfully")),
    ))
}

/// List all employees, newest first.
#[instrument(skip(state))]
pub async fn list_employees(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<Vec<Employee>>> {
    let employees = state.employees.list().await?;
    Ok(Json(employees))
}

/// Get an employee by id.
#[instrument(skip(state))]
pub async fn get_employee(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Employee>> {
    let employee = state
        .employees
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Employee not found"))?;

    Ok(Json(employee))
}

/// Update an employee. Only provided, non-empty fields change.
#[instrument(skip(state, multipart))]
pub async fn update_employee(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> ApiResult<Json<MessageResponse>> {
    let form = read_employee_form(&state, multipart).await?;

    let update = UpdateEmployee {
        name: non_empty(form.name),
        email: non_empty(form.email),
        mobile: non_empty(form.mobile),
        designation: non_empty(form.designation),
        gender: non_empty(form.gender),
        course: (!form.course.is_empty()).then_some(form.course),
        image: form.image,
    };

    state.employees.update(id, update).await?;

    Ok(Json(MessageResponse::new("Employee updated successfully")))
}

/// Delete an employee by id.
#[instrument(skip(state))]
pub async fn delete_employee(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    state.employees.delete(id).await?;

    Ok(Json(MessageResponse::new("Employee deleted successfully")))
}
