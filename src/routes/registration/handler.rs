use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    mailer::{
        Mailer,
        template::{ENROLLMENT_SUBJECT, EnrollmentEmail, enrollment_confirmation},
    },
};

use super::model::{RegistrationDto, RegistrationRequest, RegistrationResponse};

#[axum::debug_handler]
pub async fn get_all_registrations(State(state): State<AppState>) -> impl IntoResponse {
    match RegistrationDto::fetch_all(&state.pool).await {
        Ok(registrations) => (
            StatusCode::OK,
            Json(RegistrationResponse {
                success: true,
                message: "Registrations retrieved successfully".to_string(),
                registrations: Some(registrations),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RegistrationResponse {
                success: false,
                message: format!("Error retrieving registrations: {}", e),
                ..Default::default()
            }),
        ),
    }
}

#[axum::debug_handler]
pub async fn get_registration_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match RegistrationDto::find_by_id(&state.pool, id).await {
        Ok(Some(registration)) => (
            StatusCode::OK,
            Json(RegistrationResponse {
                success: true,
                message: "Registration retrieved successfully".to_string(),
                registration: Some(registration),
                ..Default::default()
            }),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(RegistrationResponse {
                success: false,
                message: format!("Registration with id '{}' not found", id),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RegistrationResponse {
                success: false,
                message: format!("Error retrieving registration: {}", e),
                ..Default::default()
            }),
        ),
    }
}

#[axum::debug_handler]
pub async fn create_registration(
    State(state): State<AppState>,
    Json(req): Json<RegistrationRequest>,
) -> impl IntoResponse {
    match RegistrationDto::create(&state.pool, &req).await {
        Ok(registration) => {
            tracing::info!(
                "Registration {} created for '{}'",
                registration.id,
                registration.email
            );
            queue_confirmation_email(state.mailer.clone(), &registration);
            (
                StatusCode::OK,
                Json(RegistrationResponse {
                    success: true,
                    message: "Registration created successfully".to_string(),
                    registration: Some(registration),
                    ..Default::default()
                }),
            )
        }
        Err(e) => {
            // classroom_id/course_id 指向不存在的记录时由外键约束拦下
            let status = if e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (
                status,
                Json(RegistrationResponse {
                    success: false,
                    message: format!("Error creating registration: {}", e),
                    ..Default::default()
                }),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match RegistrationDto::delete(&state.pool, id).await {
        Ok(true) => {
            tracing::info!("Registration {} deleted", id);
            (
                StatusCode::OK,
                Json(RegistrationResponse {
                    success: true,
                    message: "Registration deleted successfully".to_string(),
                    ..Default::default()
                }),
            )
        }
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(RegistrationResponse {
                success: false,
                message: format!("Registration with id '{}' not found", id),
                ..Default::default()
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RegistrationResponse {
                success: false,
                message: format!("Error deleting registration: {}", e),
                ..Default::default()
            }),
        ),
    }
}

// 确认邮件在后台补发，入队失败只记日志，不影响报名结果
fn queue_confirmation_email(mailer: Mailer, registration: &RegistrationDto) {
    let html = enrollment_confirmation(&EnrollmentEmail {
        full_name: &registration.full_name,
        email: &registration.email,
        phone_number: &registration.phone_number,
        classroom_name: &registration.classroom_name,
        course_name: &registration.course_name,
        note: registration.note.as_deref(),
    });
    let request = Mailer::build_queue_request(
        ENROLLMENT_SUBJECT,
        ENROLLMENT_SUBJECT,
        &html,
        None,
        &registration.email,
        false,
    );
    let email = registration.email.clone();

    tokio::spawn(async move {
        match mailer.send_queue(&request).await {
            Ok(reply) if (200..300).contains(&reply.status) => {
                tracing::info!("Confirmation email queued for {}", email);
            }
            Ok(reply) => {
                tracing::warn!(
                    "Mail queue rejected confirmation for {}: HTTP {}",
                    email,
                    reply.status
                );
            }
            Err(e) => {
                tracing::error!("Failed to queue confirmation email for {}: {}", email, e);
            }
        }
    });
}
