use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::audit::entities::AuditAction;
use crate::models::{
    ApiResponse, ErrorCode, TargetKind, TargetRef,
    users::{requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::activity::{self, Activity};
use crate::services::{bad_request, current_user, not_found, storage_error};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_phone};

fn changed_fields(update: &UpdateUserRequest) -> Vec<&'static str> {
    [
        ("email", update.email.is_some()),
        ("password", update.password.is_some()),
        ("first_name", update.first_name.is_some()),
        ("last_name", update.last_name.is_some()),
        ("phone_number", update.phone_number.is_some()),
        ("address", update.address.is_some()),
        ("date_of_birth", update.date_of_birth.is_some()),
        ("role", update.role.is_some()),
        ("is_staff", update.is_staff.is_some()),
        ("is_active", update.is_active.is_some()),
    ]
    .into_iter()
    .filter_map(|(name, set)| set.then_some(name))
    .collect()
}

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Some(email) = &update_data.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }
    if let Some(phone) = &update_data.phone_number
        && let Err(msg) = validate_phone(phone)
    {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }
    // 不能停用自己
    if user_id == actor.id && update_data.is_active == Some(false) {
        return Ok(bad_request(
            ErrorCode::CanNotDeleteCurrentUser,
            "Cannot deactivate the current account",
        ));
    }

    let fields = changed_fields(&update_data);

    if let Some(password) = update_data.password.take() {
        if let Err(msg) = validate_password_simple(&password) {
            return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
        }
        match hash_password(&password) {
            Ok(hash) => update_data.password = Some(hash),
            Err(e) => {
                tracing::error!("Password hashing failed: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Password hashing failed",
                    )),
                );
            }
        }
    }

    let storage = service.get_storage(request);

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            // 缓存中的会话携带旧的账号信息
            RequireJWT::drop_sessions(request, user.id).await;
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::Account, user.id),
                    user.username.clone(),
                )
                .with_details(json!({ "fields": fields })),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "Account updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "Account not found")),
        Err(e) => Ok(storage_error("Failed to update account", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_fields_never_leaks_values() {
        let update = UpdateUserRequest {
            password: Some("Secret#123".to_string()),
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(changed_fields(&update), vec!["password", "is_active"]);
    }
}
