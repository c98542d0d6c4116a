use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::UserService;
use crate::models::audit::entities::AuditAction;
use crate::models::{
    ApiResponse, ErrorCode, TargetKind, TargetRef,
    users::{requests::CreateUserRequest, responses::UserResponse},
};
use crate::services::activity::{self, Activity};
use crate::services::{bad_request, current_user, storage_error};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_email, validate_password_simple, validate_phone, validate_username,
};

/// 校验账号字段并把明文密码替换为哈希
pub(crate) fn prepare_account(user_data: &mut CreateUserRequest) -> Result<(), HttpResponse> {
    validate_username(&user_data.username)
        .map_err(|msg| bad_request(ErrorCode::UserNameInvalid, msg))?;

    if !user_data.email.is_empty() {
        validate_email(&user_data.email)
            .map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;
    }

    if let Some(phone) = &user_data.phone_number {
        validate_phone(phone).map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    }

    validate_password_simple(&user_data.password)
        .map_err(|msg| bad_request(ErrorCode::UserPasswordInvalid, msg))?;

    user_data.password = hash_password(&user_data.password).map_err(|e| {
        error!("Password hashing failed: {}", e);
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            "Password hashing failed",
        ))
    })?;
    Ok(())
}

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = prepare_account(&mut user_data) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    match storage.create_user(user_data).await {
        Ok(user) => {
            info!("Account {} created by {}", user.username, actor.username);
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    TargetRef::new(TargetKind::Account, user.id),
                    user.username.clone(),
                ),
            )
            .await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(UserResponse { user }, "Account created successfully")))
        }
        Err(e) => Ok(storage_error("Account creation failed", e)),
    }
}
