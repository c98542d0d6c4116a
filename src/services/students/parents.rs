use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::StudentService;
use crate::models::audit::entities::AuditAction;
use crate::models::students::requests::{
    CreateParentRequest, ParentListQuery, UpdateParentRequest,
};
use crate::models::students::responses::{GeneratedAccount, ParentCreatedResponse};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::scope::{ensure_student_visible, narrow, visible_student_ids};
use crate::services::{bad_request, current_user, not_found, storage_error};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::{
    generate_initial_password, username_base_from_email, username_with_suffix,
};
use crate::utils::validate::{validate_email, validate_phone};

const INITIAL_PASSWORD_LEN: usize = 12;
const MAX_USERNAME_ATTEMPTS: u32 = 100;

fn parent_target(id: i64) -> TargetRef {
    TargetRef::new(TargetKind::ParentGuardian, id)
}

fn check_contact(phone: Option<&str>, email: Option<&str>) -> Result<(), HttpResponse> {
    if let Some(phone) = phone {
        validate_phone(phone).map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    }
    if let Some(email) = email {
        validate_email(email).map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;
    }
    Ok(())
}

/// 在邮箱本地部分后追加数字直到用户名未被占用
async fn free_username(storage: &Arc<dyn Storage>, email: &str) -> Result<String, HttpResponse> {
    let base = username_base_from_email(email);
    for n in 0..MAX_USERNAME_ATTEMPTS {
        let candidate = username_with_suffix(&base, n);
        match storage.get_user_by_username(&candidate).await {
            Ok(None) => return Ok(candidate),
            Ok(Some(_)) => continue,
            Err(e) => return Err(storage_error("Failed to check username", e)),
        }
    }
    Err(bad_request(
        ErrorCode::UserNameInvalid,
        "Unable to derive a free username from the email address",
    ))
}

/// 为没有账号的家长生成账号请求与明文初始密码
async fn parent_account(
    storage: &Arc<dyn Storage>,
    body: &CreateParentRequest,
    email: &str,
) -> Result<(CreateUserRequest, String), HttpResponse> {
    let username = free_username(storage, email).await?;
    let initial_password = generate_initial_password(INITIAL_PASSWORD_LEN);
    let password = hash_password(&initial_password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            "Password hashing failed",
        ))
    })?;

    let mut names = body.full_name.split_whitespace();
    let first_name = names.next().unwrap_or_default().to_string();
    let last_name = names.collect::<Vec<_>>().join(" ");

    Ok((
        CreateUserRequest {
            username,
            email: email.to_string(),
            password,
            first_name,
            last_name,
            phone_number: Some(body.phone_number.clone()),
            address: body.address.clone(),
            date_of_birth: None,
            role: UserRole::Parent,
            is_staff: false,
            is_superuser: false,
        },
        initial_password,
    ))
}

pub async fn create_parent(
    service: &StudentService,
    body: CreateParentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if body.full_name.trim().is_empty() {
        return Ok(bad_request(ErrorCode::ValidationFailed, "Full name is required"));
    }
    if body.emergency_contact_priority < 0 {
        return Ok(bad_request(
            ErrorCode::ValidationFailed,
            "Emergency contact priority cannot be negative",
        ));
    }
    if let Err(resp) = check_contact(Some(&body.phone_number), body.email.as_deref()) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    let mut initial_password = None;
    let account = match (&body.user_id, &body.email) {
        (None, Some(email)) => match parent_account(&storage, &body, email).await {
            Ok((account, password)) => {
                initial_password = Some(password);
                Some(account)
            }
            Err(resp) => return Ok(resp),
        },
        _ => None,
    };

    match storage.create_parent(body, account).await {
        Ok((parent, created_user)) => {
            let generated_account = created_user.zip(initial_password).map(|(user, password)| {
                info!("Parent account {} generated", user.username);
                GeneratedAccount {
                    user_id: user.id,
                    username: user.username,
                    initial_password: password,
                }
            });
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    parent_target(parent.id),
                    parent.full_name.clone(),
                ),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ParentCreatedResponse {
                    parent,
                    generated_account,
                },
                "Parent created successfully",
            )))
        }
        Err(e) => Ok(storage_error("Parent creation failed", e)),
    }
}

pub async fn get_parent(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let parent = match storage.get_parent_by_id(id).await {
        Ok(Some(parent)) => parent,
        Ok(None) => return Ok(not_found(ErrorCode::ParentNotFound, "Parent not found")),
        Err(e) => return Ok(storage_error("Failed to get parent", e)),
    };
    if let Err(resp) = ensure_student_visible(&storage, &user, parent.student_id).await {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(parent, "Parent retrieved successfully")))
}

pub async fn list_parents(
    service: &StudentService,
    mut query: ParentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    query.student_ids = match visible_student_ids(&storage, &user).await {
        Ok(visible) => narrow(query.student_id, visible),
        Err(resp) => return Ok(resp),
    };

    match storage.list_parents_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Parent list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list parents", e)),
    }
}

pub async fn update_parent(
    service: &StudentService,
    id: i64,
    body: UpdateParentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = check_contact(body.phone_number.as_deref(), body.email.as_deref()) {
        return Ok(resp);
    }
    if body.emergency_contact_priority.is_some_and(|p| p < 0) {
        return Ok(bad_request(
            ErrorCode::ValidationFailed,
            "Emergency contact priority cannot be negative",
        ));
    }
    let storage = service.get_storage(request);

    match storage.update_parent(id, body).await {
        Ok(Some(parent)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    parent_target(parent.id),
                    parent.full_name.clone(),
                ),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(parent, "Parent updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::ParentNotFound, "Parent not found")),
        Err(e) => Ok(storage_error("Failed to update parent", e)),
    }
}

pub async fn delete_parent(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_parent(id).await {
        Ok(true) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(AuditAction::Delete, parent_target(id), format!("Parent #{id}")),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Parent deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ParentNotFound, "Parent not found")),
        Err(e) => Ok(storage_error("Failed to delete parent", e)),
    }
}

pub async fn list_emergency_contacts(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = ensure_student_visible(&storage, &user, student_id).await {
        return Ok(resp);
    }

    match storage.get_student_by_id(student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(storage_error("Failed to get student", e)),
    }

    match storage.list_emergency_contacts(student_id).await {
        Ok(contacts) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            contacts,
            "Emergency contacts retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list emergency contacts", e)),
    }
}
