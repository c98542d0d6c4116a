use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;
use std::sync::Arc;

use super::SystemService;
use crate::entity::school_configuration::SINGLETON_ID;
use crate::models::audit::entities::AuditAction;
use crate::models::system::entities::{GradingSystem, SchoolConfiguration};
use crate::models::system::requests::UpdateSchoolConfigurationRequest;
use crate::models::system::responses::SystemInfoResponse;
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::{bad_request, current_user, storage_error};
use crate::storage::Storage;

/// 读取学校配置；不存在时按配置文件的默认值创建
async fn load_configuration(
    service: &SystemService,
    storage: &Arc<dyn Storage>,
) -> Result<SchoolConfiguration, HttpResponse> {
    match storage.get_school_configuration().await {
        Ok(Some(configuration)) => Ok(configuration),
        Ok(None) => {
            let school = &service.get_config().school;
            let grading_system = school
                .default_grading_system
                .parse()
                .unwrap_or(GradingSystem::Ges);
            storage
                .ensure_school_configuration(&school.name, grading_system)
                .await
                .map_err(|e| storage_error("Failed to initialise school configuration", e))
        }
        Err(e) => Err(storage_error("Failed to get school configuration", e)),
    }
}

pub async fn get_info(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let school = match load_configuration(service, &storage).await {
        Ok(configuration) => configuration,
        Err(resp) => return Ok(resp),
    };

    let config = service.get_config();
    let response = SystemInfoResponse {
        system_name: config.app.system_name.clone(),
        school,
        environment: config.app.environment.clone(),
        log_level: config.app.log_level.clone(),
        fee_grace_days: config.school.fee_grace_days,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "System info retrieved successfully",
    )))
}

pub async fn get_configuration(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_configuration(service, &storage).await {
        Ok(configuration) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            configuration,
            "School configuration retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}

pub async fn update_configuration(
    service: &SystemService,
    body: UpdateSchoolConfigurationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if body
        .school_name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        return Ok(bad_request(
            ErrorCode::ValidationFailed,
            "School name cannot be empty",
        ));
    }
    let storage = service.get_storage(request);

    let current = match load_configuration(service, &storage).await {
        Ok(configuration) => configuration,
        Err(resp) => return Ok(resp),
    };
    if let Err(msg) = current.check_update(body.grading_system) {
        return Ok(bad_request(ErrorCode::ConfigurationLocked, msg));
    }

    let details = json!({
        "grading_system": body.grading_system.map(|g| g.as_str()),
        "is_locked": body.is_locked,
    });
    match storage.update_school_configuration(body, actor.id).await {
        Ok(configuration) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::SchoolConfiguration, SINGLETON_ID),
                    configuration.school_name.clone(),
                )
                .with_details(details),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                configuration,
                "School configuration updated successfully",
            )))
        }
        Err(e) => Ok(storage_error("Failed to update school configuration", e)),
    }
}
