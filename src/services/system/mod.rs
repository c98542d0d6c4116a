pub mod configuration;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::system::requests::UpdateSchoolConfigurationRequest;

super::lazy_storage_service!(SystemService);

impl SystemService {
    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 系统信息（公开）
    pub async fn get_info(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        configuration::get_info(self, request).await
    }

    pub async fn get_configuration(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        configuration::get_configuration(self, request).await
    }

    pub async fn update_configuration(
        &self,
        body: UpdateSchoolConfigurationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        configuration::update_configuration(self, body, request).await
    }
}
