pub mod profiles;
pub mod subjects;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::teachers::requests::{
    CreateTeacherRequest, SetTeacherSubjectsRequest, TeacherListQuery, UpdateTeacherRequest,
};

super::lazy_storage_service!(TeacherService);

impl TeacherService {
    pub async fn create_teacher(
        &self,
        body: CreateTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::create_teacher(self, body, request).await
    }

    pub async fn get_teacher(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profiles::get_teacher(self, id, request).await
    }

    pub async fn list_teachers(
        &self,
        query: TeacherListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::list_teachers(self, query, request).await
    }

    pub async fn update_teacher(
        &self,
        id: i64,
        body: UpdateTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::update_teacher(self, id, body, request).await
    }

    pub async fn deactivate_teacher(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::deactivate_teacher(self, id, request).await
    }

    // 替换任教科目
    pub async fn set_teacher_subjects(
        &self,
        id: i64,
        body: SetTeacherSubjectsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::set_teacher_subjects(self, id, body, request).await
    }

    pub async fn list_teacher_subjects(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::list_teacher_subjects(self, id, request).await
    }
}
