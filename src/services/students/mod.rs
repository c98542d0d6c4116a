pub mod parents;
pub mod profiles;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::students::requests::{
    CreateParentRequest, CreateStudentRequest, ParentListQuery, StudentListQuery,
    UpdateParentRequest, UpdateStudentRequest,
};

super::lazy_storage_service!(StudentService);

impl StudentService {
    pub async fn create_student(
        &self,
        body: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::create_student(self, body, request).await
    }

    pub async fn get_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profiles::get_student(self, id, request).await
    }

    pub async fn list_students(
        &self,
        query: StudentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::list_students(self, query, request).await
    }

    pub async fn update_student(
        &self,
        id: i64,
        body: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::update_student(self, id, body, request).await
    }

    // 软删除
    pub async fn deactivate_student(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profiles::deactivate_student(self, id, request).await
    }

    pub async fn create_parent(
        &self,
        body: CreateParentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        parents::create_parent(self, body, request).await
    }

    pub async fn get_parent(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        parents::get_parent(self, id, request).await
    }

    pub async fn list_parents(
        &self,
        query: ParentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        parents::list_parents(self, query, request).await
    }

    pub async fn update_parent(
        &self,
        id: i64,
        body: UpdateParentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        parents::update_parent(self, id, body, request).await
    }

    pub async fn delete_parent(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        parents::delete_parent(self, id, request).await
    }

    // 按优先级排列的紧急联系人
    pub async fn list_emergency_contacts(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        parents::list_emergency_contacts(self, student_id, request).await
    }
}
