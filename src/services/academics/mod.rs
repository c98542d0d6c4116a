pub mod calendar;
pub mod curriculum;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::academics::requests::{
    ClassAssignmentListQuery, CreateClassAssignmentRequest, CreatePeriodRequest,
    CreateSubjectRequest, CreateTermRequest, PeriodListQuery, SubjectListQuery, TermListQuery,
    UpdateClassAssignmentRequest, UpdatePeriodRequest, UpdateSubjectRequest, UpdateTermRequest,
};

super::lazy_storage_service!(AcademicService);

impl AcademicService {
    // 科目
    pub async fn create_subject(
        &self,
        body: CreateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        curriculum::create_subject(self, body, request).await
    }

    pub async fn get_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        curriculum::get_subject(self, id, request).await
    }

    pub async fn list_subjects(
        &self,
        query: SubjectListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        curriculum::list_subjects(self, query, request).await
    }

    pub async fn update_subject(
        &self,
        id: i64,
        body: UpdateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        curriculum::update_subject(self, id, body, request).await
    }

    pub async fn delete_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        curriculum::delete_subject(self, id, request).await
    }

    // 授课安排
    pub async fn create_class_assignment(
        &self,
        body: CreateClassAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        curriculum::create_class_assignment(self, body, request).await
    }

    pub async fn get_class_assignment(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        curriculum::get_class_assignment(self, id, request).await
    }

    pub async fn list_class_assignments(
        &self,
        query: ClassAssignmentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        curriculum::list_class_assignments(self, query, request).await
    }

    pub async fn update_class_assignment(
        &self,
        id: i64,
        body: UpdateClassAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        curriculum::update_class_assignment(self, id, body, request).await
    }

    pub async fn delete_class_assignment(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        curriculum::delete_class_assignment(self, id, request).await
    }

    // 学期
    pub async fn create_term(
        &self,
        body: CreateTermRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        calendar::create_term(self, body, request).await
    }

    pub async fn get_term(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        calendar::get_term(self, id, request).await
    }

    pub async fn get_active_term(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        calendar::get_active_term(self, request).await
    }

    pub async fn list_terms(
        &self,
        query: TermListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        calendar::list_terms(self, query, request).await
    }

    pub async fn update_term(
        &self,
        id: i64,
        body: UpdateTermRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        calendar::update_term(self, id, body, request).await
    }

    pub async fn delete_term(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        calendar::delete_term(self, id, request).await
    }

    // 考勤周期
    pub async fn create_period(
        &self,
        body: CreatePeriodRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        calendar::create_period(self, body, request).await
    }

    pub async fn get_period(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        calendar::get_period(self, id, request).await
    }

    pub async fn list_periods(
        &self,
        query: PeriodListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        calendar::list_periods(self, query, request).await
    }

    pub async fn update_period(
        &self,
        id: i64,
        body: UpdatePeriodRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        calendar::update_period(self, id, body, request).await
    }

    pub async fn delete_period(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        calendar::delete_period(self, id, request).await
    }

    /// 表单联动：按学期加载考勤周期选项
    pub async fn load_periods(
        &self,
        term_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        calendar::load_periods(self, term_id, request).await
    }
}
