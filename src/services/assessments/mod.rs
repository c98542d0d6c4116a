pub mod assignments;
pub mod grades;
pub mod report_cards;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::assessments::requests::{
    AssignmentListQuery, CreateAssignmentRequest, CreateGradeRequest, GenerateReportCardRequest,
    GradeListQuery, GradeSubmissionRequest, ReportCardListQuery, StudentAssignmentListQuery,
    SubmitAssignmentRequest, UpdateAssignmentRequest, UpdateGradeRequest, UpdateReportCardRequest,
};

super::lazy_storage_service!(AssessmentService);

impl AssessmentService {
    // 作业
    pub async fn create_assignment(
        &self,
        body: CreateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::create_assignment(self, body, request).await
    }

    pub async fn get_assignment(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        assignments::get_assignment(self, id, request).await
    }

    pub async fn list_assignments(
        &self,
        query: AssignmentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::list_assignments(self, query, request).await
    }

    pub async fn update_assignment(
        &self,
        id: i64,
        body: UpdateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::update_assignment(self, id, body, request).await
    }

    pub async fn delete_assignment(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::delete_assignment(self, id, request).await
    }

    // 学生提交
    pub async fn list_submissions(
        &self,
        assignment_id: i64,
        query: StudentAssignmentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::list_submissions(self, assignment_id, query, request).await
    }

    pub async fn get_submission(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        assignments::get_submission(self, id, request).await
    }

    pub async fn submit_assignment(
        &self,
        id: i64,
        body: SubmitAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::submit_assignment(self, id, body, request).await
    }

    pub async fn grade_submission(
        &self,
        id: i64,
        body: GradeSubmissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::grade_submission(self, id, body, request).await
    }

    // 成绩
    pub async fn create_grade(
        &self,
        body: CreateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grades::create_grade(self, body, request).await
    }

    pub async fn get_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        grades::get_grade(self, id, request).await
    }

    pub async fn list_grades(
        &self,
        query: GradeListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grades::list_grades(self, query, request).await
    }

    pub async fn update_grade(
        &self,
        id: i64,
        body: UpdateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grades::update_grade(self, id, body, request).await
    }

    pub async fn delete_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        grades::delete_grade(self, id, request).await
    }

    // 成绩单
    pub async fn generate_report_card(
        &self,
        body: GenerateReportCardRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report_cards::generate_report_card(self, body, request).await
    }

    pub async fn get_report_card(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report_cards::get_report_card(self, id, request).await
    }

    pub async fn list_report_cards(
        &self,
        query: ReportCardListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report_cards::list_report_cards(self, query, request).await
    }

    pub async fn update_report_card(
        &self,
        id: i64,
        body: UpdateReportCardRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report_cards::update_report_card(self, id, body, request).await
    }

    pub async fn set_report_card_published(
        &self,
        id: i64,
        published: bool,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report_cards::set_published(self, id, published, request).await
    }

    pub async fn delete_report_card(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report_cards::delete_report_card(self, id, request).await
    }
}
