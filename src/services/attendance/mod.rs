pub mod records;
pub mod summaries;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::attendance::requests::{
    AttendanceListQuery, RecomputeSummaryRequest, RecordAttendanceRequest, SummaryListQuery,
    UpdateAttendanceRequest,
};

super::lazy_storage_service!(AttendanceService);

impl AttendanceService {
    /// 按年级批量记录出勤
    pub async fn record_attendance(
        &self,
        body: RecordAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        records::record_attendance(self, body, request).await
    }

    pub async fn get_attendance(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        records::get_attendance(self, id, request).await
    }

    pub async fn list_attendance(
        &self,
        query: AttendanceListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        records::list_attendance(self, query, request).await
    }

    pub async fn update_attendance(
        &self,
        id: i64,
        body: UpdateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        records::update_attendance(self, id, body, request).await
    }

    pub async fn delete_attendance(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        records::delete_attendance(self, id, request).await
    }

    pub async fn recompute_summaries(
        &self,
        body: RecomputeSummaryRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summaries::recompute_summaries(self, body, request).await
    }

    pub async fn list_summaries(
        &self,
        query: SummaryListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summaries::list_summaries(self, query, request).await
    }
}
