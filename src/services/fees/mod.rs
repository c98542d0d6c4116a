pub mod categories;
pub mod ledger;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::fees::requests::{
    CreateFeeCategoryRequest, CreateFeeRequest, FeeCategoryListQuery, FeeListQuery,
    FeeSummaryQuery, RecordPaymentRequest, UpdateFeeCategoryRequest, UpdateFeeRequest,
};

super::lazy_storage_service!(FeeService);

impl FeeService {
    pub async fn create_category(
        &self,
        body: CreateFeeCategoryRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        categories::create_category(self, body, request).await
    }

    pub async fn get_category(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        categories::get_category(self, id, request).await
    }

    pub async fn list_categories(
        &self,
        query: FeeCategoryListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        categories::list_categories(self, query, request).await
    }

    pub async fn update_category(
        &self,
        id: i64,
        body: UpdateFeeCategoryRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        categories::update_category(self, id, body, request).await
    }

    pub async fn delete_category(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        categories::delete_category(self, id, request).await
    }

    pub async fn create_fee(
        &self,
        body: CreateFeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        ledger::create_fee(self, body, request).await
    }

    pub async fn get_fee(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        ledger::get_fee(self, id, request).await
    }

    pub async fn list_fees(
        &self,
        query: FeeListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        ledger::list_fees(self, query, request).await
    }

    pub async fn update_fee(
        &self,
        id: i64,
        body: UpdateFeeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        ledger::update_fee(self, id, body, request).await
    }

    pub async fn delete_fee(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        ledger::delete_fee(self, id, request).await
    }

    /// 登记缴费并重新推导费用状态
    pub async fn record_payment(
        &self,
        fee_id: i64,
        body: RecordPaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        ledger::record_payment(self, fee_id, body, request).await
    }

    pub async fn list_payments(
        &self,
        fee_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        ledger::list_payments(self, fee_id, request).await
    }

    pub async fn student_fee_summary(
        &self,
        student_id: i64,
        query: FeeSummaryQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        ledger::student_fee_summary(self, student_id, query, request).await
    }
}
