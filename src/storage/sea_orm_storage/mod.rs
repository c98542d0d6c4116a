//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod academics;
mod assessments;
mod attendance;
mod audit;
mod fees;
mod groups;
mod notifications;
mod students;
mod system;
mod teachers;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use crate::models::PaginationInfo;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, Select,
};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 按 URL 连接数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化，开启外键约束）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory")
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        // 内存库每个连接都是独立的数据库，只能使用单连接
        let max_connections = if in_memory { 1 } else { pool_size.max(1) };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(if in_memory {
                None
            } else {
                Some(Duration::from_secs(300))
            })
            .max_lifetime(if in_memory {
                None
            } else {
                Some(Duration::from_secs(1800))
            })
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(pool_size.min(5))
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 分页查询：返回当前页记录与分页信息
pub(crate) async fn paginate<E, C>(
    db: &C,
    select: Select<E>,
    page: u64,
    size: u64,
    context: &str,
) -> Result<(Vec<E::Model>, PaginationInfo)>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Sized + Send + Sync,
    C: ConnectionTrait,
{
    let paginator = select.paginate(db, size);
    let total = paginator
        .num_items()
        .await
        .map_err(|e| SchoolError::from_db(&format!("查询{context}总数失败"), e))?;
    let pages = paginator
        .num_pages()
        .await
        .map_err(|e| SchoolError::from_db(&format!("查询{context}页数失败"), e))?;
    let items = paginator
        .fetch_page(page - 1)
        .await
        .map_err(|e| SchoolError::from_db(&format!("查询{context}列表失败"), e))?;

    Ok((
        items,
        PaginationInfo {
            page: page as i64,
            page_size: size as i64,
            total: total as i64,
            total_pages: pages as i64,
        },
    ))
}

// Storage trait 实现
use crate::models::{
    TargetRef,
    academics::{
        entities::{AcademicTerm, AttendancePeriod, ClassAssignment, Subject},
        requests::{
            ClassAssignmentListQuery, CreateClassAssignmentRequest, CreatePeriodRequest,
            CreateSubjectRequest, CreateTermRequest, PeriodListQuery, SubjectListQuery,
            TermListQuery, UpdateClassAssignmentRequest, UpdatePeriodRequest,
            UpdateSubjectRequest, UpdateTermRequest,
        },
        responses::{
            ClassAssignmentListResponse, PeriodListResponse, SubjectListResponse,
            TermListResponse,
        },
    },
    assessments::{
        entities::{Assignment, Grade, ReportCard, StudentAssignment},
        requests::{
            AssignmentListQuery, CreateAssignmentRequest, CreateGradeRequest,
            GenerateReportCardRequest, GradeListQuery, GradeSubmissionRequest,
            ReportCardListQuery, StudentAssignmentListQuery, UpdateAssignmentRequest,
            UpdateGradeRequest, UpdateReportCardRequest,
        },
        responses::{
            AssignmentCreatedResponse, AssignmentListResponse, GradeListResponse,
            ReportCardDetail, ReportCardListResponse, StudentAssignmentListResponse,
        },
    },
    attendance::{
        entities::{AttendanceSummary, StudentAttendance},
        requests::{
            AttendanceListQuery, RecomputeSummaryRequest, RecordAttendanceRequest,
            SummaryListQuery, UpdateAttendanceRequest,
        },
        responses::{AttendanceListResponse, RecordAttendanceResponse, SummaryListResponse},
    },
    audit::{
        entities::{AdminActionLog, AuditLog, NewAdminActionLog, NewAuditLog},
        requests::{AdminLogListQuery, AuditLogListQuery},
        responses::{AdminLogListResponse, AuditLogListResponse},
    },
    fees::{
        entities::{Fee, FeeCategory, FeePayment},
        requests::{
            CreateFeeCategoryRequest, CreateFeeRequest, FeeCategoryListQuery, FeeListQuery,
            FeeSummaryQuery, RecordPaymentRequest, UpdateFeeCategoryRequest, UpdateFeeRequest,
        },
        responses::{
            FeeCategoryListResponse, FeeListResponse, PaymentRecordedResponse, StudentFeeSummary,
        },
    },
    groups::{
        entities::{Group, GroupDetail, Permission},
        requests::{GroupListQuery, PermissionListQuery},
        responses::GroupListResponse,
    },
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationListQuery},
        responses::NotificationListResponse,
    },
    students::{
        entities::{ParentGuardian, Student},
        requests::{
            CreateParentRequest, CreateStudentRequest, ParentListQuery, StudentListQuery,
            UpdateParentRequest, UpdateStudentRequest,
        },
        responses::{ParentListResponse, StudentListResponse},
    },
    system::{
        entities::{GradingSystem, SchoolConfiguration},
        requests::UpdateSchoolConfigurationRequest,
    },
    teachers::{
        entities::{Teacher, TeacherDetail},
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号管理方法
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }


    // 用户组与权限
    async fn create_group(&self, name: &str) -> Result<Group> {
        self.create_group_impl(name).await
    }

    async fn get_group_detail(&self, id: i64) -> Result<Option<GroupDetail>> {
        self.get_group_detail_impl(id).await
    }

    async fn list_groups_with_pagination(&self, query: GroupListQuery) -> Result<GroupListResponse> {
        self.list_groups_with_pagination_impl(query).await
    }

    async fn rename_group(&self, id: i64, name: &str) -> Result<Option<Group>> {
        self.rename_group_impl(id, name).await
    }

    async fn delete_group(&self, id: i64) -> Result<bool> {
        self.delete_group_impl(id).await
    }

    async fn set_group_permissions(&self, group_id: i64, permission_ids: Vec<i64>) -> Result<Vec<Permission>> {
        self.set_group_permissions_impl(group_id, permission_ids).await
    }

    async fn list_permissions(&self, query: PermissionListQuery) -> Result<Vec<Permission>> {
        self.list_permissions_impl(query).await
    }

    async fn seed_permissions(&self, permissions: Vec<(String, String, String)>) -> Result<u64> {
        self.seed_permissions_impl(permissions).await
    }

    async fn set_user_groups(&self, user_id: i64, group_ids: Vec<i64>) -> Result<Vec<Group>> {
        self.set_user_groups_impl(user_id, group_ids).await
    }

    async fn list_user_groups(&self, user_id: i64) -> Result<Vec<Group>> {
        self.list_user_groups_impl(user_id).await
    }

    async fn grant_user_permissions(&self, user_id: i64, permission_ids: Vec<i64>) -> Result<Vec<Permission>> {
        self.grant_user_permissions_impl(user_id, permission_ids).await
    }

    async fn revoke_user_permissions(&self, user_id: i64, permission_ids: Vec<i64>) -> Result<Vec<Permission>> {
        self.revoke_user_permissions_impl(user_id, permission_ids).await
    }

    async fn list_user_direct_permissions(&self, user_id: i64) -> Result<Vec<Permission>> {
        self.list_user_direct_permissions_impl(user_id).await
    }

    async fn list_effective_codenames(&self, user_id: i64) -> Result<Vec<String>> {
        self.list_effective_codenames_impl(user_id).await
    }

    async fn user_has_permission(&self, user_id: i64, content_type: &str, codename: &str) -> Result<bool> {
        self.user_has_permission_impl(user_id, content_type, codename).await
    }


    // 学生与家长
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn list_students_with_pagination(&self, query: StudentListQuery) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(&self, id: i64, update: UpdateStudentRequest) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn deactivate_student(&self, id: i64) -> Result<bool> {
        self.deactivate_student_impl(id).await
    }

    async fn list_guarded_student_ids(&self, parent_user_id: i64) -> Result<Vec<i64>> {
        self.list_guarded_student_ids_impl(parent_user_id).await
    }

    async fn create_parent(&self, req: CreateParentRequest, account: Option<CreateUserRequest>) -> Result<(ParentGuardian, Option<User>)> {
        self.create_parent_impl(req, account).await
    }

    async fn get_parent_by_id(&self, id: i64) -> Result<Option<ParentGuardian>> {
        self.get_parent_by_id_impl(id).await
    }

    async fn list_parents_with_pagination(&self, query: ParentListQuery) -> Result<ParentListResponse> {
        self.list_parents_with_pagination_impl(query).await
    }

    async fn update_parent(&self, id: i64, update: UpdateParentRequest) -> Result<Option<ParentGuardian>> {
        self.update_parent_impl(id, update).await
    }

    async fn delete_parent(&self, id: i64) -> Result<bool> {
        self.delete_parent_impl(id).await
    }

    async fn list_emergency_contacts(&self, student_id: i64) -> Result<Vec<ParentGuardian>> {
        self.list_emergency_contacts_impl(student_id).await
    }


    // 教师
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<TeacherDetail> {
        self.create_teacher_impl(req).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<TeacherDetail>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_user_id_impl(user_id).await
    }

    async fn list_teachers_with_pagination(&self, query: TeacherListQuery) -> Result<TeacherListResponse> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn update_teacher(&self, id: i64, update: UpdateTeacherRequest) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    async fn deactivate_teacher(&self, id: i64) -> Result<bool> {
        self.deactivate_teacher_impl(id).await
    }

    async fn set_teacher_subjects(&self, teacher_id: i64, subject_ids: Vec<i64>) -> Result<Vec<Subject>> {
        self.set_teacher_subjects_impl(teacher_id, subject_ids).await
    }

    async fn list_teacher_subjects(&self, teacher_id: i64) -> Result<Vec<Subject>> {
        self.list_teacher_subjects_impl(teacher_id).await
    }


    // 科目与授课安排
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(req).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects_with_pagination(&self, query: SubjectListQuery) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn update_subject(&self, id: i64, update: UpdateSubjectRequest) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    async fn create_class_assignment(&self, req: CreateClassAssignmentRequest) -> Result<ClassAssignment> {
        self.create_class_assignment_impl(req).await
    }

    async fn get_class_assignment_by_id(&self, id: i64) -> Result<Option<ClassAssignment>> {
        self.get_class_assignment_by_id_impl(id).await
    }

    async fn list_class_assignments_with_pagination(&self, query: ClassAssignmentListQuery) -> Result<ClassAssignmentListResponse> {
        self.list_class_assignments_with_pagination_impl(query).await
    }

    async fn update_class_assignment(&self, id: i64, update: UpdateClassAssignmentRequest) -> Result<Option<ClassAssignment>> {
        self.update_class_assignment_impl(id, update).await
    }

    async fn delete_class_assignment(&self, id: i64) -> Result<bool> {
        self.delete_class_assignment_impl(id).await
    }


    // 学期与考勤周期
    async fn create_term(&self, req: CreateTermRequest) -> Result<AcademicTerm> {
        self.create_term_impl(req).await
    }

    async fn get_term_by_id(&self, id: i64) -> Result<Option<AcademicTerm>> {
        self.get_term_by_id_impl(id).await
    }

    async fn get_active_term(&self) -> Result<Option<AcademicTerm>> {
        self.get_active_term_impl().await
    }

    async fn list_terms_with_pagination(&self, query: TermListQuery) -> Result<TermListResponse> {
        self.list_terms_with_pagination_impl(query).await
    }

    async fn update_term(&self, id: i64, update: UpdateTermRequest) -> Result<Option<AcademicTerm>> {
        self.update_term_impl(id, update).await
    }

    async fn delete_term(&self, id: i64) -> Result<bool> {
        self.delete_term_impl(id).await
    }

    async fn create_period(&self, req: CreatePeriodRequest) -> Result<AttendancePeriod> {
        self.create_period_impl(req).await
    }

    async fn get_period_by_id(&self, id: i64) -> Result<Option<AttendancePeriod>> {
        self.get_period_by_id_impl(id).await
    }

    async fn list_periods_with_pagination(&self, query: PeriodListQuery) -> Result<PeriodListResponse> {
        self.list_periods_with_pagination_impl(query).await
    }

    async fn update_period(&self, id: i64, update: UpdatePeriodRequest) -> Result<Option<AttendancePeriod>> {
        self.update_period_impl(id, update).await
    }

    async fn delete_period(&self, id: i64) -> Result<bool> {
        self.delete_period_impl(id).await
    }

    async fn load_periods(&self, term_id: i64) -> Result<Vec<AttendancePeriod>> {
        self.load_periods_impl(term_id).await
    }


    // 考勤
    async fn record_attendance(&self, req: RecordAttendanceRequest) -> Result<RecordAttendanceResponse> {
        self.record_attendance_impl(req).await
    }

    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<StudentAttendance>> {
        self.get_attendance_by_id_impl(id).await
    }

    async fn list_attendance_with_pagination(&self, query: AttendanceListQuery) -> Result<AttendanceListResponse> {
        self.list_attendance_with_pagination_impl(query).await
    }

    async fn update_attendance(&self, id: i64, update: UpdateAttendanceRequest) -> Result<Option<StudentAttendance>> {
        self.update_attendance_impl(id, update).await
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        self.delete_attendance_impl(id).await
    }

    async fn recompute_summaries(&self, req: RecomputeSummaryRequest) -> Result<Vec<AttendanceSummary>> {
        self.recompute_summaries_impl(req).await
    }

    async fn list_summaries_with_pagination(&self, query: SummaryListQuery) -> Result<SummaryListResponse> {
        self.list_summaries_with_pagination_impl(query).await
    }


    // 费用
    async fn create_fee_category(&self, req: CreateFeeCategoryRequest) -> Result<FeeCategory> {
        self.create_fee_category_impl(req).await
    }

    async fn get_fee_category_by_id(&self, id: i64) -> Result<Option<FeeCategory>> {
        self.get_fee_category_by_id_impl(id).await
    }

    async fn list_fee_categories_with_pagination(&self, query: FeeCategoryListQuery) -> Result<FeeCategoryListResponse> {
        self.list_fee_categories_with_pagination_impl(query).await
    }

    async fn update_fee_category(&self, id: i64, update: UpdateFeeCategoryRequest) -> Result<Option<FeeCategory>> {
        self.update_fee_category_impl(id, update).await
    }

    async fn delete_fee_category(&self, id: i64) -> Result<bool> {
        self.delete_fee_category_impl(id).await
    }

    async fn create_fee(&self, req: CreateFeeRequest) -> Result<Fee> {
        self.create_fee_impl(req).await
    }

    async fn get_fee_by_id(&self, id: i64) -> Result<Option<Fee>> {
        self.get_fee_by_id_impl(id).await
    }

    async fn list_fees_with_pagination(&self, query: FeeListQuery) -> Result<FeeListResponse> {
        self.list_fees_with_pagination_impl(query).await
    }

    async fn update_fee(&self, id: i64, update: UpdateFeeRequest) -> Result<Option<Fee>> {
        self.update_fee_impl(id, update).await
    }

    async fn delete_fee(&self, id: i64) -> Result<bool> {
        self.delete_fee_impl(id).await
    }

    async fn record_payment(&self, fee_id: i64, req: RecordPaymentRequest) -> Result<Option<PaymentRecordedResponse>> {
        self.record_payment_impl(fee_id, req).await
    }

    async fn list_fee_payments(&self, fee_id: i64) -> Result<Vec<FeePayment>> {
        self.list_fee_payments_impl(fee_id).await
    }

    async fn get_student_fee_summary(&self, student_id: i64, query: FeeSummaryQuery) -> Result<StudentFeeSummary> {
        self.get_student_fee_summary_impl(student_id, query).await
    }


    // 作业、成绩与成绩单
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<AssignmentCreatedResponse> {
        self.create_assignment_impl(req).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_with_pagination(&self, query: AssignmentListQuery) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn update_assignment(&self, id: i64, update: UpdateAssignmentRequest) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    async fn list_student_assignments_with_pagination(&self, query: StudentAssignmentListQuery) -> Result<StudentAssignmentListResponse> {
        self.list_student_assignments_with_pagination_impl(query).await
    }

    async fn get_student_assignment_by_id(&self, id: i64) -> Result<Option<StudentAssignment>> {
        self.get_student_assignment_by_id_impl(id).await
    }

    async fn submit_student_assignment(&self, id: i64, submitted_on: NaiveDate) -> Result<Option<StudentAssignment>> {
        self.submit_student_assignment_impl(id, submitted_on).await
    }

    async fn grade_student_assignment(&self, id: i64, req: GradeSubmissionRequest) -> Result<Option<StudentAssignment>> {
        self.grade_student_assignment_impl(id, req).await
    }

    async fn create_grade(&self, req: CreateGradeRequest) -> Result<Grade> {
        self.create_grade_impl(req).await
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn list_grades_with_pagination(&self, query: GradeListQuery) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn update_grade(&self, id: i64, update: UpdateGradeRequest) -> Result<Option<Grade>> {
        self.update_grade_impl(id, update).await
    }

    async fn delete_grade(&self, id: i64) -> Result<bool> {
        self.delete_grade_impl(id).await
    }

    async fn generate_report_card(&self, req: GenerateReportCardRequest) -> Result<ReportCard> {
        self.generate_report_card_impl(req).await
    }

    async fn get_report_card_detail(&self, id: i64) -> Result<Option<ReportCardDetail>> {
        self.get_report_card_detail_impl(id).await
    }

    async fn list_report_cards_with_pagination(&self, query: ReportCardListQuery) -> Result<ReportCardListResponse> {
        self.list_report_cards_with_pagination_impl(query).await
    }

    async fn update_report_card(&self, id: i64, update: UpdateReportCardRequest) -> Result<Option<ReportCard>> {
        self.update_report_card_impl(id, update).await
    }

    async fn set_report_card_published(&self, id: i64, is_published: bool) -> Result<Option<ReportCard>> {
        self.set_report_card_published_impl(id, is_published).await
    }

    async fn delete_report_card(&self, id: i64) -> Result<bool> {
        self.delete_report_card_impl(id).await
    }


    // 通知
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification> {
        self.create_notification_impl(req).await
    }

    async fn list_notifications_with_pagination(&self, recipient_id: i64, query: NotificationListQuery) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(recipient_id, query).await
    }

    async fn count_unread_notifications(&self, recipient_id: i64) -> Result<i64> {
        self.count_unread_notifications_impl(recipient_id).await
    }

    async fn mark_notification_read(&self, recipient_id: i64, id: i64) -> Result<bool> {
        self.mark_notification_read_impl(recipient_id, id).await
    }

    async fn mark_all_notifications_read(&self, recipient_id: i64) -> Result<i64> {
        self.mark_all_notifications_read_impl(recipient_id).await
    }

    async fn delete_notification(&self, recipient_id: i64, id: i64) -> Result<bool> {
        self.delete_notification_impl(recipient_id, id).await
    }


    // 审计与管理日志
    async fn create_audit_log(&self, log: NewAuditLog) -> Result<AuditLog> {
        self.create_audit_log_impl(log).await
    }

    async fn list_audit_logs_with_pagination(&self, query: AuditLogListQuery) -> Result<AuditLogListResponse> {
        self.list_audit_logs_with_pagination_impl(query).await
    }

    async fn create_admin_action_log(&self, log: NewAdminActionLog) -> Result<AdminActionLog> {
        self.create_admin_action_log_impl(log).await
    }

    async fn list_admin_action_logs_with_pagination(&self, query: AdminLogListQuery) -> Result<AdminLogListResponse> {
        self.list_admin_action_logs_with_pagination_impl(query).await
    }


    // 学校配置
    async fn ensure_school_configuration(&self, school_name: &str, grading_system: GradingSystem) -> Result<SchoolConfiguration> {
        self.ensure_school_configuration_impl(school_name, grading_system).await
    }

    async fn get_school_configuration(&self) -> Result<Option<SchoolConfiguration>> {
        self.get_school_configuration_impl().await
    }

    async fn update_school_configuration(&self, update: UpdateSchoolConfigurationRequest, updated_by: i64) -> Result<SchoolConfiguration> {
        self.update_school_configuration_impl(update, updated_by).await
    }

    async fn target_exists(&self, target: TargetRef) -> Result<bool> {
        self.target_exists_impl(target).await
    }
}
