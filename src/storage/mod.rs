use std::sync::Arc;

use chrono::NaiveDate;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法
    // 创建账号（password 字段已是哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取账号
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取账号
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取账号
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出账号
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新账号
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除账号
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 账号总数
    async fn count_users(&self) -> Result<u64>;

    /// 用户组与权限
    async fn create_group(&self, name: &str) -> Result<Group>;
    async fn get_group_detail(&self, id: i64) -> Result<Option<GroupDetail>>;
    async fn list_groups_with_pagination(&self, query: GroupListQuery)
    -> Result<GroupListResponse>;
    async fn rename_group(&self, id: i64, name: &str) -> Result<Option<Group>>;
    async fn delete_group(&self, id: i64) -> Result<bool>;
    // 替换用户组的权限集合
    async fn set_group_permissions(
        &self,
        group_id: i64,
        permission_ids: Vec<i64>,
    ) -> Result<Vec<Permission>>;
    async fn list_permissions(&self, query: PermissionListQuery) -> Result<Vec<Permission>>;
    // 幂等写入权限行 (content_type, codename, name)，返回新增数量
    async fn seed_permissions(&self, permissions: Vec<(String, String, String)>) -> Result<u64>;
    // 替换账号所属用户组
    async fn set_user_groups(&self, user_id: i64, group_ids: Vec<i64>) -> Result<Vec<Group>>;
    async fn list_user_groups(&self, user_id: i64) -> Result<Vec<Group>>;
    async fn grant_user_permissions(
        &self,
        user_id: i64,
        permission_ids: Vec<i64>,
    ) -> Result<Vec<Permission>>;
    async fn revoke_user_permissions(
        &self,
        user_id: i64,
        permission_ids: Vec<i64>,
    ) -> Result<Vec<Permission>>;
    async fn list_user_direct_permissions(&self, user_id: i64) -> Result<Vec<Permission>>;
    // 直接授予与用户组继承的权限代码
    async fn list_effective_codenames(&self, user_id: i64) -> Result<Vec<String>>;
    async fn user_has_permission(
        &self,
        user_id: i64,
        content_type: &str,
        codename: &str,
    ) -> Result<bool>;

    /// 学生与家长
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn deactivate_student(&self, id: i64) -> Result<bool>;
    // 家长账号作为监护人关联的学生
    async fn list_guarded_student_ids(&self, parent_user_id: i64) -> Result<Vec<i64>>;
    // 创建家长；account 不为空时在同一事务中创建并关联账号
    async fn create_parent(
        &self,
        req: CreateParentRequest,
        account: Option<CreateUserRequest>,
    ) -> Result<(ParentGuardian, Option<User>)>;
    async fn get_parent_by_id(&self, id: i64) -> Result<Option<ParentGuardian>>;
    async fn list_parents_with_pagination(
        &self,
        query: ParentListQuery,
    ) -> Result<ParentListResponse>;
    async fn update_parent(
        &self,
        id: i64,
        update: UpdateParentRequest,
    ) -> Result<Option<ParentGuardian>>;
    async fn delete_parent(&self, id: i64) -> Result<bool>;
    async fn list_emergency_contacts(&self, student_id: i64) -> Result<Vec<ParentGuardian>>;

    /// 教师
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<TeacherDetail>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<TeacherDetail>>;
    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse>;
    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>>;
    async fn deactivate_teacher(&self, id: i64) -> Result<bool>;
    async fn set_teacher_subjects(
        &self,
        teacher_id: i64,
        subject_ids: Vec<i64>,
    ) -> Result<Vec<Subject>>;
    async fn list_teacher_subjects(&self, teacher_id: i64) -> Result<Vec<Subject>>;

    /// 科目与授课安排
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse>;
    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;
    async fn create_class_assignment(
        &self,
        req: CreateClassAssignmentRequest,
    ) -> Result<ClassAssignment>;
    async fn get_class_assignment_by_id(&self, id: i64) -> Result<Option<ClassAssignment>>;
    async fn list_class_assignments_with_pagination(
        &self,
        query: ClassAssignmentListQuery,
    ) -> Result<ClassAssignmentListResponse>;
    async fn update_class_assignment(
        &self,
        id: i64,
        update: UpdateClassAssignmentRequest,
    ) -> Result<Option<ClassAssignment>>;
    async fn delete_class_assignment(&self, id: i64) -> Result<bool>;

    /// 学期与考勤周期
    async fn create_term(&self, req: CreateTermRequest) -> Result<AcademicTerm>;
    async fn get_term_by_id(&self, id: i64) -> Result<Option<AcademicTerm>>;
    async fn get_active_term(&self) -> Result<Option<AcademicTerm>>;
    async fn list_terms_with_pagination(&self, query: TermListQuery) -> Result<TermListResponse>;
    async fn update_term(
        &self,
        id: i64,
        update: UpdateTermRequest,
    ) -> Result<Option<AcademicTerm>>;
    async fn delete_term(&self, id: i64) -> Result<bool>;
    async fn create_period(&self, req: CreatePeriodRequest) -> Result<AttendancePeriod>;
    async fn get_period_by_id(&self, id: i64) -> Result<Option<AttendancePeriod>>;
    async fn list_periods_with_pagination(
        &self,
        query: PeriodListQuery,
    ) -> Result<PeriodListResponse>;
    async fn update_period(
        &self,
        id: i64,
        update: UpdatePeriodRequest,
    ) -> Result<Option<AttendancePeriod>>;
    async fn delete_period(&self, id: i64) -> Result<bool>;
    // 某学期的全部考勤周期，按开始日期倒序
    async fn load_periods(&self, term_id: i64) -> Result<Vec<AttendancePeriod>>;

    /// 考勤
    // 批量写入出勤并在同一事务中重算汇总
    async fn record_attendance(
        &self,
        req: RecordAttendanceRequest,
    ) -> Result<RecordAttendanceResponse>;
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<StudentAttendance>>;
    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse>;
    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<StudentAttendance>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;
    async fn recompute_summaries(
        &self,
        req: RecomputeSummaryRequest,
    ) -> Result<Vec<AttendanceSummary>>;
    async fn list_summaries_with_pagination(
        &self,
        query: SummaryListQuery,
    ) -> Result<SummaryListResponse>;

    /// 费用
    async fn create_fee_category(&self, req: CreateFeeCategoryRequest) -> Result<FeeCategory>;
    async fn get_fee_category_by_id(&self, id: i64) -> Result<Option<FeeCategory>>;
    async fn list_fee_categories_with_pagination(
        &self,
        query: FeeCategoryListQuery,
    ) -> Result<FeeCategoryListResponse>;
    async fn update_fee_category(
        &self,
        id: i64,
        update: UpdateFeeCategoryRequest,
    ) -> Result<Option<FeeCategory>>;
    async fn delete_fee_category(&self, id: i64) -> Result<bool>;
    async fn create_fee(&self, req: CreateFeeRequest) -> Result<Fee>;
    async fn get_fee_by_id(&self, id: i64) -> Result<Option<Fee>>;
    async fn list_fees_with_pagination(&self, query: FeeListQuery) -> Result<FeeListResponse>;
    async fn update_fee(&self, id: i64, update: UpdateFeeRequest) -> Result<Option<Fee>>;
    async fn delete_fee(&self, id: i64) -> Result<bool>;
    // 登记缴费并重新推导费用状态（单事务）
    async fn record_payment(
        &self,
        fee_id: i64,
        req: RecordPaymentRequest,
    ) -> Result<Option<PaymentRecordedResponse>>;
    async fn list_fee_payments(&self, fee_id: i64) -> Result<Vec<FeePayment>>;
    async fn get_student_fee_summary(
        &self,
        student_id: i64,
        query: FeeSummaryQuery,
    ) -> Result<StudentFeeSummary>;

    /// 作业、成绩与成绩单
    // 创建作业并为年级内在读学生生成待提交记录
    async fn create_assignment(
        &self,
        req: CreateAssignmentRequest,
    ) -> Result<AssignmentCreatedResponse>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;
    async fn list_student_assignments_with_pagination(
        &self,
        query: StudentAssignmentListQuery,
    ) -> Result<StudentAssignmentListResponse>;
    async fn get_student_assignment_by_id(&self, id: i64) -> Result<Option<StudentAssignment>>;
    async fn submit_student_assignment(
        &self,
        id: i64,
        submitted_on: NaiveDate,
    ) -> Result<Option<StudentAssignment>>;
    async fn grade_student_assignment(
        &self,
        id: i64,
        req: GradeSubmissionRequest,
    ) -> Result<Option<StudentAssignment>>;
    async fn create_grade(&self, req: CreateGradeRequest) -> Result<Grade>;
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    async fn list_grades_with_pagination(&self, query: GradeListQuery)
    -> Result<GradeListResponse>;
    async fn update_grade(&self, id: i64, update: UpdateGradeRequest) -> Result<Option<Grade>>;
    async fn delete_grade(&self, id: i64) -> Result<bool>;
    // 生成或重新生成成绩单（按 学生+学年+学期 覆盖）
    async fn generate_report_card(&self, req: GenerateReportCardRequest) -> Result<ReportCard>;
    async fn get_report_card_detail(&self, id: i64) -> Result<Option<ReportCardDetail>>;
    async fn list_report_cards_with_pagination(
        &self,
        query: ReportCardListQuery,
    ) -> Result<ReportCardListResponse>;
    async fn update_report_card(
        &self,
        id: i64,
        update: UpdateReportCardRequest,
    ) -> Result<Option<ReportCard>>;
    async fn set_report_card_published(
        &self,
        id: i64,
        is_published: bool,
    ) -> Result<Option<ReportCard>>;
    async fn delete_report_card(&self, id: i64) -> Result<bool>;

    /// 通知
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification>;
    async fn list_notifications_with_pagination(
        &self,
        recipient_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    async fn count_unread_notifications(&self, recipient_id: i64) -> Result<i64>;
    async fn mark_notification_read(&self, recipient_id: i64, id: i64) -> Result<bool>;
    async fn mark_all_notifications_read(&self, recipient_id: i64) -> Result<i64>;
    async fn delete_notification(&self, recipient_id: i64, id: i64) -> Result<bool>;

    /// 审计与管理日志
    async fn create_audit_log(&self, log: NewAuditLog) -> Result<AuditLog>;
    async fn list_audit_logs_with_pagination(
        &self,
        query: AuditLogListQuery,
    ) -> Result<AuditLogListResponse>;
    async fn create_admin_action_log(&self, log: NewAdminActionLog) -> Result<AdminActionLog>;
    async fn list_admin_action_logs_with_pagination(
        &self,
        query: AdminLogListQuery,
    ) -> Result<AdminLogListResponse>;

    /// 学校配置
    // 配置行不存在时按给定默认值创建
    async fn ensure_school_configuration(
        &self,
        school_name: &str,
        grading_system: GradingSystem,
    ) -> Result<SchoolConfiguration>;
    async fn get_school_configuration(&self) -> Result<Option<SchoolConfiguration>>;
    async fn update_school_configuration(
        &self,
        update: UpdateSchoolConfigurationRequest,
        updated_by: i64,
    ) -> Result<SchoolConfiguration>;

    // 带类型引用指向的记录是否存在
    async fn target_exists(&self, target: TargetRef) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
