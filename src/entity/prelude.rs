//! 预导入模块，方便使用

pub use super::academic_terms::{
    ActiveModel as AcademicTermActiveModel, Entity as AcademicTerms, Model as AcademicTermModel,
};
pub use super::admin_action_logs::{
    ActiveModel as AdminActionLogActiveModel, Entity as AdminActionLogs, Model as AdminActionLogModel,
};
pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::attendance_periods::{
    ActiveModel as AttendancePeriodActiveModel, Entity as AttendancePeriods, Model as AttendancePeriodModel,
};
pub use super::attendance_summaries::{
    ActiveModel as AttendanceSummaryActiveModel, Entity as AttendanceSummaries, Model as AttendanceSummaryModel,
};
pub use super::audit_logs::{
    ActiveModel as AuditLogActiveModel, Entity as AuditLogs, Model as AuditLogModel,
};
pub use super::class_assignments::{
    ActiveModel as ClassAssignmentActiveModel, Entity as ClassAssignments, Model as ClassAssignmentModel,
};
pub use super::fee_categories::{
    ActiveModel as FeeCategoryActiveModel, Entity as FeeCategories, Model as FeeCategoryModel,
};
pub use super::fee_payments::{
    ActiveModel as FeePaymentActiveModel, Entity as FeePayments, Model as FeePaymentModel,
};
pub use super::fees::{ActiveModel as FeeActiveModel, Entity as Fees, Model as FeeModel};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::group_permissions::{
    ActiveModel as GroupPermissionActiveModel, Entity as GroupPermissions, Model as GroupPermissionModel,
};
pub use super::groups::{ActiveModel as GroupActiveModel, Entity as Groups, Model as GroupModel};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::parent_guardians::{
    ActiveModel as ParentGuardianActiveModel, Entity as ParentGuardians, Model as ParentGuardianModel,
};
pub use super::permissions::{
    ActiveModel as PermissionActiveModel, Entity as Permissions, Model as PermissionModel,
};
pub use super::report_cards::{
    ActiveModel as ReportCardActiveModel, Entity as ReportCards, Model as ReportCardModel,
};
pub use super::school_configuration::{
    ActiveModel as SchoolConfigurationActiveModel, Entity as SchoolConfigurations, Model as SchoolConfigurationModel,
};
pub use super::student_assignments::{
    ActiveModel as StudentAssignmentActiveModel, Entity as StudentAssignments, Model as StudentAssignmentModel,
};
pub use super::student_attendances::{
    ActiveModel as StudentAttendanceActiveModel, Entity as StudentAttendances, Model as StudentAttendanceModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teacher_subjects::{
    ActiveModel as TeacherSubjectActiveModel, Entity as TeacherSubjects, Model as TeacherSubjectModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::user_groups::{
    ActiveModel as UserGroupActiveModel, Entity as UserGroups, Model as UserGroupModel,
};
pub use super::user_permissions::{
    ActiveModel as UserPermissionActiveModel, Entity as UserPermissions, Model as UserPermissionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
