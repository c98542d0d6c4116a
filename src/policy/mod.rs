//! 授权策略
//!
//! 判定顺序：
//! 1. 账号停用 -> 拒绝
//! 2. 超级用户、职员或管理员角色 -> 允许
//! 3. 静态角色矩阵 -> 允许
//! 4. 需要查询显式授权（用户直接权限或所在组权限），codename 为 `{action}_{resource}`
//!
//! 学生与家长账号对学生名下的数据只能看到与自己关联的学生，见 [`is_owner_scoped`]。

use crate::models::users::entities::{User, UserRole};
use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "policy.ts")]
    pub enum Resource("资源") {
        Account => "account",
        Group => "group",
        Permission => "permission",
        Student => "student",
        ParentGuardian => "parent_guardian",
        Teacher => "teacher",
        Subject => "subject",
        ClassAssignment => "class_assignment",
        AcademicTerm => "academic_term",
        AttendancePeriod => "attendance_period",
        Attendance => "attendance",
        AttendanceSummary => "attendance_summary",
        FeeCategory => "fee_category",
        Fee => "fee",
        FeePayment => "fee_payment",
        Assignment => "assignment",
        StudentAssignment => "student_assignment",
        Grade => "grade",
        ReportCard => "report_card",
        Notification => "notification",
        AuditLog => "audit_log",
        AdminLog => "admin_log",
        SchoolConfiguration => "school_configuration",
    }
}

string_enum! {
    #[ts(export, export_to = "policy.ts")]
    pub enum Action("操作") {
        View => "view",
        Add => "add",
        Change => "change",
        Delete => "delete",
    }
}

/// 策略判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
    /// 角色矩阵未覆盖，需查询该 codename 的显式授权
    CheckGrant(String),
}

pub fn codename(action: Action, resource: Resource) -> String {
    format!("{}_{}", action.as_str(), resource.as_str())
}

/// 权限的可读名称，如 `Can change fee payment`
pub fn permission_name(action: Action, resource: Resource) -> String {
    format!(
        "Can {} {}",
        action.as_str(),
        resource.as_str().replace('_', " ")
    )
}

/// 全部 (content_type, codename, name)，启动时用于补齐权限表
pub fn all_permissions() -> Vec<(String, String, String)> {
    Resource::ALL
        .iter()
        .flat_map(|resource| {
            Action::ALL.iter().map(move |action| {
                (
                    resource.as_str().to_string(),
                    codename(*action, *resource),
                    permission_name(*action, *resource),
                )
            })
        })
        .collect()
}

/// 账号是否具备管理员权限
pub fn has_admin_authority(user: &User) -> bool {
    user.is_active && user.is_admin()
}

/// 静态角色矩阵（管理员之外的角色）
pub fn role_allows(role: UserRole, resource: Resource, action: Action) -> bool {
    use Action::*;
    use Resource::*;

    // 所有角色都可以查看、标记、删除自己的通知
    if resource == Notification && matches!(action, View | Change | Delete) {
        return true;
    }

    match role {
        UserRole::Admin => true,
        UserRole::Teacher => match action {
            View => matches!(
                resource,
                Student
                    | ParentGuardian
                    | Teacher
                    | Subject
                    | ClassAssignment
                    | AcademicTerm
                    | AttendancePeriod
                    | Attendance
                    | AttendanceSummary
                    | Assignment
                    | StudentAssignment
                    | Grade
                    | ReportCard
            ),
            Add | Change => matches!(
                resource,
                Attendance
                    | AttendanceSummary
                    | Assignment
                    | StudentAssignment
                    | Grade
                    | ReportCard
            ),
            Delete => resource == Assignment,
        },
        UserRole::Student | UserRole::Parent => match action {
            View => matches!(
                resource,
                Student
                    | ParentGuardian
                    | Subject
                    | AcademicTerm
                    | AttendancePeriod
                    | Attendance
                    | AttendanceSummary
                    | Fee
                    | FeePayment
                    | Assignment
                    | StudentAssignment
                    | Grade
                    | ReportCard
            ),
            Change => resource == StudentAssignment,
            _ => false,
        },
    }
}

pub fn evaluate(user: &User, resource: Resource, action: Action) -> Decision {
    if !user.is_active {
        return Decision::Deny;
    }
    if has_admin_authority(user) || role_allows(user.role, resource, action) {
        return Decision::Allow;
    }
    Decision::CheckGrant(codename(action, resource))
}

/// 学生、家长账号只能访问与自己关联的学生数据
pub fn is_owner_scoped(user: &User) -> bool {
    !has_admin_authority(user) && matches!(user.role, UserRole::Student | UserRole::Parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::sample_user;

    #[test]
    fn test_codename() {
        assert_eq!(codename(Action::Change, Resource::Fee), "change_fee");
        assert_eq!(
            permission_name(Action::View, Resource::FeePayment),
            "Can view fee payment"
        );
        assert_eq!(
            all_permissions().len(),
            Resource::ALL.len() * Action::ALL.len()
        );
    }

    #[test]
    fn test_admin_allowed_everything() {
        let admin = sample_user(UserRole::Admin);
        for resource in Resource::ALL {
            for action in Action::ALL {
                assert_eq!(evaluate(&admin, *resource, *action), Decision::Allow);
            }
        }

        let mut staff = sample_user(UserRole::Teacher);
        staff.is_staff = true;
        assert_eq!(
            evaluate(&staff, Resource::Fee, Action::Delete),
            Decision::Allow
        );
    }

    #[test]
    fn test_inactive_denied() {
        let mut admin = sample_user(UserRole::Admin);
        admin.is_active = false;
        assert_eq!(
            evaluate(&admin, Resource::Subject, Action::View),
            Decision::Deny
        );
    }

    #[test]
    fn test_teacher_matrix() {
        let teacher = sample_user(UserRole::Teacher);
        assert_eq!(
            evaluate(&teacher, Resource::Grade, Action::Add),
            Decision::Allow
        );
        assert_eq!(
            evaluate(&teacher, Resource::Assignment, Action::Delete),
            Decision::Allow
        );
        assert_eq!(
            evaluate(&teacher, Resource::Fee, Action::View),
            Decision::CheckGrant("view_fee".to_string())
        );
        assert_eq!(
            evaluate(&teacher, Resource::Grade, Action::Delete),
            Decision::CheckGrant("delete_grade".to_string())
        );
    }

    #[test]
    fn test_student_and_parent_matrix() {
        for role in [UserRole::Student, UserRole::Parent] {
            let user = sample_user(role);
            assert_eq!(evaluate(&user, Resource::Fee, Action::View), Decision::Allow);
            assert_eq!(
                evaluate(&user, Resource::StudentAssignment, Action::Change),
                Decision::Allow
            );
            assert_eq!(
                evaluate(&user, Resource::Notification, Action::Delete),
                Decision::Allow
            );
            assert!(matches!(
                evaluate(&user, Resource::Fee, Action::Change),
                Decision::CheckGrant(_)
            ));
            assert!(is_owner_scoped(&user));
        }
        assert!(!is_owner_scoped(&sample_user(UserRole::Teacher)));
    }
}
