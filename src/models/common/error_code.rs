/// API 业务错误码
///
/// 0 表示成功；1xxx 通用错误；2xxx 认证与权限；3xxx 数据完整性；4xxx 业务规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    Unauthorized = 2001,
    AuthFailed = 2002,
    PermissionDenied = 2003,
    AccountInactive = 2004,

    Conflict = 3001,
    ReferenceViolation = 3002,
    ConstraintViolation = 3003,

    UserNotFound = 4001,
    UserNameInvalid = 4002,
    UserEmailInvalid = 4003,
    UserPasswordInvalid = 4004,
    CanNotDeleteCurrentUser = 4005,
    StudentNotFound = 4101,
    ParentNotFound = 4102,
    TeacherNotFound = 4103,
    TermNotFound = 4201,
    PeriodNotFound = 4202,
    PeriodLocked = 4203,
    FeeNotFound = 4301,
    FeeOverpaid = 4302,
    GradeNotFound = 4401,
    ReportCardNotFound = 4402,
    AssignmentNotFound = 4403,
    ConfigurationLocked = 4501,
}
