use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::SeaOrmStorage;
use crate::errors::SchoolError;
use crate::models::{
    ClassLevel, TargetKind, TargetRef,
    academics::{
        entities::PeriodType,
        requests::{
            CreateClassAssignmentRequest, CreatePeriodRequest, CreateSubjectRequest,
            CreateTermRequest, UpdateTermRequest,
        },
    },
    assessments::{
        entities::{AssignmentType, SubmissionStatus},
        requests::{
            CreateAssignmentRequest, CreateGradeRequest, GenerateReportCardRequest,
            GradeSubmissionRequest, StudentAssignmentListQuery,
        },
    },
    attendance::{
        entities::{AttendanceRating, AttendanceStatus, AttendanceSummary},
        requests::{
            AttendanceMark, RecomputeSummaryRequest, RecordAttendanceRequest, SummaryListQuery,
            UpdateAttendanceRequest,
        },
    },
    fees::{
        entities::{FeeCategoryName, PaymentMode, PaymentStatus},
        requests::{CreateFeeCategoryRequest, CreateFeeRequest, RecordPaymentRequest},
    },
    notifications::{entities::NotificationType, requests::CreateNotificationRequest},
    students::{
        entities::{Gender, Student},
        requests::{CreateStudentRequest, UpdateStudentRequest},
    },
    teachers::requests::CreateTeacherRequest,
    users::{entities::UserRole, requests::CreateUserRequest},
};
use crate::storage::Storage;

async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::connect("sqlite::memory:", 1, 5)
        .await
        .expect("in-memory database")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn account(username: &str, role: UserRole) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        email: format!("{username}@school.test"),
        password: "hashed".to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        phone_number: None,
        address: None,
        date_of_birth: None,
        role,
        is_staff: false,
        is_superuser: false,
    }
}

fn student_request(user_id: i64, level: ClassLevel) -> CreateStudentRequest {
    CreateStudentRequest {
        student_id: None,
        user_id,
        first_name: "Ama".to_string(),
        middle_name: None,
        last_name: "Mensah".to_string(),
        date_of_birth: date(2014, 5, 2),
        gender: Gender::Female,
        nationality: None,
        ethnicity: None,
        religion: None,
        place_of_birth: None,
        residential_address: "Accra".to_string(),
        class_level: level,
        admission_date: Some(date(2024, 9, 2)),
    }
}

async fn enrolled_student(s: &SeaOrmStorage, username: &str, level: ClassLevel) -> Student {
    let user = s
        .create_user(account(username, UserRole::Student))
        .await
        .unwrap();
    s.create_student(student_request(user.id, level))
        .await
        .unwrap()
}

async fn first_term(s: &SeaOrmStorage) -> i64 {
    s.create_term(CreateTermRequest {
        term: 1,
        academic_year: "2024/2025".to_string(),
        start_date: date(2024, 9, 9),
        end_date: date(2024, 12, 13),
        is_active: true,
    })
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let s = storage().await;
    s.create_user(account("kwame01", UserRole::Teacher))
        .await
        .unwrap();

    let err = s
        .create_user(account("kwame01", UserRole::Teacher))
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::UniqueViolation(_)), "{err:?}");
    assert_eq!(err.status_code().as_u16(), 409);
}

#[tokio::test]
async fn test_unknown_parent_is_reference_violation() {
    let s = storage().await;
    let err = s
        .create_student(student_request(9999, ClassLevel::P1))
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::ForeignKeyViolation(_)), "{err:?}");
    assert_eq!(err.status_code().as_u16(), 409);
}

#[tokio::test]
async fn test_account_with_student_profile_cannot_be_deleted() {
    let s = storage().await;
    let student = enrolled_student(&s, "ama.mensah", ClassLevel::P4).await;
    assert!(student.student_id.starts_with("STUD"));
    assert!(student.student_id.ends_with("P4001"));

    let err = s.delete_user(student.user_id).await.unwrap_err();
    assert!(matches!(err, SchoolError::ForeignKeyViolation(_)), "{err:?}");
    assert_eq!(err.status_code().as_u16(), 409);
    assert!(s.get_user_by_id(student.user_id).await.unwrap().is_some());

    // 停用是正常路径
    assert!(s.deactivate_student(student.id).await.unwrap());
    let student = s.get_student_by_id(student.id).await.unwrap().unwrap();
    assert!(!student.is_active);
}

#[tokio::test]
async fn test_student_ids_are_sequential_per_level() {
    let s = storage().await;
    let a = enrolled_student(&s, "student_a", ClassLevel::J1).await;
    let b = enrolled_student(&s, "student_b", ClassLevel::J1).await;
    assert!(a.student_id.ends_with("J1001"));
    assert!(b.student_id.ends_with("J1002"));
}

#[tokio::test]
async fn test_repeated_student_update_is_idempotent() {
    let s = storage().await;
    let student = enrolled_student(&s, "kofi.b", ClassLevel::P2).await;

    let update = UpdateStudentRequest {
        first_name: Some("Kofi".to_string()),
        class_level: Some(ClassLevel::P3),
        ..Default::default()
    };
    let first = s
        .update_student(student.id, update.clone())
        .await
        .unwrap()
        .unwrap();
    let second = s
        .update_student(student.id, update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(first.first_name, "Kofi");
    assert_eq!(first.class_level, ClassLevel::P3);
    assert_eq!(second.first_name, first.first_name);
    assert_eq!(second.class_level, first.class_level);
    assert_eq!(second.updated_at, first.updated_at);
}

#[tokio::test]
async fn test_partial_payment_scenario() {
    let s = storage().await;
    let student = enrolled_student(&s, "yaw.fees", ClassLevel::P5).await;
    let category = s
        .create_fee_category(CreateFeeCategoryRequest {
            name: FeeCategoryName::Tuition,
            description: None,
            is_mandatory: true,
            applies_to_all: true,
            class_levels: vec![],
        })
        .await
        .unwrap();

    let fee = s
        .create_fee(CreateFeeRequest {
            student_id: student.id,
            category_id: category.id,
            academic_year: "2024/2025".to_string(),
            term: 1,
            amount_payable: dec("2000.00"),
            amount_paid: Decimal::ZERO,
            payment_mode: None,
            payment_date: None,
            due_date: date(2024, 10, 1),
            receipt_number: None,
            notes: None,
            recorded_by: None,
        })
        .await
        .unwrap();
    assert_eq!(fee.payment_status, PaymentStatus::Unpaid);
    assert_eq!(fee.balance.to_string(), "2000.00");

    let payment = |amount: &str| RecordPaymentRequest {
        amount: dec(amount),
        payment_mode: PaymentMode::MobileMoney,
        payment_date: Some(date(2024, 9, 20)),
        notes: None,
        bank_reference: None,
        is_confirmed: true,
        recorded_by: None,
    };

    let recorded = s
        .record_payment(fee.id, payment("1800.00"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(recorded.fee.balance.to_string(), "200.00");
    assert_eq!(recorded.fee.payment_status, PaymentStatus::Partial);
    assert_eq!(recorded.fee.payment_date, None);
    assert!(recorded.payment.receipt_number.starts_with("RCPT-"));
    assert_eq!(recorded.payment.receipt_number.len(), 15);

    let err = s
        .record_payment(fee.id, payment("300.00"))
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::Validation(_)));

    let settled = s
        .record_payment(fee.id, payment("200"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(settled.fee.balance.to_string(), "0.00");
    assert_eq!(settled.fee.payment_status, PaymentStatus::Paid);
    assert_eq!(settled.fee.payment_date, Some(date(2024, 9, 20)));
    assert_eq!(s.list_fee_payments(fee.id).await.unwrap().len(), 2);

    // 学生有费用时不能硬删除其账号
    let err = s.delete_user(student.user_id).await.unwrap_err();
    assert!(matches!(err, SchoolError::ForeignKeyViolation(_)));
    assert_eq!(err.status_code().as_u16(), 409);
}

async fn tuition_category(s: &SeaOrmStorage) -> i64 {
    s.create_fee_category(CreateFeeCategoryRequest {
        name: FeeCategoryName::Tuition,
        description: None,
        is_mandatory: true,
        applies_to_all: true,
        class_levels: vec![],
    })
    .await
    .unwrap()
    .id
}

fn fee_request(student_id: i64, category_id: i64, term: i16) -> CreateFeeRequest {
    CreateFeeRequest {
        student_id,
        category_id,
        academic_year: "2024/2025".to_string(),
        term,
        amount_payable: dec("2000.00"),
        amount_paid: Decimal::ZERO,
        payment_mode: None,
        payment_date: None,
        due_date: date(2024, 10, 1),
        receipt_number: None,
        notes: None,
        recorded_by: None,
    }
}

#[tokio::test]
async fn test_fee_created_with_partial_amount() {
    let s = storage().await;
    let student = enrolled_student(&s, "akua.fee", ClassLevel::P2).await;
    let category_id = tuition_category(&s).await;

    let fee = s
        .create_fee(CreateFeeRequest {
            amount_paid: dec("1800.00"),
            payment_mode: Some(PaymentMode::Cash),
            ..fee_request(student.id, category_id, 1)
        })
        .await
        .unwrap();
    assert_eq!(fee.balance.to_string(), "200.00");
    assert_eq!(fee.payment_status, PaymentStatus::Partial);
    assert_eq!(fee.payment_date, None);

    let stored = s.get_fee_by_id(fee.id).await.unwrap().unwrap();
    assert_eq!(stored.balance, dec("200.00"));
    assert_eq!(stored.payment_status, PaymentStatus::Partial);
}

#[tokio::test]
async fn test_fee_constraint_violations() {
    let s = storage().await;
    let student = enrolled_student(&s, "kojo.fee", ClassLevel::P3).await;
    let category_id = tuition_category(&s).await;

    s.create_fee(CreateFeeRequest {
        receipt_number: Some("RCPT-MANUAL-01".to_string()),
        ..fee_request(student.id, category_id, 1)
    })
    .await
    .unwrap();

    // 收据号重复
    let err = s
        .create_fee(CreateFeeRequest {
            receipt_number: Some("RCPT-MANUAL-01".to_string()),
            ..fee_request(student.id, category_id, 2)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::UniqueViolation(_)), "{err:?}");
    assert_eq!(err.status_code().as_u16(), 409);

    // 学期为负数时由检查约束拒绝
    let err = s
        .create_fee(fee_request(student.id, category_id, -1))
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::CheckViolation(_)), "{err:?}");
    assert_eq!(err.status_code().as_u16(), 400);
}

#[tokio::test]
async fn test_payment_keeps_manual_fee_receipt() {
    let s = storage().await;
    let student = enrolled_student(&s, "efua.fee", ClassLevel::J1).await;
    let category_id = tuition_category(&s).await;

    let payment = || RecordPaymentRequest {
        amount: dec("500.00"),
        payment_mode: PaymentMode::Cash,
        payment_date: Some(date(2024, 9, 20)),
        notes: None,
        bank_reference: None,
        is_confirmed: true,
        recorded_by: None,
    };

    let manual = s
        .create_fee(CreateFeeRequest {
            receipt_number: Some("BURSAR-0042".to_string()),
            ..fee_request(student.id, category_id, 1)
        })
        .await
        .unwrap();
    let recorded = s
        .record_payment(manual.id, payment())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(recorded.fee.receipt_number.as_deref(), Some("BURSAR-0042"));
    assert!(recorded.payment.receipt_number.starts_with("RCPT-"));

    // 没有手工收据号的费用跟随最近一次缴费的收据号
    let generated = s
        .create_fee(fee_request(student.id, category_id, 2))
        .await
        .unwrap();
    let first = s
        .record_payment(generated.id, payment())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        first.fee.receipt_number.as_deref(),
        Some(first.payment.receipt_number.as_str())
    );
    let second = s
        .record_payment(generated.id, payment())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        second.fee.receipt_number.as_deref(),
        Some(second.payment.receipt_number.as_str())
    );
    assert_ne!(first.payment.receipt_number, second.payment.receipt_number);
}

#[tokio::test]
async fn test_load_periods_for_term() {
    let s = storage().await;
    assert!(s.load_periods(12345).await.unwrap().is_empty());

    let term_id = first_term(&s).await;
    assert!(s.load_periods(term_id).await.unwrap().is_empty());

    for (start, end) in [((2024, 9, 9), (2024, 9, 13)), ((2024, 9, 16), (2024, 9, 20))] {
        s.create_period(CreatePeriodRequest {
            period_type: PeriodType::Weekly,
            term_id,
            start_date: date(start.0, start.1, start.2),
            end_date: date(end.0, end.1, end.2),
            is_locked: false,
        })
        .await
        .unwrap();
    }

    let periods = s.load_periods(term_id).await.unwrap();
    assert_eq!(periods.len(), 2);
    assert_eq!(periods[0].start_date, date(2024, 9, 16));
    assert_eq!(periods[1].start_date, date(2024, 9, 9));

    // 同类型重叠与越出学期均被拒绝
    let overlap = s
        .create_period(CreatePeriodRequest {
            period_type: PeriodType::Weekly,
            term_id,
            start_date: date(2024, 9, 12),
            end_date: date(2024, 9, 18),
            is_locked: false,
        })
        .await;
    assert!(matches!(overlap, Err(SchoolError::Validation(_))));
    let outside = s
        .create_period(CreatePeriodRequest {
            period_type: PeriodType::Monthly,
            term_id,
            start_date: date(2024, 12, 1),
            end_date: date(2024, 12, 31),
            is_locked: false,
        })
        .await;
    assert!(matches!(outside, Err(SchoolError::Validation(_))));
}

#[tokio::test]
async fn test_activating_term_deactivates_siblings() {
    let s = storage().await;
    let first = first_term(&s).await;
    let second = s
        .create_term(CreateTermRequest {
            term: 2,
            academic_year: "2024/2025".to_string(),
            start_date: date(2025, 1, 6),
            end_date: date(2025, 4, 4),
            is_active: false,
        })
        .await
        .unwrap();

    s.update_term(
        second.id,
        UpdateTermRequest {
            is_active: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(!s.get_term_by_id(first).await.unwrap().unwrap().is_active);
    assert_eq!(s.get_active_term().await.unwrap().unwrap().id, second.id);
}

#[tokio::test]
async fn test_recording_attendance_recomputes_summaries() {
    let s = storage().await;
    let term_id = first_term(&s).await;
    let period = s
        .create_period(CreatePeriodRequest {
            period_type: PeriodType::Weekly,
            term_id,
            start_date: date(2024, 9, 9),
            end_date: date(2024, 9, 13),
            is_locked: false,
        })
        .await
        .unwrap();
    let student = enrolled_student(&s, "esi.att", ClassLevel::P6).await;

    let days = [
        (9, AttendanceStatus::Present),
        (10, AttendanceStatus::Present),
        (11, AttendanceStatus::Late),
        (12, AttendanceStatus::Absent),
    ];
    for (day, status) in days {
        s.record_attendance(RecordAttendanceRequest {
            class_level: ClassLevel::P6,
            date: date(2024, 9, day),
            term_id,
            period_id: Some(period.id),
            records: vec![AttendanceMark {
                student_id: student.id,
                status,
                notes: None,
            }],
            recorded_by: None,
        })
        .await
        .unwrap();
    }

    // 同一天再次记录时覆盖原记录
    let response = s
        .record_attendance(RecordAttendanceRequest {
            class_level: ClassLevel::P6,
            date: date(2024, 9, 12),
            term_id,
            period_id: Some(period.id),
            records: vec![AttendanceMark {
                student_id: student.id,
                status: AttendanceStatus::Excused,
                notes: Some("Hospital visit".to_string()),
            }],
            recorded_by: None,
        })
        .await
        .unwrap();
    assert_eq!(response.records.len(), 1);
    assert_eq!(response.summaries_updated, 2);

    let summaries = s
        .list_summaries_with_pagination(SummaryListQuery {
            student_id: Some(student.id),
            ..Default::default()
        })
        .await
        .unwrap()
        .items;
    assert_eq!(summaries.len(), 2);
    for summary in summaries {
        assert_eq!(summary.total_days, 4);
        assert_eq!(summary.days_present, 2);
        assert_eq!(summary.days_excused, 1);
        assert_eq!(summary.days_absent, 0);
        assert_eq!(summary.attendance_rate.to_string(), "50.00");
        assert_eq!(summary.present_rate.to_string(), "100.00");
    }

    // 学生不在该年级时拒绝
    let err = s
        .record_attendance(RecordAttendanceRequest {
            class_level: ClassLevel::P1,
            date: date(2024, 9, 13),
            term_id,
            period_id: None,
            records: vec![AttendanceMark {
                student_id: student.id,
                status: AttendanceStatus::Present,
                notes: None,
            }],
            recorded_by: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::Validation(_)));
}

fn single_mark(
    level: ClassLevel,
    day: NaiveDate,
    term_id: i64,
    period_id: Option<i64>,
    student_id: i64,
    status: AttendanceStatus,
) -> RecordAttendanceRequest {
    RecordAttendanceRequest {
        class_level: level,
        date: day,
        term_id,
        period_id,
        records: vec![AttendanceMark {
            student_id,
            status,
            notes: None,
        }],
        recorded_by: None,
    }
}

async fn summary_for(
    s: &SeaOrmStorage,
    student_id: i64,
    term_id: i64,
    period_id: Option<i64>,
) -> AttendanceSummary {
    s.recompute_summaries(RecomputeSummaryRequest {
        term_id,
        period_id,
        student_id: Some(student_id),
        class_level: None,
    })
    .await
    .unwrap()
    .remove(0)
}

#[tokio::test]
async fn test_overlapping_periods_count_only_their_own_records() {
    let s = storage().await;
    let term_id = first_term(&s).await;
    let weekly = s
        .create_period(CreatePeriodRequest {
            period_type: PeriodType::Weekly,
            term_id,
            start_date: date(2024, 9, 9),
            end_date: date(2024, 9, 13),
            is_locked: false,
        })
        .await
        .unwrap();
    let monthly = s
        .create_period(CreatePeriodRequest {
            period_type: PeriodType::Monthly,
            term_id,
            start_date: date(2024, 9, 9),
            end_date: date(2024, 10, 8),
            is_locked: false,
        })
        .await
        .unwrap();
    let student = enrolled_student(&s, "kwesi.att", ClassLevel::P4).await;

    s.record_attendance(single_mark(
        ClassLevel::P4,
        date(2024, 9, 10),
        term_id,
        Some(weekly.id),
        student.id,
        AttendanceStatus::Present,
    ))
    .await
    .unwrap();

    // 日期落在月度周期内，但记录属于周度周期
    let monthly_summary = summary_for(&s, student.id, term_id, Some(monthly.id)).await;
    assert_eq!(monthly_summary.total_days, 0);
    assert_eq!(monthly_summary.days_present, 0);

    s.record_attendance(single_mark(
        ClassLevel::P4,
        date(2024, 9, 16),
        term_id,
        Some(monthly.id),
        student.id,
        AttendanceStatus::Sick,
    ))
    .await
    .unwrap();

    let monthly_summary = summary_for(&s, student.id, term_id, Some(monthly.id)).await;
    assert_eq!(monthly_summary.total_days, 1);
    assert_eq!(monthly_summary.days_sick, 1);
    assert_eq!(monthly_summary.present_rate.to_string(), "0.00");

    let weekly_summary = summary_for(&s, student.id, term_id, Some(weekly.id)).await;
    assert_eq!(weekly_summary.total_days, 1);
    assert_eq!(weekly_summary.days_present, 1);
    assert!(weekly_summary.ges_compliant);
    assert_eq!(weekly_summary.rating, AttendanceRating::Excellent);

    // 学期汇总包含该学期的全部记录
    let term_summary = summary_for(&s, student.id, term_id, None).await;
    assert_eq!(term_summary.total_days, 2);
    assert_eq!(term_summary.days_present, 1);
    assert_eq!(term_summary.days_sick, 1);
    assert_eq!(term_summary.days_other, 0);
    assert_eq!(term_summary.present_rate.to_string(), "50.00");
    assert!(!term_summary.ges_compliant);
    assert_eq!(term_summary.rating, AttendanceRating::Poor);
}

#[tokio::test]
async fn test_record_can_be_detached_from_period() {
    let s = storage().await;
    let term_id = first_term(&s).await;
    let weekly = s
        .create_period(CreatePeriodRequest {
            period_type: PeriodType::Weekly,
            term_id,
            start_date: date(2024, 9, 9),
            end_date: date(2024, 9, 13),
            is_locked: false,
        })
        .await
        .unwrap();
    let student = enrolled_student(&s, "adjoa.att", ClassLevel::P5).await;

    let record = s
        .record_attendance(single_mark(
            ClassLevel::P5,
            date(2024, 9, 11),
            term_id,
            Some(weekly.id),
            student.id,
            AttendanceStatus::Other,
        ))
        .await
        .unwrap()
        .records
        .remove(0);
    assert_eq!(record.period_id, Some(weekly.id));

    let err = s
        .update_attendance(
            record.id,
            UpdateAttendanceRequest {
                period_id: Some(weekly.id),
                clear_period: true,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::Validation(_)));

    let updated = s
        .update_attendance(
            record.id,
            UpdateAttendanceRequest {
                clear_period: true,
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.period_id, None);
    assert_eq!(updated.status, AttendanceStatus::Other);

    let weekly_summary = s
        .list_summaries_with_pagination(SummaryListQuery {
            student_id: Some(student.id),
            period_id: Some(weekly.id),
            ..Default::default()
        })
        .await
        .unwrap()
        .items
        .remove(0);
    assert_eq!(weekly_summary.total_days, 0);

    let term_summary = summary_for(&s, student.id, term_id, None).await;
    assert_eq!(term_summary.total_days, 1);
    assert_eq!(term_summary.days_other, 1);
}

#[tokio::test]
async fn test_locked_period_rejects_records() {
    let s = storage().await;
    let term_id = first_term(&s).await;
    let period = s
        .create_period(CreatePeriodRequest {
            period_type: PeriodType::Daily,
            term_id,
            start_date: date(2024, 9, 9),
            end_date: date(2024, 9, 9),
            is_locked: true,
        })
        .await
        .unwrap();
    let student = enrolled_student(&s, "abena.l", ClassLevel::J2).await;

    let err = s
        .record_attendance(RecordAttendanceRequest {
            class_level: ClassLevel::J2,
            date: date(2024, 9, 9),
            term_id,
            period_id: Some(period.id),
            records: vec![AttendanceMark {
                student_id: student.id,
                status: AttendanceStatus::Present,
                notes: None,
            }],
            recorded_by: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::Validation(_)));
}

#[tokio::test]
async fn test_assignment_lifecycle_and_report_card() {
    let s = storage().await;
    let teacher_user = s
        .create_user(account("mr.owusu", UserRole::Teacher))
        .await
        .unwrap();
    let subject = s
        .create_subject(CreateSubjectRequest {
            name: "Mathematics".to_string(),
            code: "MATH".to_string(),
            description: None,
        })
        .await
        .unwrap();
    let teacher = s
        .create_teacher(CreateTeacherRequest {
            user_id: teacher_user.id,
            first_name: "Kojo".to_string(),
            last_name: "Owusu".to_string(),
            date_of_birth: None,
            gender: Gender::Male,
            phone_number: "0240000000".to_string(),
            email: "owusu@school.test".to_string(),
            address: "Kumasi".to_string(),
            class_levels: vec![ClassLevel::J3],
            subject_ids: vec![subject.id],
        })
        .await
        .unwrap();
    assert_eq!(teacher.subjects.len(), 1);

    let class_assignment = s
        .create_class_assignment(CreateClassAssignmentRequest {
            class_level: ClassLevel::J3,
            subject_id: subject.id,
            teacher_id: teacher.teacher.id,
            academic_year: "2024/2025".to_string(),
        })
        .await
        .unwrap();

    let first = enrolled_student(&s, "student.one", ClassLevel::J3).await;
    enrolled_student(&s, "student.two", ClassLevel::J3).await;
    enrolled_student(&s, "student.other", ClassLevel::J1).await;

    let created = s
        .create_assignment(CreateAssignmentRequest {
            title: "Fractions".to_string(),
            description: String::new(),
            assignment_type: AssignmentType::Homework,
            class_assignment_id: class_assignment.id,
            due_date: date(2024, 10, 4),
            max_score: 20,
            weight: 10,
        })
        .await
        .unwrap();
    assert_eq!(created.student_assignments_created, 2);
    assert_eq!(created.assignment.subject_id, subject.id);

    let rows = s
        .list_student_assignments_with_pagination(StudentAssignmentListQuery {
            assignment_id: Some(created.assignment.id),
            student_id: Some(first.id),
            ..Default::default()
        })
        .await
        .unwrap()
        .items;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, SubmissionStatus::Pending);

    let submitted = s
        .submit_student_assignment(rows[0].id, date(2024, 10, 5))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(submitted.status, SubmissionStatus::Late);

    let too_high = s
        .grade_student_assignment(
            rows[0].id,
            GradeSubmissionRequest {
                score: dec("21"),
                feedback: None,
            },
        )
        .await;
    assert!(matches!(too_high, Err(SchoolError::Validation(_))));

    let graded = s
        .grade_student_assignment(
            rows[0].id,
            GradeSubmissionRequest {
                score: dec("18.5"),
                feedback: Some("Good".to_string()),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(graded.status, SubmissionStatus::Graded);
    assert!(
        s.submit_student_assignment(rows[0].id, date(2024, 10, 6))
            .await
            .is_err()
    );

    let grade = s
        .create_grade(CreateGradeRequest {
            student_id: first.id,
            subject_id: subject.id,
            class_assignment_id: Some(class_assignment.id),
            academic_year: "2024/2025".to_string(),
            term: 1,
            classwork_score: dec("25"),
            homework_score: dec("8"),
            test_score: dec("9"),
            exam_score: dec("40"),
            remarks: None,
            recorded_by: None,
        })
        .await
        .unwrap();
    assert_eq!(grade.total_score.to_string(), "82.00");
    assert_eq!(grade.ges_grade, "2");

    let card = s
        .generate_report_card(GenerateReportCardRequest {
            student_id: first.id,
            academic_year: "2024/2025".to_string(),
            term: 1,
            teacher_remarks: None,
            principal_remarks: None,
            created_by: None,
        })
        .await
        .unwrap();
    assert_eq!(card.average_score.to_string(), "82.00");
    assert_eq!(card.overall_grade, "A");
    assert!(!card.is_published);

    // 重新生成时覆盖同一张成绩单
    let again = s
        .generate_report_card(GenerateReportCardRequest {
            student_id: first.id,
            academic_year: "2024/2025".to_string(),
            term: 1,
            teacher_remarks: Some("Keep it up".to_string()),
            principal_remarks: None,
            created_by: None,
        })
        .await
        .unwrap();
    assert_eq!(again.id, card.id);
    let detail = s.get_report_card_detail(card.id).await.unwrap().unwrap();
    assert_eq!(detail.grades.len(), 1);
    assert_eq!(
        detail.report_card.teacher_remarks.as_deref(),
        Some("Keep it up")
    );
}

#[tokio::test]
async fn test_notification_target_must_exist() {
    let s = storage().await;
    let user = s
        .create_user(account("parent.one", UserRole::Parent))
        .await
        .unwrap();

    let request = |target| CreateNotificationRequest {
        recipient_id: user.id,
        notification_type: NotificationType::General,
        title: "Notice".to_string(),
        message: "PTA meeting on Friday".to_string(),
        target,
    };

    let err = s
        .create_notification(request(Some(TargetRef::new(TargetKind::Fee, 77))))
        .await
        .unwrap_err();
    assert!(matches!(err, SchoolError::Validation(_)));

    let target = TargetRef::new(TargetKind::Account, user.id);
    let created = s.create_notification(request(Some(target))).await.unwrap();
    assert_eq!(created.target, Some(target));
    assert_eq!(s.count_unread_notifications(user.id).await.unwrap(), 1);

    // 只能操作本人的通知
    assert!(!s.mark_notification_read(user.id + 1, created.id).await.unwrap());
    assert!(s.mark_notification_read(user.id, created.id).await.unwrap());
    assert_eq!(s.count_unread_notifications(user.id).await.unwrap(), 0);
}
