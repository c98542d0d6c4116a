use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_identity_tables::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 科目表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Subjects::Code)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subjects::Description).text().null())
                    .col(ColumnDef::new(Subjects::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Subjects::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // ==================== 教师表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teachers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Teachers::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teachers::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Teachers::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Teachers::DateOfBirth).date().null())
                    .col(ColumnDef::new(Teachers::Gender).string_len(1).not_null())
                    .col(ColumnDef::new(Teachers::PhoneNumber).string_len(15).not_null())
                    .col(ColumnDef::new(Teachers::Email).string().not_null())
                    .col(ColumnDef::new(Teachers::Address).text().not_null())
                    .col(
                        ColumnDef::new(Teachers::ClassLevels)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Teachers::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Teachers::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Teachers::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teachers::Table, Teachers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 教师-科目关联表 ====================
        manager
            .create_table(
                Table::create()
                    .table(TeacherSubjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherSubjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeacherSubjects::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherSubjects::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherSubjects::Table, TeacherSubjects::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherSubjects::Table, TeacherSubjects::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_teacher_subjects_teacher_subject")
                    .table(TeacherSubjects::Table)
                    .col(TeacherSubjects::TeacherId)
                    .col(TeacherSubjects::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ==================== 学生表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::StudentId)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Students::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Students::MiddleName).string_len(100).null())
                    .col(ColumnDef::new(Students::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Students::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Students::Gender).string_len(1).not_null())
                    .col(
                        ColumnDef::new(Students::Nationality)
                            .string_len(100)
                            .not_null()
                            .default("Ghanaian"),
                    )
                    .col(ColumnDef::new(Students::Ethnicity).string_len(100).null())
                    .col(ColumnDef::new(Students::Religion).string_len(100).null())
                    .col(ColumnDef::new(Students::PlaceOfBirth).string_len(200).null())
                    .col(
                        ColumnDef::new(Students::ResidentialAddress)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Students::ClassLevel).string_len(2).not_null())
                    .col(ColumnDef::new(Students::AdmissionDate).date().not_null())
                    .col(
                        ColumnDef::new(Students::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_class_level")
                    .table(Students::Table)
                    .col(Students::ClassLevel)
                    .to_owned(),
            )
            .await?;

        // ==================== 家长/监护人表 ====================
        manager
            .create_table(
                Table::create()
                    .table(ParentGuardians::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParentGuardians::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParentGuardians::UserId)
                            .big_integer()
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ParentGuardians::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParentGuardians::FullName)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParentGuardians::Occupation)
                            .string_len(100)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ParentGuardians::Relationship)
                            .string_len(1)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParentGuardians::PhoneNumber)
                            .string_len(15)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ParentGuardians::Email).string().null())
                    .col(ColumnDef::new(ParentGuardians::Address).text().null())
                    .col(
                        ColumnDef::new(ParentGuardians::IsEmergencyContact)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ParentGuardians::EmergencyContactPriority)
                            .integer()
                            .not_null()
                            .default(1)
                            .check(Expr::col(ParentGuardians::EmergencyContactPriority).gte(0)),
                    )
                    .col(
                        ColumnDef::new(ParentGuardians::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParentGuardians::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ParentGuardians::Table, ParentGuardians::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ParentGuardians::Table, ParentGuardians::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_parent_guardians_student_priority")
                    .table(ParentGuardians::Table)
                    .col(ParentGuardians::StudentId)
                    .col(ParentGuardians::EmergencyContactPriority)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_parent_guardians_student_email")
                    .table(ParentGuardians::Table)
                    .col(ParentGuardians::StudentId)
                    .col(ParentGuardians::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ==================== 班级-科目分配表 ====================
        manager
            .create_table(
                Table::create()
                    .table(ClassAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassAssignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClassAssignments::ClassLevel)
                            .string_len(2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassAssignments::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassAssignments::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassAssignments::AcademicYear)
                            .string_len(9)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassAssignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassAssignments::Table, ClassAssignments::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassAssignments::Table, ClassAssignments::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_class_assignments_level_subject_year")
                    .table(ClassAssignments::Table)
                    .col(ClassAssignments::ClassLevel)
                    .col(ClassAssignments::SubjectId)
                    .col(ClassAssignments::AcademicYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ==================== 学期表 ====================
        manager
            .create_table(
                Table::create()
                    .table(AcademicTerms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AcademicTerms::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AcademicTerms::Term)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(AcademicTerms::Term).gte(0)),
                    )
                    .col(
                        ColumnDef::new(AcademicTerms::AcademicYear)
                            .string_len(9)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AcademicTerms::StartDate).date().not_null())
                    .col(ColumnDef::new(AcademicTerms::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(AcademicTerms::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AcademicTerms::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_academic_terms_term_year")
                    .table(AcademicTerms::Table)
                    .col(AcademicTerms::Term)
                    .col(AcademicTerms::AcademicYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ==================== 考勤周期表 ====================
        manager
            .create_table(
                Table::create()
                    .table(AttendancePeriods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendancePeriods::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendancePeriods::PeriodType)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendancePeriods::TermId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendancePeriods::StartDate).date().not_null())
                    .col(ColumnDef::new(AttendancePeriods::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(AttendancePeriods::IsLocked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AttendancePeriods::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendancePeriods::Table, AttendancePeriods::TermId)
                            .to(AcademicTerms::Table, AcademicTerms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_attendance_periods_type_term_start")
                    .table(AttendancePeriods::Table)
                    .col(AttendancePeriods::PeriodType)
                    .col(AttendancePeriods::TermId)
                    .col(AttendancePeriods::StartDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ==================== 学生考勤表 ====================
        manager
            .create_table(
                Table::create()
                    .table(StudentAttendances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentAttendances::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentAttendances::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentAttendances::Date).date().not_null())
                    .col(
                        ColumnDef::new(StudentAttendances::Status)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAttendances::PeriodId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentAttendances::TermId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAttendances::RecordedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(StudentAttendances::Notes).text().null())
                    .col(
                        ColumnDef::new(StudentAttendances::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAttendances::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAttendances::Table, StudentAttendances::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAttendances::Table, StudentAttendances::PeriodId)
                            .to(AttendancePeriods::Table, AttendancePeriods::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAttendances::Table, StudentAttendances::TermId)
                            .to(AcademicTerms::Table, AcademicTerms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAttendances::Table, StudentAttendances::RecordedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_student_attendances_student_date_period")
                    .table(StudentAttendances::Table)
                    .col(StudentAttendances::StudentId)
                    .col(StudentAttendances::Date)
                    .col(StudentAttendances::PeriodId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_attendances_term")
                    .table(StudentAttendances::Table)
                    .col(StudentAttendances::TermId)
                    .to_owned(),
            )
            .await?;

        // ==================== 考勤汇总表 ====================
        manager
            .create_table(
                Table::create()
                    .table(AttendanceSummaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceSummaries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::TermId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::PeriodId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::DaysPresent)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(AttendanceSummaries::DaysPresent).gte(0)),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::DaysAbsent)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(AttendanceSummaries::DaysAbsent).gte(0)),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::DaysLate)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(AttendanceSummaries::DaysLate).gte(0)),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::DaysExcused)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(AttendanceSummaries::DaysExcused).gte(0)),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::DaysSick)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(AttendanceSummaries::DaysSick).gte(0)),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::DaysOther)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(AttendanceSummaries::DaysOther).gte(0)),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::TotalDays)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(AttendanceSummaries::TotalDays).gte(0)),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::AttendanceRate)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceSummaries::Table, AttendanceSummaries::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceSummaries::Table, AttendanceSummaries::TermId)
                            .to(AcademicTerms::Table, AcademicTerms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceSummaries::Table, AttendanceSummaries::PeriodId)
                            .to(AttendancePeriods::Table, AttendancePeriods::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_attendance_summaries_student_term_period")
                    .table(AttendanceSummaries::Table)
                    .col(AttendanceSummaries::StudentId)
                    .col(AttendanceSummaries::TermId)
                    .col(AttendanceSummaries::PeriodId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ==================== 费用类别表 ====================
        manager
            .create_table(
                Table::create()
                    .table(FeeCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeeCategories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FeeCategories::Name).string_len(20).not_null())
                    .col(ColumnDef::new(FeeCategories::Description).text().null())
                    .col(
                        ColumnDef::new(FeeCategories::IsMandatory)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(FeeCategories::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(FeeCategories::AppliesToAll)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(FeeCategories::ClassLevels)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(FeeCategories::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeCategories::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 费用表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Fees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Fees::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Fees::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Fees::CategoryId).big_integer().not_null())
                    .col(ColumnDef::new(Fees::AcademicYear).string_len(9).not_null())
                    .col(
                        ColumnDef::new(Fees::Term)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(Fees::Term).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Fees::AmountPayable)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Fees::AmountPaid).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Fees::Balance).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Fees::PaymentStatus).string_len(10).not_null())
                    .col(ColumnDef::new(Fees::PaymentMode).string_len(20).null())
                    .col(ColumnDef::new(Fees::PaymentDate).date().null())
                    .col(ColumnDef::new(Fees::DueDate).date().not_null())
                    .col(
                        ColumnDef::new(Fees::ReceiptNumber)
                            .string_len(50)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Fees::Notes).text().null())
                    .col(ColumnDef::new(Fees::RecordedBy).big_integer().null())
                    .col(ColumnDef::new(Fees::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Fees::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Fees::Table, Fees::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Fees::Table, Fees::CategoryId)
                            .to(FeeCategories::Table, FeeCategories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Fees::Table, Fees::RecordedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fees_student_year_term")
                    .table(Fees::Table)
                    .col(Fees::StudentId)
                    .col(Fees::AcademicYear)
                    .col(Fees::Term)
                    .to_owned(),
            )
            .await?;

        // ==================== 缴费记录表 ====================
        manager
            .create_table(
                Table::create()
                    .table(FeePayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeePayments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FeePayments::FeeId).big_integer().not_null())
                    .col(
                        ColumnDef::new(FeePayments::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeePayments::PaymentDate).date().not_null())
                    .col(
                        ColumnDef::new(FeePayments::PaymentMode)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::ReceiptNumber)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FeePayments::RecordedBy).big_integer().null())
                    .col(ColumnDef::new(FeePayments::Notes).text().null())
                    .col(
                        ColumnDef::new(FeePayments::BankReference)
                            .string_len(100)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::IsConfirmed)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(FeePayments::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeePayments::Table, FeePayments::FeeId)
                            .to(Fees::Table, Fees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FeePayments::Table, FeePayments::RecordedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 作业表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Assignments::Description).text().not_null())
                    .col(
                        ColumnDef::new(Assignments::AssignmentType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::SubjectId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Assignments::ClassAssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::DueDate).date().not_null())
                    .col(
                        ColumnDef::new(Assignments::MaxScore)
                            .integer()
                            .not_null()
                            .default(100)
                            .check(Expr::col(Assignments::MaxScore).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Assignments::Weight)
                            .integer()
                            .not_null()
                            .default(10)
                            .check(Expr::col(Assignments::Weight).gte(0)),
                    )
                    .col(ColumnDef::new(Assignments::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::ClassAssignmentId)
                            .to(ClassAssignments::Table, ClassAssignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 学生作业表 ====================
        manager
            .create_table(
                Table::create()
                    .table(StudentAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentAssignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignments::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignments::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignments::SubmittedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignments::Score)
                            .decimal_len(5, 2)
                            .null(),
                    )
                    .col(ColumnDef::new(StudentAssignments::Feedback).text().null())
                    .col(
                        ColumnDef::new(StudentAssignments::GradedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAssignments::Table, StudentAssignments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAssignments::Table, StudentAssignments::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_student_assignments_student_assignment")
                    .table(StudentAssignments::Table)
                    .col(StudentAssignments::StudentId)
                    .col(StudentAssignments::AssignmentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ==================== 成绩表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::ClassAssignmentId).big_integer().null())
                    .col(ColumnDef::new(Grades::AcademicYear).string_len(9).not_null())
                    .col(
                        ColumnDef::new(Grades::Term)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(Grades::Term).gte(0)),
                    )
                    .col(ColumnDef::new(Grades::ClassworkScore).decimal_len(5, 2).not_null())
                    .col(ColumnDef::new(Grades::HomeworkScore).decimal_len(5, 2).not_null())
                    .col(ColumnDef::new(Grades::TestScore).decimal_len(5, 2).not_null())
                    .col(ColumnDef::new(Grades::ExamScore).decimal_len(5, 2).not_null())
                    .col(ColumnDef::new(Grades::TotalScore).decimal_len(5, 2).not_null())
                    .col(ColumnDef::new(Grades::GesGrade).string_len(2).not_null())
                    .col(ColumnDef::new(Grades::Remarks).text().null())
                    .col(ColumnDef::new(Grades::RecordedBy).big_integer().null())
                    .col(ColumnDef::new(Grades::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Grades::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::ClassAssignmentId)
                            .to(ClassAssignments::Table, ClassAssignments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::RecordedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_grades_student_subject_year_term")
                    .table(Grades::Table)
                    .col(Grades::StudentId)
                    .col(Grades::SubjectId)
                    .col(Grades::AcademicYear)
                    .col(Grades::Term)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ==================== 成绩单表 ====================
        manager
            .create_table(
                Table::create()
                    .table(ReportCards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReportCards::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReportCards::StudentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ReportCards::AcademicYear)
                            .string_len(9)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReportCards::Term)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(ReportCards::Term).gte(0)),
                    )
                    .col(
                        ColumnDef::new(ReportCards::AverageScore)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReportCards::OverallGrade)
                            .string_len(2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReportCards::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ReportCards::TeacherRemarks).text().null())
                    .col(ColumnDef::new(ReportCards::PrincipalRemarks).text().null())
                    .col(ColumnDef::new(ReportCards::CreatedBy).big_integer().null())
                    .col(ColumnDef::new(ReportCards::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(ReportCards::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReportCards::Table, ReportCards::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReportCards::Table, ReportCards::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_report_cards_student_year_term")
                    .table(ReportCards::Table)
                    .col(ReportCards::StudentId)
                    .col(ReportCards::AcademicYear)
                    .col(ReportCards::Term)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ReportCards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentAssignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeePayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Fees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeeCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttendanceSummaries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentAttendances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttendancePeriods::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AcademicTerms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassAssignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ParentGuardians::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeacherSubjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Subjects {
    Table,
    Id,
    Name,
    Code,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Teachers {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    DateOfBirth,
    Gender,
    PhoneNumber,
    Email,
    Address,
    ClassLevels,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeacherSubjects {
    Table,
    Id,
    TeacherId,
    SubjectId,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    StudentId,
    UserId,
    FirstName,
    MiddleName,
    LastName,
    DateOfBirth,
    Gender,
    Nationality,
    Ethnicity,
    Religion,
    PlaceOfBirth,
    ResidentialAddress,
    ClassLevel,
    AdmissionDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ParentGuardians {
    Table,
    Id,
    UserId,
    StudentId,
    FullName,
    Occupation,
    Relationship,
    PhoneNumber,
    Email,
    Address,
    IsEmergencyContact,
    EmergencyContactPriority,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ClassAssignments {
    Table,
    Id,
    ClassLevel,
    SubjectId,
    TeacherId,
    AcademicYear,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AcademicTerms {
    Table,
    Id,
    Term,
    AcademicYear,
    StartDate,
    EndDate,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AttendancePeriods {
    Table,
    Id,
    PeriodType,
    TermId,
    StartDate,
    EndDate,
    IsLocked,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StudentAttendances {
    Table,
    Id,
    StudentId,
    Date,
    Status,
    PeriodId,
    TermId,
    RecordedBy,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttendanceSummaries {
    Table,
    Id,
    StudentId,
    TermId,
    PeriodId,
    DaysPresent,
    DaysAbsent,
    DaysLate,
    DaysExcused,
    DaysSick,
    DaysOther,
    TotalDays,
    AttendanceRate,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FeeCategories {
    Table,
    Id,
    Name,
    Description,
    IsMandatory,
    IsActive,
    AppliesToAll,
    ClassLevels,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Fees {
    Table,
    Id,
    StudentId,
    CategoryId,
    AcademicYear,
    Term,
    AmountPayable,
    AmountPaid,
    Balance,
    PaymentStatus,
    PaymentMode,
    PaymentDate,
    DueDate,
    ReceiptNumber,
    Notes,
    RecordedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FeePayments {
    Table,
    Id,
    FeeId,
    Amount,
    PaymentDate,
    PaymentMode,
    ReceiptNumber,
    RecordedBy,
    Notes,
    BankReference,
    IsConfirmed,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    Table,
    Id,
    Title,
    Description,
    AssignmentType,
    SubjectId,
    ClassAssignmentId,
    DueDate,
    MaxScore,
    Weight,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentAssignments {
    Table,
    Id,
    StudentId,
    AssignmentId,
    Status,
    SubmittedAt,
    Score,
    Feedback,
    GradedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Grades {
    Table,
    Id,
    StudentId,
    SubjectId,
    ClassAssignmentId,
    AcademicYear,
    Term,
    ClassworkScore,
    HomeworkScore,
    TestScore,
    ExamScore,
    TotalScore,
    GesGrade,
    Remarks,
    RecordedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ReportCards {
    Table,
    Id,
    StudentId,
    AcademicYear,
    Term,
    AverageScore,
    OverallGrade,
    IsPublished,
    TeacherRemarks,
    PrincipalRemarks,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
