use super::SeaOrmStorage;
use crate::entity::school_configuration::SINGLETON_ID;
use crate::entity::{
    academic_terms, assignments, attendance_periods, attendance_summaries, class_assignments,
    fee_categories, fee_payments, fees, grades, groups, notifications, parent_guardians,
    report_cards, school_configuration, student_assignments, student_attendances, students,
    subjects, teachers, users,
};
use crate::errors::{Result, SchoolError};
use crate::models::{
    TargetKind, TargetRef,
    system::{
        entities::{GradingSystem, SchoolConfiguration},
        requests::UpdateSchoolConfigurationRequest,
    },
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, Set};

/// 按引用类型到对应表确认记录存在
pub(super) async fn target_exists_on<C: ConnectionTrait>(db: &C, target: TargetRef) -> Result<bool> {
    let id = target.id;
    let count = match target.kind {
        TargetKind::Account => users::Entity::find_by_id(id).count(db).await,
        TargetKind::Group => groups::Entity::find_by_id(id).count(db).await,
        TargetKind::Student => students::Entity::find_by_id(id).count(db).await,
        TargetKind::ParentGuardian => parent_guardians::Entity::find_by_id(id).count(db).await,
        TargetKind::Teacher => teachers::Entity::find_by_id(id).count(db).await,
        TargetKind::Subject => subjects::Entity::find_by_id(id).count(db).await,
        TargetKind::ClassAssignment => class_assignments::Entity::find_by_id(id).count(db).await,
        TargetKind::AcademicTerm => academic_terms::Entity::find_by_id(id).count(db).await,
        TargetKind::AttendancePeriod => attendance_periods::Entity::find_by_id(id).count(db).await,
        TargetKind::StudentAttendance => {
            student_attendances::Entity::find_by_id(id).count(db).await
        }
        TargetKind::AttendanceSummary => {
            attendance_summaries::Entity::find_by_id(id).count(db).await
        }
        TargetKind::FeeCategory => fee_categories::Entity::find_by_id(id).count(db).await,
        TargetKind::Fee => fees::Entity::find_by_id(id).count(db).await,
        TargetKind::FeePayment => fee_payments::Entity::find_by_id(id).count(db).await,
        TargetKind::Assignment => assignments::Entity::find_by_id(id).count(db).await,
        TargetKind::StudentAssignment => {
            student_assignments::Entity::find_by_id(id).count(db).await
        }
        TargetKind::Grade => grades::Entity::find_by_id(id).count(db).await,
        TargetKind::ReportCard => report_cards::Entity::find_by_id(id).count(db).await,
        TargetKind::Notification => notifications::Entity::find_by_id(id).count(db).await,
        TargetKind::SchoolConfiguration => {
            school_configuration::Entity::find_by_id(id).count(db).await
        }
    }
    .map_err(|e| SchoolError::from_db("查询引用目标失败", e))?;

    Ok(count > 0)
}

impl SeaOrmStorage {
    /// 配置行不存在时写入默认值
    pub async fn ensure_school_configuration_impl(
        &self,
        school_name: &str,
        grading_system: GradingSystem,
    ) -> Result<SchoolConfiguration> {
        if let Some(existing) = self.get_school_configuration_impl().await? {
            return Ok(existing);
        }

        let model = school_configuration::ActiveModel {
            id: Set(SINGLETON_ID),
            school_name: Set(school_name.to_string()),
            grading_system: Set(grading_system.to_string()),
            is_locked: Set(false),
            updated_by: Set(None),
            updated_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("初始化学校配置失败", e))?;
        Ok(result.into_configuration())
    }

    pub async fn get_school_configuration_impl(&self) -> Result<Option<SchoolConfiguration>> {
        let result = school_configuration::Entity::find_by_id(SINGLETON_ID)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学校配置失败", e))?;
        Ok(result.map(|m| m.into_configuration()))
    }

    /// 更新学校配置；锁定状态下拒绝修改评分体系
    pub async fn update_school_configuration_impl(
        &self,
        update: UpdateSchoolConfigurationRequest,
        updated_by: i64,
    ) -> Result<SchoolConfiguration> {
        let existing = school_configuration::Entity::find_by_id(SINGLETON_ID)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学校配置失败", e))?
            .ok_or_else(|| SchoolError::not_found("School configuration has not been initialised"))?;

        existing
            .clone()
            .into_configuration()
            .check_update(update.grading_system)
            .map_err(SchoolError::validation)?;

        let mut model: school_configuration::ActiveModel = existing.clone().into();
        if let Some(v) = update.school_name {
            model.school_name.set_if_not_equals(v);
        }
        if let Some(v) = update.grading_system {
            model.grading_system.set_if_not_equals(v.to_string());
        }
        if let Some(v) = update.is_locked {
            model.is_locked.set_if_not_equals(v);
        }
        if !model.is_changed() {
            return Ok(existing.into_configuration());
        }
        model.updated_by = Set(Some(updated_by));
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新学校配置失败", e))?;
        Ok(updated.into_configuration())
    }

    pub async fn target_exists_impl(&self, target: TargetRef) -> Result<bool> {
        target_exists_on(&self.db, target).await
    }
}
