use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_identity_tables::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 通知表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Notifications::RecipientId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::NotificationType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(ColumnDef::new(Notifications::TargetKind).string_len(40).null())
                    .col(ColumnDef::new(Notifications::TargetId).big_integer().null())
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::RecipientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_recipient_read")
                    .table(Notifications::Table)
                    .col(Notifications::RecipientId)
                    .col(Notifications::IsRead)
                    .to_owned(),
            )
            .await?;

        // ==================== 审计日志表 ====================
        manager
            .create_table(
                Table::create()
                    .table(AuditLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuditLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuditLogs::UserId).big_integer().null())
                    .col(ColumnDef::new(AuditLogs::Action).string_len(10).not_null())
                    .col(ColumnDef::new(AuditLogs::TargetKind).string_len(40).null())
                    .col(ColumnDef::new(AuditLogs::TargetId).big_integer().null())
                    .col(ColumnDef::new(AuditLogs::Details).text().null())
                    .col(ColumnDef::new(AuditLogs::IpAddress).string_len(45).null())
                    .col(ColumnDef::new(AuditLogs::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(AuditLogs::Table, AuditLogs::UserId)
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
                    .name("idx_audit_logs_target")
                    .table(AuditLogs::Table)
                    .col(AuditLogs::TargetKind)
                    .col(AuditLogs::TargetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_audit_logs_created_at")
                    .table(AuditLogs::Table)
                    .col(AuditLogs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ==================== 管理操作日志表 ====================
        manager
            .create_table(
                Table::create()
                    .table(AdminActionLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminActionLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdminActionLogs::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminActionLogs::ActionTime)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminActionLogs::TargetKind)
                            .string_len(40)
                            .null(),
                    )
                    .col(ColumnDef::new(AdminActionLogs::TargetId).big_integer().null())
                    .col(
                        ColumnDef::new(AdminActionLogs::ObjectRepr)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminActionLogs::ActionFlag)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(AdminActionLogs::ActionFlag).gte(0)),
                    )
                    .col(
                        ColumnDef::new(AdminActionLogs::ChangeMessage)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AdminActionLogs::Table, AdminActionLogs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 学校配置表（单行） ====================
        manager
            .create_table(
                Table::create()
                    .table(SchoolConfiguration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchoolConfiguration::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SchoolConfiguration::SchoolName)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SchoolConfiguration::GradingSystem)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SchoolConfiguration::IsLocked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SchoolConfiguration::UpdatedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SchoolConfiguration::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SchoolConfiguration::Table, SchoolConfiguration::UpdatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SchoolConfiguration::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminActionLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AuditLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    RecipientId,
    NotificationType,
    Title,
    Message,
    TargetKind,
    TargetId,
    IsRead,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AuditLogs {
    Table,
    Id,
    UserId,
    Action,
    TargetKind,
    TargetId,
    Details,
    IpAddress,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AdminActionLogs {
    Table,
    Id,
    UserId,
    ActionTime,
    TargetKind,
    TargetId,
    ObjectRepr,
    ActionFlag,
    ChangeMessage,
}

#[derive(DeriveIden)]
enum SchoolConfiguration {
    Table,
    Id,
    SchoolName,
    GradingSystem,
    IsLocked,
    UpdatedBy,
    UpdatedAt,
}
