//! Permission Definitions
//!
//! Simplified RBAC permission system.
//!
//! ## 设计原则
//! - 目录浏览（供应商、套餐、评论）无需权限，公开可读
//! - 客户权限：预订、参观预约、评分、评论
//! - 商家权限：店铺/套餐管理、参观审批、档期管理
//! - admin 角色拥有全部权限 ("all")

use shared::models::Role;

/// 客户默认权限
pub const CUSTOMER_PERMISSIONS: &[&str] = &[
    "bookings:create",
    "bookings:read",
    "bookings:cancel",
    "visits:create",
    "visits:read",
    "ratings:create",
    "comments:create",
];

/// 商家默认权限
pub const OWNER_PERMISSIONS: &[&str] = &[
    "vendor:manage",
    "listings:manage",
    "bookings:create",
    "bookings:read",
    "bookings:cancel",
    "visits:read",
    "visits:accept",
];

/// Admin 专属权限
pub const ADMIN_PERMISSIONS: &[&str] = &["all"];

/// Get permissions for a role
pub fn role_permissions(role: Role) -> Vec<String> {
    let perms: &[&str] = match role {
        Role::Customer => CUSTOMER_PERMISSIONS,
        Role::Owner => OWNER_PERMISSIONS,
        Role::Admin => ADMIN_PERMISSIONS,
    };
    perms.iter().map(|s| s.to_string()).collect()
}
