//! Fixed user-facing strings

pub const ADMIN_ONLY: &str = "命令僅限管理員使用。";

pub const REVOKE_NOTHING: &str = "目前沒有可撤銷的邀請連結。";
pub const REVOKE_SUCCESS: &str = "已成功撤銷邀請連結：";
pub const REVOKE_FAILED: &str = "撤銷邀請連結失敗，連結可能已失效，請手動確認：";

pub const BUTTON_APPROVE: &str = "✅ 批准";
pub const BUTTON_DECLINE: &str = "❌ 拒絕";

pub const CALLBACK_UNKNOWN_QUERY: &str = "未知的查詢。";
pub const CALLBACK_PERMISSION_DENIED: &str = "你沒有權限執行此操作。";
pub const CALLBACK_APPROVED: &str = "已批准加入申請。";
pub const CALLBACK_DECLINED: &str = "已拒絕加入申請。";
pub const CALLBACK_FAILED: &str = "操作失敗，申請可能已被處理。";

pub const TRANSFER_DISABLED: &str = "此群組未啟用管理員權限轉移。";
pub const TRANSFER_PUBLIC_ADMIN_ONLY: &str = "此命令僅限公開群組管理員使用。";
pub const STATUS_UNAVAILABLE: &str = "無法取得成員狀態，請稍後再試。";
pub const SU_CREATOR: &str = "你是本群群主，無需提權。";
pub const SU_ALREADY_ADMIN: &str = "你已經是本群管理員。";
pub const SU_NOT_MEMBER: &str = "請先加入本群。";
pub const SU_SUCCESS: &str = "已授予管理員權限。";
pub const SU_FAILED: &str = "提權失敗，請確認機器人擁有新增管理員的權限。";
pub const EXIT_CREATOR: &str = "群主無法退出管理員身分。";
pub const EXIT_NOT_ADMIN: &str = "你目前不是本群管理員。";
pub const EXIT_NOT_EDITABLE: &str = "此管理員權限並非由機器人授予，無法撤銷。";
pub const EXIT_SUCCESS: &str = "已撤銷管理員權限。";
pub const EXIT_FAILED: &str = "撤銷管理員權限失敗，請稍後再試。";
