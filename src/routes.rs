//! Route surface shared by the server router and the client backend

/// Equipment inventory
pub const EQUIPMENT: &str = "/peralatan";
/// Equipment maintenance logs
pub const EQUIPMENT_LOGS: &str = "/log-peralatan";
pub const TASKS: &str = "/tugas";
pub const SCHEDULES: &str = "/jadwal";
/// File archive
pub const FILES: &str = "/arsip";
/// Account approval
pub const ACCOUNTS: &str = "/persetujuan-akun";
/// Complaints; the default landing route of unprivileged accounts
pub const COMPLAINTS: &str = "/pengaduan";
pub const STATISTICS: &str = "/statistik";

/// Entry page for unauthenticated visitors
pub const ENTRY: &str = "/login";
pub const REGISTER: &str = "/auth/register";

/// Prefix of the versioned JSON API
pub const API_PREFIX: &str = "/api/v1";
