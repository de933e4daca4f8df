/// Balances and transfer amounts at or below this are treated as already
/// settled. Compared with strict inequalities only, never float equality.
pub const MATERIALITY_FLOOR: f64 = 0.01;

// Audit log action names
pub const GROUP_CREATED: &str = "group_created";
pub const BILL_RECORDED: &str = "bill_recorded";
pub const SETTLEMENT_PREVIEWED: &str = "settlement_previewed";
pub const SETTLEMENT_CREATED: &str = "settlement_created";
