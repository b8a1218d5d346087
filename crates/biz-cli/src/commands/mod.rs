pub mod catalog;
pub mod checkout;
pub mod commission;
pub mod common;
pub mod daily;
pub mod order;
pub mod plan;
pub mod pool;
pub mod wallet;

use biz_core::CompensationPlan;

/// Everything a command handler needs: the resolved plan and the output mode.
pub struct Context {
    pub plan: CompensationPlan,
    pub json: bool,
}
