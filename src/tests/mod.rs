mod service_tests;

use crate::core::models::Balance;
use crate::core::services::SettlementService;
use crate::infrastructure::ledger::in_memory::InMemoryLedger;
use rust_decimal::Decimal;

pub fn create_test_service() -> SettlementService<InMemoryLedger> {
    let _ = env_logger::try_init();
    SettlementService::new(InMemoryLedger::new())
}

pub fn balances(entries: &[(&str, Decimal)]) -> Vec<Balance> {
    entries.iter().map(|&(user, net)| Balance::new(user, net)).collect()
}
