use crate::core::errors::LedgerError;
use crate::core::models::{Balance, CounterpartyBalance, ExpenseShare, Transfer, UserId};
use crate::core::money;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Running per-counterparty totals for one viewing user.
pub type CounterpartyMap = BTreeMap<UserId, Decimal>;

/// Sums `amount_lent - amount_owed` per user. Users appear in the order they
/// are first seen.
pub fn net_balances<'a>(shares: impl IntoIterator<Item = &'a ExpenseShare>) -> Result<Vec<Balance>, LedgerError> {
    let mut index: HashMap<&UserId, usize> = HashMap::new();
    let mut balances: Vec<Balance> = Vec::new();

    for share in shares {
        let net = share.net()?;
        match index.get(&share.user_id) {
            Some(&i) => balances[i].net = money::checked_add(balances[i].net, net)?,
            None => {
                index.insert(&share.user_id, balances.len());
                balances.push(Balance {
                    user_id: share.user_id.clone(),
                    net,
                });
            }
        }
    }

    debug!("Aggregated net balances: {:?}", balances);
    Ok(balances)
}

/// Folds one scope's transfers into the viewer's running totals.
///
/// A transfer paid by the viewer lowers the payee's entry; one received by
/// the viewer raises the payer's entry. Transfers between other users are
/// ignored.
pub fn fold_counterparty(
    mut running: CounterpartyMap,
    viewer: &UserId,
    transfers: &[Transfer],
) -> Result<CounterpartyMap, LedgerError> {
    for transfer in transfers {
        if &transfer.from_user == viewer {
            let entry = running.entry(transfer.to_user.clone()).or_insert(Decimal::ZERO);
            *entry = money::checked_add(*entry, -transfer.amount)?;
        }
        if &transfer.to_user == viewer {
            let entry = running.entry(transfer.from_user.clone()).or_insert(Decimal::ZERO);
            *entry = money::checked_add(*entry, transfer.amount)?;
        }
    }
    Ok(running)
}

/// Drops settled counterparties and truncates the rest to whole units.
pub fn counterparty_balances(running: &CounterpartyMap) -> Result<Vec<CounterpartyBalance>, LedgerError> {
    running
        .iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(user, &amount)| {
            Ok(CounterpartyBalance {
                user: user.clone(),
                amount: money::truncate_units(amount)?,
            })
        })
        .collect()
}

/// Applies `transfers` to `balances` and returns what is left per user.
/// Every residual of a valid settlement is zero.
pub fn residuals(balances: &[Balance], transfers: &[Transfer]) -> Result<Vec<Balance>, LedgerError> {
    let mut remaining: Vec<Balance> = balances.to_vec();
    let mut index: HashMap<UserId, usize> = remaining
        .iter()
        .enumerate()
        .map(|(i, b)| (b.user_id.clone(), i))
        .collect();

    for transfer in transfers {
        let legs = [
            (&transfer.from_user, transfer.amount),
            (&transfer.to_user, -transfer.amount),
        ];
        for (user, delta) in legs {
            match index.get(user) {
                Some(&i) => remaining[i].net = money::checked_add(remaining[i].net, delta)?,
                None => {
                    index.insert(user.clone(), remaining.len());
                    remaining.push(Balance::new(user.clone(), delta));
                }
            }
        }
    }
    Ok(remaining)
}

/// Caller-side check for the engine's preconditions: one entry per user and
/// nets summing to exactly zero. A sum that overflows is reported as
/// [`LedgerError::AmountOutOfRange`].
pub fn validate_scope(balances: &[Balance]) -> Result<(), LedgerError> {
    let mut seen: HashSet<&UserId> = HashSet::new();
    for balance in balances {
        if !seen.insert(&balance.user_id) {
            warn!("User {} appears twice in balance scope", balance.user_id);
            return Err(LedgerError::DuplicateUser(balance.user_id.to_string()));
        }
    }

    let total = balances
        .iter()
        .try_fold(Decimal::ZERO, |total, b| money::checked_add(total, b.net))
        .inspect_err(|e| warn!("Balance scope cannot be summed: {}", e))?;
    if !total.is_zero() {
        warn!("Balance scope sums to {} instead of zero", total);
        return Err(LedgerError::ImbalancedScope(total));
    }
    Ok(())
}
