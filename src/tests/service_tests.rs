use crate::core::engine::ZeroTransferPolicy;
use crate::core::errors::LedgerError;
use crate::core::models::{CounterpartyBalance, Expense, ExpenseShare, Group, GroupTransfer, Transfer, UserId};
use crate::core::services::SettlementService;
use crate::infrastructure::ledger::LedgerStorage;
use crate::infrastructure::ledger::in_memory::InMemoryLedger;
use crate::tests::create_test_service;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn dinner_shares() -> Vec<ExpenseShare> {
    vec![
        ExpenseShare::new("alice", dec!(10), dec!(30)),
        ExpenseShare::new("bob", dec!(10), dec!(0)),
        ExpenseShare::new("carol", dec!(10), dec!(0)),
    ]
}

fn group_transfer(from: &str, to: &str, amount: &str) -> GroupTransfer {
    GroupTransfer {
        from_user: UserId::from(from),
        to_user: UserId::from(to),
        amount: amount.to_string(),
    }
}

#[tokio::test]
async fn test_record_and_settle_expense() {
    let service = create_test_service();

    let expense = service
        .record_expense(None, "Dinner".to_string(), dinner_shares())
        .await
        .unwrap();
    assert_eq!(expense.total_amount, dec!(30));

    let transfers = service.settle_expense(&expense.id).await.unwrap();
    assert_eq!(
        transfers,
        vec![
            Transfer::new("bob", "alice", dec!(10)),
            Transfer::new("carol", "alice", dec!(10)),
        ]
    );
}

#[tokio::test]
async fn test_settle_unknown_expense() {
    let service = create_test_service();
    let result = service.settle_expense("nope").await;
    assert!(matches!(result, Err(LedgerError::ExpenseNotFound(id)) if id == "nope"));
}

#[tokio::test]
async fn test_settle_group_nets_across_expenses_and_formats_amounts() {
    let service = create_test_service();
    let group = service.add_group("Trip".to_string()).await.unwrap();

    service
        .record_expense(
            Some(&group.id),
            "Hotel".to_string(),
            vec![
                ExpenseShare::new("alice", dec!(33.33), dec!(100)),
                ExpenseShare::new("bob", dec!(33.33), dec!(0)),
                ExpenseShare::new("carol", dec!(33.34), dec!(0)),
            ],
        )
        .await
        .unwrap();
    service
        .record_expense(
            Some(&group.id),
            "Fuel".to_string(),
            vec![
                ExpenseShare::new("bob", dec!(20), dec!(40)),
                ExpenseShare::new("alice", dec!(20), dec!(0)),
            ],
        )
        .await
        .unwrap();
    // Not tagged with the group, must not count.
    service
        .record_expense(
            None,
            "Coffee".to_string(),
            vec![
                ExpenseShare::new("carol", dec!(0), dec!(4)),
                ExpenseShare::new("alice", dec!(4), dec!(0)),
            ],
        )
        .await
        .unwrap();

    let settlement = service.settle_group(&group.id).await.unwrap();

    // alice 46.67, bob -13.33, carol -33.34
    assert_eq!(settlement.group_id, group.id);
    assert_eq!(
        settlement.transfers,
        vec![
            group_transfer("carol", "alice", "33.34"),
            group_transfer("bob", "alice", "13.33"),
        ]
    );
}

#[tokio::test]
async fn test_settle_group_without_expenses() {
    let service = create_test_service();
    let group = service.add_group("Empty".to_string()).await.unwrap();

    let settlement = service.settle_group(&group.id).await.unwrap();
    assert!(settlement.transfers.is_empty());
}

#[tokio::test]
async fn test_settle_unknown_group() {
    let service = create_test_service();
    let result = service.settle_group("missing").await;
    assert_eq!(result.err(), Some(LedgerError::GroupNotFound("missing".to_string())));
}

#[tokio::test]
async fn test_user_balances_fold_per_expense_settlements() {
    let service = create_test_service();
    service
        .record_expense(None, "Dinner".to_string(), dinner_shares())
        .await
        .unwrap();
    service
        .record_expense(
            None,
            "Cinema".to_string(),
            vec![
                ExpenseShare::new("bob", dec!(10), dec!(20)),
                ExpenseShare::new("alice", dec!(10), dec!(0)),
            ],
        )
        .await
        .unwrap();

    let alice = service.user_balances(&UserId::from("alice")).await.unwrap();
    assert_eq!(
        alice,
        vec![CounterpartyBalance {
            user: UserId::from("carol"),
            amount: 10
        }]
    );

    let carol = service.user_balances(&UserId::from("carol")).await.unwrap();
    assert_eq!(
        carol,
        vec![CounterpartyBalance {
            user: UserId::from("alice"),
            amount: -10
        }]
    );
}

#[tokio::test]
async fn test_user_balances_truncate_toward_zero() {
    let service = create_test_service();
    service
        .record_expense(
            None,
            "Lunch".to_string(),
            vec![
                ExpenseShare::new("alice", dec!(0), dec!(10.75)),
                ExpenseShare::new("bob", dec!(10.75), dec!(0)),
            ],
        )
        .await
        .unwrap();

    let alice = service.user_balances(&UserId::from("alice")).await.unwrap();
    assert_eq!(alice[0].amount, 10);

    let bob = service.user_balances(&UserId::from("bob")).await.unwrap();
    assert_eq!(bob[0].amount, -10);

    let stranger = service.user_balances(&UserId::from("erin")).await.unwrap();
    assert!(stranger.is_empty());
}

#[tokio::test]
async fn test_zero_transfer_policy_is_applied() {
    let shares = vec![
        ExpenseShare::new("a", dec!(5), dec!(0)),
        ExpenseShare::new("b", dec!(5), dec!(0)),
        ExpenseShare::new("c", dec!(0), dec!(5)),
        ExpenseShare::new("d", dec!(0), dec!(5)),
    ];

    let emitting = create_test_service();
    let expense = emitting
        .record_expense(None, "Split".to_string(), shares.clone())
        .await
        .unwrap();
    let transfers = emitting.settle_expense(&expense.id).await.unwrap();
    assert_eq!(transfers.len(), 3);
    assert!(transfers[1].amount.is_zero());

    let skipping = SettlementService::with_policy(InMemoryLedger::new(), ZeroTransferPolicy::Skip);
    assert_eq!(skipping.zero_transfer_policy(), ZeroTransferPolicy::Skip);
    let expense = skipping
        .record_expense(None, "Split".to_string(), shares)
        .await
        .unwrap();
    let transfers = skipping.settle_expense(&expense.id).await.unwrap();
    assert_eq!(transfers.len(), 2);
    assert!(transfers.iter().all(|t| !t.amount.is_zero()));
}

#[tokio::test]
async fn test_record_expense_validation() {
    let service = create_test_service();

    let result = service.record_expense(None, "  ".to_string(), dinner_shares()).await;
    assert!(matches!(result, Err(LedgerError::InvalidInput(field, _)) if field == "description"));

    let result = service
        .record_expense(Some("missing"), "Dinner".to_string(), dinner_shares())
        .await;
    assert_eq!(result.err(), Some(LedgerError::GroupNotFound("missing".to_string())));

    let result = service.record_expense(None, "Dinner".to_string(), vec![]).await;
    assert!(matches!(result, Err(LedgerError::InvalidInput(field, _)) if field == "shares"));

    let result = service
        .record_expense(
            None,
            "Dinner".to_string(),
            vec![
                ExpenseShare::new("alice", dec!(-5), dec!(0)),
                ExpenseShare::new("bob", dec!(0), dec!(-5)),
            ],
        )
        .await;
    assert!(matches!(result, Err(LedgerError::InvalidInput(field, _)) if field == "shares"));

    let result = service
        .record_expense(
            None,
            "Dinner".to_string(),
            vec![
                ExpenseShare::new("alice", dec!(5), dec!(0)),
                ExpenseShare::new("alice", dec!(0), dec!(5)),
            ],
        )
        .await;
    assert_eq!(result.err(), Some(LedgerError::DuplicateUser("alice".to_string())));

    let result = service
        .record_expense(
            None,
            "Dinner".to_string(),
            vec![
                ExpenseShare::new("alice", dec!(0), dec!(30)),
                ExpenseShare::new("bob", dec!(25), dec!(0)),
            ],
        )
        .await;
    assert_eq!(result.err(), Some(LedgerError::ImbalancedScope(dec!(5))));
}

#[tokio::test]
async fn test_add_group_rejects_blank_name() {
    let service = create_test_service();
    let result = service.add_group(String::new()).await;
    assert!(matches!(result, Err(LedgerError::InvalidInput(field, _)) if field == "name"));

    let group = service.add_group("Flat".to_string()).await.unwrap();
    assert_eq!(service.get_group(&group.id).await.unwrap(), Some(group));
}

#[tokio::test]
async fn test_record_expense_rejects_amounts_that_overflow() {
    let service = create_test_service();

    let result = service
        .record_expense(
            None,
            "Huge".to_string(),
            vec![
                ExpenseShare::new("a", Decimal::MAX, dec!(0)),
                ExpenseShare::new("b", Decimal::MAX, dec!(0)),
                ExpenseShare::new("c", dec!(0), Decimal::MAX),
            ],
        )
        .await;
    assert_eq!(result.err(), Some(LedgerError::AmountOutOfRange(Decimal::MIN)));

    // Nets balance, but the total owed does not fit.
    let result = service
        .record_expense(
            None,
            "Huge".to_string(),
            vec![
                ExpenseShare::new("a", Decimal::MAX, Decimal::MAX),
                ExpenseShare::new("b", Decimal::MAX, Decimal::MAX),
            ],
        )
        .await;
    assert_eq!(result.err(), Some(LedgerError::AmountOutOfRange(Decimal::MAX)));
}

#[tokio::test]
async fn test_settle_group_reports_overflow_from_loaded_expenses() {
    let ledger = InMemoryLedger::new();
    ledger
        .save_group(Group {
            id: "g1".to_string(),
            name: "Loaded".to_string(),
        })
        .await
        .unwrap();
    for id in ["e1", "e2"] {
        ledger
            .save_expense(Expense {
                id: id.to_string(),
                group_id: Some("g1".to_string()),
                description: "Huge".to_string(),
                total_amount: Decimal::MAX,
                shares: vec![
                    ExpenseShare::new("a", Decimal::MAX, dec!(0)),
                    ExpenseShare::new("b", dec!(0), Decimal::MAX),
                ],
            })
            .await
            .unwrap();
    }
    let service = SettlementService::new(ledger);

    let result = service.settle_group("g1").await;
    assert!(matches!(result, Err(LedgerError::AmountOutOfRange(_))));

    let result = service.user_balances(&UserId::from("a")).await;
    assert!(matches!(result, Err(LedgerError::AmountOutOfRange(_))));
}
