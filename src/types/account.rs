//! Account-related types for the bank ledger
//!
//! This module defines the Customer and Account structures and the
//! balance-mutation operations every account supports.

use super::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account number
///
/// Assigned by the setup code that creates the account and never reassigned.
pub type AccountNumber = u64;

/// Account holder identity
///
/// Immutable once the account is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Customer {
    /// Create a customer record
    ///
    /// # Arguments
    ///
    /// * `name` - Name printed on statements
    /// * `address` - Postal address
    /// * `phone` - Contact phone number
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Customer {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
        }
    }
}

/// Customer account state
///
/// The balance is the only mutable field and is only changed through
/// [`deposit`](Account::deposit), [`withdraw`](Account::withdraw) and
/// [`transfer`](Account::transfer). A successful operation never drives it
/// below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The account holder
    pub customer: Customer,

    /// Unique account number
    pub number: AccountNumber,

    balance: Decimal,
}

impl Account {
    /// Create a new account with a zero balance
    ///
    /// # Arguments
    ///
    /// * `number` - The account number, unique within a registry
    /// * `customer` - The account holder
    ///
    /// # Returns
    ///
    /// A new Account with balance = 0
    pub fn new(number: AccountNumber, customer: Customer) -> Self {
        Account {
            customer,
            number,
            balance: Decimal::ZERO,
        }
    }

    /// Create an account with an opening balance
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the opening balance is negative.
    pub fn with_balance(
        number: AccountNumber,
        customer: Customer,
        balance: Decimal,
    ) -> Result<Self, LedgerError> {
        if balance < Decimal::ZERO {
            return Err(LedgerError::invalid_amount(number, balance));
        }

        Ok(Account {
            customer,
            number,
            balance,
        })
    }

    /// Name of the account holder
    pub fn name(&self) -> &str {
        &self.customer.name
    }

    /// Current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Credit funds to the account
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `ArithmeticOverflow` if the new balance cannot be represented exactly
    ///
    /// The balance is unchanged on error.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        self.ensure_positive(amount)?;
        self.balance = self.credited(amount, "deposit")?;
        Ok(())
    }

    /// Debit funds from the account
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `InsufficientFunds` if `amount` exceeds the balance
    /// - `ArithmeticOverflow` if the new balance cannot be represented exactly
    ///
    /// The balance is unchanged on error.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        self.ensure_positive(amount)?;
        self.balance = self.debited(amount, "withdrawal")?;
        Ok(())
    }

    /// Move funds from this account into `destination`
    ///
    /// Both sides are validated before either balance is written, so the
    /// transfer is applied completely or not at all.
    ///
    /// # Arguments
    ///
    /// * `amount` - Strictly positive amount to move
    /// * `destination` - Account credited with `amount`
    ///
    /// # Errors
    ///
    /// - `SameAccount` if both accounts carry the same number
    /// - `InvalidAmount` if `amount <= 0`
    /// - `InsufficientFunds` if `amount` exceeds this account's balance
    /// - `ArithmeticOverflow` if the destination cannot absorb the credit
    pub fn transfer(
        &mut self,
        amount: Decimal,
        destination: &mut Account,
    ) -> Result<(), LedgerError> {
        if self.number == destination.number {
            return Err(LedgerError::same_account(self.number));
        }
        self.ensure_positive(amount)?;

        let source_balance = self.debited(amount, "transfer")?;
        let destination_balance = destination.credited(amount, "transfer")?;

        self.balance = source_balance;
        destination.balance = destination_balance;
        Ok(())
    }

    /// Textual summary: `"<number> - <name> - <balance>"`
    ///
    /// The balance is printed in its shortest form, so `100.00` renders as
    /// `100` and `10.50` as `10.5`.
    pub fn statement(&self) -> String {
        format!(
            "{} - {} - {}",
            self.number,
            self.customer.name,
            self.balance.normalize()
        )
    }

    fn ensure_positive(&self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(self.number, amount));
        }
        Ok(())
    }

    /// Balance after crediting `amount`
    ///
    /// `Decimal` rounds instead of failing when an exact result needs more
    /// than 28 significant digits, so the result is checked against the
    /// requested amount before it is accepted.
    fn credited(&self, amount: Decimal, operation: &str) -> Result<Decimal, LedgerError> {
        self.balance
            .checked_add(amount)
            .filter(|credited| credited.checked_sub(self.balance) == Some(amount))
            .ok_or_else(|| LedgerError::arithmetic_overflow(operation, self.number))
    }

    /// Balance after debiting `amount`, with the same exactness check
    fn debited(&self, amount: Decimal, operation: &str) -> Result<Decimal, LedgerError> {
        if self.balance < amount {
            return Err(LedgerError::insufficient_funds(
                self.number,
                self.balance,
                amount,
            ));
        }

        self.balance
            .checked_sub(amount)
            .filter(|debited| self.balance.checked_sub(*debited) == Some(amount))
            .ok_or_else(|| LedgerError::arithmetic_overflow(operation, self.number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn john() -> Account {
        Account::new(
            1001,
            Customer::new("John", "Los Angeles, California", "(213) 555 0147"),
        )
    }

    fn funded(number: AccountNumber, name: &str, balance: i64) -> Account {
        Account::with_balance(
            number,
            Customer::new(name, "Vegeta's Palace", "(999) 999 9999"),
            Decimal::from(balance),
        )
        .unwrap()
    }

    #[rstest]
    fn test_new_account_has_zero_balance(john: Account) {
        assert_eq!(john.name(), "John");
        assert_eq!(john.number, 1001);
        assert_eq!(john.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_with_balance_rejects_negative_opening_balance() {
        let result = Account::with_balance(
            7,
            Customer::new("Bulma", "Capsule Corp", "(999) 999 9991"),
            Decimal::from(-1),
        );

        assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
    }

    #[rstest]
    #[case::whole(Decimal::from(10))]
    #[case::fractional(Decimal::new(105, 1))]
    #[case::smallest(Decimal::new(1, 4))]
    fn test_deposit_increases_balance_by_amount(mut john: Account, #[case] amount: Decimal) {
        john.deposit(amount).unwrap();
        assert_eq!(john.balance(), amount);
    }

    #[rstest]
    #[case::negative(Decimal::from(-10))]
    #[case::zero(Decimal::ZERO)]
    fn test_deposit_rejects_non_positive_amount(mut john: Account, #[case] amount: Decimal) {
        let result = john.deposit(amount);

        assert_eq!(result, Err(LedgerError::invalid_amount(1001, amount)));
        assert_eq!(john.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_deposit_overflow_leaves_balance_unchanged() {
        let mut account = funded(1, "Max", 0);
        account.balance = Decimal::MAX;

        let result = account.deposit(Decimal::ONE);

        assert!(matches!(
            result,
            Err(LedgerError::ArithmeticOverflow { .. })
        ));
        assert_eq!(account.balance(), Decimal::MAX);
    }

    #[rstest]
    fn test_deposit_then_withdraw_returns_to_zero(mut john: Account) {
        john.deposit(Decimal::from(10)).unwrap();
        john.withdraw(Decimal::from(10)).unwrap();

        assert_eq!(john.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_withdraw_decreases_balance_by_amount() {
        let mut account = funded(1001, "Bulma", 1100);

        account.withdraw(Decimal::from(100)).unwrap();

        assert_eq!(account.balance(), Decimal::from(1000));
    }

    #[rstest]
    fn test_withdraw_with_insufficient_funds(mut john: Account) {
        john.deposit(Decimal::from(5)).unwrap();

        let result = john.withdraw(Decimal::from(10));

        assert_eq!(
            result,
            Err(LedgerError::insufficient_funds(
                1001,
                Decimal::from(5),
                Decimal::from(10)
            ))
        );
        assert_eq!(john.balance(), Decimal::from(5));
    }

    #[rstest]
    #[case::negative(Decimal::from(-10))]
    #[case::zero(Decimal::ZERO)]
    fn test_withdraw_rejects_non_positive_amount(#[case] amount: Decimal) {
        let mut account = funded(1001, "Bulma", 50);

        let result = account.withdraw(amount);

        assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
        assert_eq!(account.balance(), Decimal::from(50));
    }

    #[test]
    fn test_transfer_moves_funds_between_accounts() {
        let mut bulma = funded(1001, "Bulma", 1100);
        let mut vegeta = funded(1002, "Vegeta", 0);

        bulma.transfer(Decimal::from(100), &mut vegeta).unwrap();

        assert_eq!(bulma.balance(), Decimal::from(1000));
        assert_eq!(vegeta.balance(), Decimal::from(100));
    }

    #[test]
    fn test_transfer_preserves_total_balance() {
        let mut bulma = funded(1001, "Bulma", 250);
        let mut vegeta = funded(1002, "Vegeta", 75);
        let total = bulma.balance() + vegeta.balance();

        bulma.transfer(Decimal::new(1255, 1), &mut vegeta).unwrap();

        assert_eq!(bulma.balance() + vegeta.balance(), total);
    }

    #[rstest]
    #[case::insufficient_funds(Decimal::from(100), 0)]
    #[case::negative_amount(Decimal::from(-100), 500)]
    #[case::zero_amount(Decimal::ZERO, 500)]
    fn test_failed_transfer_changes_neither_balance(#[case] amount: Decimal, #[case] opening: i64) {
        let mut bulma = funded(1001, "Bulma", opening);
        let mut vegeta = funded(1002, "Vegeta", 0);

        assert!(bulma.transfer(amount, &mut vegeta).is_err());

        assert_eq!(bulma.balance(), Decimal::from(opening));
        assert_eq!(vegeta.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_transfer_to_account_with_same_number_is_rejected() {
        let mut first = funded(1001, "Bulma", 100);
        let mut second = funded(1001, "Bulma", 100);

        let result = first.transfer(Decimal::from(10), &mut second);

        assert_eq!(result, Err(LedgerError::same_account(1001)));
        assert_eq!(first.balance(), Decimal::from(100));
    }

    #[test]
    fn test_transfer_overflow_on_destination_changes_neither_balance() {
        let mut source = funded(1, "Bulma", 10);
        let mut destination = funded(2, "Vegeta", 0);
        destination.balance = Decimal::MAX;

        let result = source.transfer(Decimal::ONE, &mut destination);

        assert!(matches!(
            result,
            Err(LedgerError::ArithmeticOverflow { .. })
        ));
        assert_eq!(source.balance(), Decimal::from(10));
        assert_eq!(destination.balance(), Decimal::MAX);
    }

    /// 10^28: a balance with 29 significant digits, where adding a fraction
    /// can no longer be represented exactly
    fn huge_balance() -> Decimal {
        Decimal::from_i128_with_scale(10_i128.pow(28), 0)
    }

    #[rstest]
    #[case::tenth(Decimal::new(1, 1))]
    #[case::fraction_of_whole(Decimal::new(15, 1))]
    fn test_inexact_deposit_is_rejected(#[case] amount: Decimal) {
        let mut rich = funded(2, "Rich", 0);
        rich.balance = huge_balance();

        let result = rich.deposit(amount);

        assert_eq!(result, Err(LedgerError::arithmetic_overflow("deposit", 2)));
        assert_eq!(rich.balance(), huge_balance());
    }

    #[test]
    fn test_inexact_withdrawal_is_rejected() {
        let mut rich = funded(2, "Rich", 0);
        rich.balance = huge_balance();

        let result = rich.withdraw(Decimal::new(1, 1));

        assert_eq!(result, Err(LedgerError::arithmetic_overflow("withdrawal", 2)));
        assert_eq!(rich.balance(), huge_balance());
    }

    #[test]
    fn test_inexact_transfer_changes_neither_balance() {
        let mut source = funded(1, "Bulma", 1);
        let mut rich = funded(2, "Rich", 0);
        rich.balance = huge_balance();

        let result = source.transfer(Decimal::new(1, 1), &mut rich);

        assert_eq!(result, Err(LedgerError::arithmetic_overflow("transfer", 2)));
        assert_eq!(source.balance(), Decimal::ONE);
        assert_eq!(rich.balance(), huge_balance());
    }

    #[test]
    fn test_whole_deposit_into_huge_balance_is_exact() {
        let mut rich = funded(2, "Rich", 0);
        rich.balance = huge_balance();

        rich.deposit(Decimal::ONE).unwrap();

        assert_eq!(rich.balance() - huge_balance(), Decimal::ONE);
    }

    #[rstest]
    fn test_statement_of_new_account(john: Account) {
        assert_eq!(john.statement(), "1001 - John - 0");
    }

    #[rstest]
    fn test_statement_after_deposit(mut john: Account) {
        john.deposit(Decimal::from(100)).unwrap();
        assert_eq!(john.statement(), "1001 - John - 100");
    }

    #[rstest]
    #[case::trailing_zeros(Decimal::new(10000, 2), "1001 - John - 100")]
    #[case::fraction(Decimal::new(1050, 2), "1001 - John - 10.5")]
    fn test_statement_uses_shortest_balance_form(
        mut john: Account,
        #[case] amount: Decimal,
        #[case] expected: &str,
    ) {
        john.deposit(amount).unwrap();
        assert_eq!(john.statement(), expected);
    }
}
