//! Input validation for payoff simulations.

use rust_decimal::Decimal;

use super::error::PayoffError;
use super::types::Debt;

/// Validates debts and budget before a simulation starts.
///
/// # Errors
///
/// Returns the first negative amount found, checking debts in input order.
pub fn validate_input(debts: &[Debt], monthly_budget: Decimal) -> Result<(), PayoffError> {
    for debt in debts {
        if debt.balance < Decimal::ZERO {
            return Err(PayoffError::NegativeBalance {
                name: debt.name.clone(),
            });
        }
        if debt.annual_interest_rate < Decimal::ZERO {
            return Err(PayoffError::NegativeInterestRate {
                name: debt.name.clone(),
            });
        }
        if debt.min_payment < Decimal::ZERO {
            return Err(PayoffError::NegativeMinPayment {
                name: debt.name.clone(),
            });
        }
    }

    if monthly_budget < Decimal::ZERO {
        return Err(PayoffError::NegativeBudget(monthly_budget));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_input_passes() {
        let debts = vec![
            Debt::new("card", dec!(1000), dec!(18), dec!(50)),
            Debt::new("cleared", dec!(0), dec!(0), dec!(0)),
        ];
        assert!(validate_input(&debts, dec!(200)).is_ok());
        assert!(validate_input(&[], dec!(0)).is_ok());
    }

    #[rstest]
    #[case(dec!(-0.01), dec!(18), dec!(50), "NegativeBalance")]
    #[case(dec!(100), dec!(-1), dec!(50), "NegativeInterestRate")]
    #[case(dec!(100), dec!(18), dec!(-5), "NegativeMinPayment")]
    fn test_negative_debt_amounts_rejected(
        #[case] balance: Decimal,
        #[case] rate: Decimal,
        #[case] min_payment: Decimal,
        #[case] variant: &str,
    ) {
        let debts = vec![Debt::new("loan", balance, rate, min_payment)];
        let err = validate_input(&debts, dec!(100)).unwrap_err();
        let name = "loan".to_string();
        let expected = match variant {
            "NegativeBalance" => PayoffError::NegativeBalance { name },
            "NegativeInterestRate" => PayoffError::NegativeInterestRate { name },
            _ => PayoffError::NegativeMinPayment { name },
        };
        assert_eq!(err, expected);
    }

    #[test]
    fn test_negative_budget_rejected() {
        let debts = vec![Debt::new("card", dec!(1000), dec!(18), dec!(50))];
        assert_eq!(
            validate_input(&debts, dec!(-10)),
            Err(PayoffError::NegativeBudget(dec!(-10)))
        );
    }

    #[test]
    fn test_negative_zero_balance_is_accepted() {
        let debts = vec![Debt::new("card", -Decimal::ZERO, dec!(18), dec!(50))];
        assert!(validate_input(&debts, dec!(100)).is_ok());
    }
}
