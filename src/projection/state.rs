//! Month-by-month state for the withdrawal simulation

/// Outcome of one simulated month
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MonthOutcome {
    /// Interest accrued and the full withdrawal was paid
    Withdrawn { opening: f64, interest: f64 },
    /// Balance after interest could not cover a full withdrawal; simulation stops
    Insufficient { opening: f64, interest: f64 },
}

/// Balance and running totals of a withdrawal plan
#[derive(Debug, Clone)]
pub struct WithdrawalState {
    /// Months simulated so far (1-indexed once advanced)
    pub month: u32,

    /// Current balance
    pub balance: f64,

    /// Sum of all withdrawals paid
    pub total_withdrawn: f64,

    /// Months in which a full withdrawal was paid
    pub withdrawals_made: u32,
}

impl WithdrawalState {
    pub fn new(principal: f64) -> Self {
        Self {
            month: 0,
            balance: principal,
            total_withdrawn: 0.0,
            withdrawals_made: 0,
        }
    }

    /// Accrue a month of interest, then pay `withdrawal` if the balance covers it
    ///
    /// The balance is never driven below zero: an uncovered month leaves it as-is.
    pub fn advance_month(&mut self, monthly_rate: f64, withdrawal: f64) -> MonthOutcome {
        self.month += 1;

        let opening = self.balance;
        let interest = opening * monthly_rate;
        self.balance += interest;

        if self.balance < withdrawal {
            log::trace!("month {}: balance {:.2} below withdrawal {:.2}", self.month, self.balance, withdrawal);
            return MonthOutcome::Insufficient { opening, interest };
        }

        self.balance -= withdrawal;
        self.total_withdrawn += withdrawal;
        self.withdrawals_made += 1;
        log::trace!("month {}: paid {:.2}, balance {:.2}", self.month, withdrawal, self.balance);

        MonthOutcome::Withdrawn { opening, interest }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdraw_after_interest() {
        let mut state = WithdrawalState::new(10_000.0);
        let outcome = state.advance_month(0.01, 1_000.0);

        assert_eq!(
            outcome,
            MonthOutcome::Withdrawn {
                opening: 10_000.0,
                interest: 100.0
            }
        );
        assert_eq!(state.balance, 9_100.0);
        assert_eq!(state.total_withdrawn, 1_000.0);
        assert_eq!(state.withdrawals_made, 1);
    }

    #[test]
    fn test_insufficient_leaves_balance() {
        let mut state = WithdrawalState::new(900.0);
        let outcome = state.advance_month(0.0, 1_000.0);

        assert!(matches!(outcome, MonthOutcome::Insufficient { .. }));
        assert_eq!(state.balance, 900.0);
        assert_eq!(state.total_withdrawn, 0.0);
        assert_eq!(state.month, 1);
    }

    #[test]
    fn test_exact_balance_is_withdrawn() {
        let mut state = WithdrawalState::new(1_000.0);
        state.advance_month(0.0, 1_000.0);
        assert_eq!(state.balance, 0.0);
        assert_eq!(state.withdrawals_made, 1);
    }
}
