use rust_decimal::Decimal;

use crate::error::ImmoInvestError;
use crate::types::{Money, Rate};
use crate::ImmoInvestResult;

/// `a * b`, or [`ImmoInvestError::Overflow`] naming `context`.
pub(crate) fn checked_product(a: Decimal, b: Decimal, context: &str) -> ImmoInvestResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| ImmoInvestError::Overflow {
        context: context.into(),
    })
}

/// `a + b`, or [`ImmoInvestError::Overflow`] naming `context`.
pub(crate) fn checked_sum(a: Decimal, b: Decimal, context: &str) -> ImmoInvestResult<Decimal> {
    a.checked_add(b).ok_or_else(|| ImmoInvestError::Overflow {
        context: context.into(),
    })
}

/// (1 + rate)^periods via iterative multiplication.
pub fn compound_factor(rate: Rate, periods: u32) -> ImmoInvestResult<Decimal> {
    let one_plus_r = Decimal::ONE + rate;
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = checked_product(factor, one_plus_r, "compound factor")?;
    }
    Ok(factor)
}

/// Level payment that amortises `principal` over `nper` periods.
///
/// Annuity formula `P * r(1+r)^n / ((1+r)^n - 1)`; a zero rate has no
/// closed form and falls back to straight-line repayment `P / n`.
pub fn annuity_payment(principal: Money, periodic_rate: Rate, nper: u32) -> ImmoInvestResult<Money> {
    if nper == 0 {
        return Err(ImmoInvestError::InvalidAssumption {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if periodic_rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = compound_factor(periodic_rate, nper)?;
    let denominator = factor - Decimal::ONE;

    if denominator.is_zero() {
        return Err(ImmoInvestError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    // factor / denominator stays near 1 for large factors
    let interest = checked_product(principal, periodic_rate, "annuity payment")?;
    checked_product(interest, factor / denominator, "annuity payment")
}
