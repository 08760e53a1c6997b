//! Loan arithmetic for financing options.

/// Fixed monthly payment on `principal - down_payment` over `months`.
///
/// `interest_rate` is the annual rate as a fraction (0.05 = 5% APR). A zero
/// rate splits the loan evenly; zero months means the loan is paid in full.
pub fn calculate_monthly_payment(
    principal: f64,
    interest_rate: f64,
    months: u32,
    down_payment: f64,
) -> f64 {
    let loan = principal - down_payment;
    if months == 0 {
        return loan;
    }
    let n = f64::from(months);
    if interest_rate == 0.0 {
        return loan / n;
    }
    let monthly_rate = interest_rate / 12.0;
    let growth = (1.0 + monthly_rate).powf(n);
    loan * monthly_rate * growth / (growth - 1.0)
}

/// Everything paid over the life of the loan, down payment included.
pub fn calculate_total_cost(
    principal: f64,
    interest_rate: f64,
    months: u32,
    down_payment: f64,
) -> f64 {
    let monthly = calculate_monthly_payment(principal, interest_rate, months, down_payment);
    monthly * f64::from(months.max(1)) + down_payment
}
