use crate::client::{LoanRequest, LoanResult};
use crate::format::format_inr;

/// Everything one display update needs: the backend's figures plus the
/// inputs they were computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub emi: Option<f64>,
    pub total: Option<f64>,
    pub interest: Option<f64>,
    pub principal: f64,
    pub rate: f64,
    pub tenure: u32,
}

impl Breakdown {
    pub fn from_result(request: &LoanRequest, result: &LoanResult) -> Self {
        Self {
            emi: result.monthly_emi,
            total: result.total_amount_payable,
            interest: result.total_interest,
            principal: request.principal,
            rate: request.rate,
            tenure: request.tenure_months,
        }
    }

    /// Zeroed figures, inputs still echoed.
    pub fn fallback(request: &LoanRequest) -> Self {
        Self {
            emi: Some(0.0),
            total: Some(0.0),
            interest: Some(0.0),
            principal: request.principal,
            rate: request.rate,
            tenure: request.tenure_months,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputSlots {
    pub monthly_emi: String,
    pub total_amount: String,
    pub total_interest: String,
    pub principal_out: String,
    pub rate_out: String,
    pub tenure_out: String,
}

impl Default for OutputSlots {
    fn default() -> Self {
        Self {
            monthly_emi: format_inr(0.0),
            total_amount: format_inr(0.0),
            total_interest: format_inr(0.0),
            principal_out: format_inr(0.0),
            rate_out: String::new(),
            tenure_out: String::new(),
        }
    }
}

impl OutputSlots {
    /// Replaces all six slots at once.
    pub fn overwrite(&mut self, slots: OutputSlots) {
        *self = slots;
    }
}

pub fn render_outputs(breakdown: &Breakdown) -> OutputSlots {
    OutputSlots {
        monthly_emi: format_inr(breakdown.emi),
        total_amount: format_inr(breakdown.total),
        total_interest: format_inr(breakdown.interest),
        principal_out: format_inr(breakdown.principal),
        rate_out: format!("{}% per annum", breakdown.rate),
        tenure_out: format!("{} months", breakdown.tenure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LoanRequest {
        LoanRequest {
            principal: 100000.0,
            rate: 10.0,
            tenure_months: 12,
        }
    }

    #[test]
    fn renders_a_successful_result() {
        let result = LoanResult {
            monthly_emi: Some(1000.0),
            total_amount_payable: Some(120000.0),
            total_interest: Some(20000.0),
        };

        let slots = render_outputs(&Breakdown::from_result(&request(), &result));

        assert_eq!(
            slots,
            OutputSlots {
                monthly_emi: "₹1,000".into(),
                total_amount: "₹1,20,000".into(),
                total_interest: "₹20,000".into(),
                principal_out: "₹1,00,000".into(),
                rate_out: "10% per annum".into(),
                tenure_out: "12 months".into(),
            }
        );
    }

    #[test]
    fn fallback_zeroes_figures_but_keeps_inputs() {
        let slots = render_outputs(&Breakdown::fallback(&request()));

        assert_eq!(slots.monthly_emi, "₹0");
        assert_eq!(slots.total_amount, "₹0");
        assert_eq!(slots.total_interest, "₹0");
        assert_eq!(slots.principal_out, "₹1,00,000");
        assert_eq!(slots.rate_out, "10% per annum");
        assert_eq!(slots.tenure_out, "12 months");
    }

    #[test]
    fn fractional_rate_prints_shortest_form() {
        let mut req = request();
        req.rate = 7.25;
        let slots = render_outputs(&Breakdown::fallback(&req));
        assert_eq!(slots.rate_out, "7.25% per annum");
    }

    #[test]
    fn absent_figures_render_as_zero() {
        let slots = render_outputs(&Breakdown::from_result(&request(), &LoanResult::default()));
        assert_eq!(slots.monthly_emi, "₹0");
        assert_eq!(slots.total_amount, "₹0");
    }

    #[test]
    fn overwrite_replaces_every_slot() {
        let mut slots = render_outputs(&Breakdown::fallback(&request()));
        let mut other = request();
        other.principal = 5000.0;
        other.rate = 12.0;
        other.tenure_months = 24;
        let next = render_outputs(&Breakdown::fallback(&other));

        slots.overwrite(next.clone());
        assert_eq!(slots, next);
    }
}
